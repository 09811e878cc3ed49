use crate::error::ErrorKind;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, FileList, HtmlButtonElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// A value given to `Handle::val`.
#[derive(Clone, Debug)]
pub enum Value {
    /// Plain text: an input's `value`, a radio button's value to match, a
    /// single `<select>` choice.
    Text(String),
    /// A number; only used as text.
    Number(f64),
    /// A checkbox state.
    Bool(bool),
    /// The choices of a `<select multiple>`.
    List(Vec<String>),
    /// The files of an `<input type="file">`.
    Files(FileList),
}

impl Value {
    /// Whether this value counts as "checked" for a checkbox.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Text(s) => !s.is_empty(),
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Bool(b) => *b,
            Value::List(_) | Value::Files(_) => true,
        }
    }

    /// The text this value stands for when an element can only hold text.
    pub fn to_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::List(items) => items.join(","),
            Value::Files(_) => "[object FileList]".to_string(),
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(n: i32) -> Value {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    #[inline]
    fn from(items: Vec<String>) -> Value {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Value {
        Value::List(items.into_iter().map(String::from).collect())
    }
}

impl From<FileList> for Value {
    #[inline]
    fn from(files: FileList) -> Value {
        Value::Files(files)
    }
}

/// Set the value of a form control, or the text of any other element.
pub(crate) fn set_form_value(element: &Element, value: &Value) -> Result<(), ErrorKind> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        match input.type_().as_str() {
            "checkbox" => input.set_checked(value.is_truthy()),
            "radio" => input.set_checked(value.as_text() == Some(input.value().as_str())),
            "file" => {
                if let Value::Files(files) = value {
                    input.set_files(Some(files));
                }
            }
            _ => {
                if let Some(text) = value.as_text() {
                    input.set_value(text);
                }
            }
        }
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        match value {
            Value::List(choices) if select.multiple() => {
                let options = select.options();
                for i in 0..options.length() {
                    if let Some(option) = options
                        .item(i)
                        .and_then(|o| o.dyn_into::<HtmlOptionElement>().ok())
                    {
                        option.set_selected(choices.iter().any(|c| *c == option.value()));
                    }
                }
            }
            Value::Text(_) | Value::Number(_) => select.set_value(&value.to_text()),
            _ => {}
        }
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        textarea.set_value(&value.to_text());
    } else if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
        button.set_value(&value.to_text());
    } else {
        element.set_text_content(Some(&value.to_text()));
    }
    Ok(())
}
