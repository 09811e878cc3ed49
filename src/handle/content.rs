use super::Handle;
use crate::dom;
use crate::error::{Error, ErrorKind};
use crate::form::{self, Value};
use crate::queue::Step;
use crate::sanitize;
use crate::style;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Content, form values and styles.
impl Handle {
    /// Replace the contents with raw, unsanitized `markup`.
    pub fn html(&self, markup: &str) -> Result<&Self, Error> {
        let markup = markup.to_string();
        self.fan_out("html", move |el| {
            el.set_inner_html(&markup);
            Ok(())
        })
    }

    /// Replace the contents with `markup` after sanitizing it.
    pub fn sanitize(&self, markup: &str) -> Result<&Self, Error> {
        let markup = markup.to_string();
        self.fan_out("sanitize", move |el| Ok(sanitize::set_html(el, &markup)?))
    }

    /// Replace the contents with a text node.
    pub fn text(&self, text: &str) -> Result<&Self, Error> {
        let text = text.to_string();
        self.fan_out("text", move |el| {
            el.set_text_content(Some(&text));
            Ok(())
        })
    }

    /// Set the value of form controls; other elements get it as text.
    ///
    /// Checkboxes are checked when `value` is truthy, radio buttons when
    /// their own value equals `value`, and a `<select multiple>` selects
    /// every option listed in a `Value::List`.
    pub fn val(&self, value: impl Into<Value>) -> Result<&Self, Error> {
        let value = value.into();
        self.fan_out("val", move |el| form::set_form_value(el, &value))
    }

    /// Set one inline style property. Accepts `backgroundColor` as well as
    /// `background-color`; an empty `value` removes the property.
    pub fn css(&self, property: &str, value: &str) -> Result<&Self, Error> {
        let declarations = vec![(style::css_property_name(property), value.to_string())];
        self.fan_out("css", move |el| set_styles(el, &declarations))
    }

    /// Set several inline style properties at once.
    pub fn css_all<I, K, V>(&self, styles: I) -> Result<&Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let declarations: Vec<(String, String)> = styles
            .into_iter()
            .map(|(k, v)| (style::css_property_name(k.as_ref()), v.as_ref().to_string()))
            .collect();
        self.fan_out("css_all", move |el| set_styles(el, &declarations))
    }

    /// Append a `<style>` element with `rules` to the document's `<head>`.
    /// Runs once, however many elements the handle has.
    pub fn add_style_sheet(&self, rules: &str) -> Result<&Self, Error> {
        let rules = rules.to_string();
        let document = self.dom.document().clone();
        self.dispatch("add_style_sheet", move |_| {
            dom::add_style_sheet(&document, &rules)?;
            Ok(Step::Done)
        })
    }
}

fn set_styles(el: &Element, declarations: &[(String, String)]) -> Result<(), ErrorKind> {
    let style = el
        .dyn_ref::<HtmlElement>()
        .ok_or(ErrorKind::NotStylable)?
        .style();
    for (property, value) in declarations {
        if value.is_empty() {
            style.remove_property(property)?;
        } else {
            style.set_property(property, value)?;
        }
    }
    Ok(())
}
