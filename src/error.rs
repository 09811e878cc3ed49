use crate::logging::error;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Where a failure happened: the handle method that was running and the
/// selector its handle was created from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    method: &'static str,
    selector: Rc<str>,
}

impl Context {
    /// Construct a new operation context.
    pub fn new(method: &'static str, selector: impl Into<Rc<str>>) -> Context {
        Context {
            method,
            selector: selector.into(),
        }
    }

    /// The name of the method that failed, e.g. `"add_class"`.
    #[inline]
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// The selector the failing handle was created from.
    #[inline]
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({:?})", self.method, &*self.selector)
    }
}

/// The different ways an operation can fail.
#[derive(Clone, Debug)]
pub enum ErrorKind {
    /// The host DOM threw an exception.
    Js(JsValue),

    /// There is no `window` or no `document` to operate on.
    NoDocument,

    /// The operation needs an element but the handle is empty.
    MissingTarget,

    /// `replace_with` ran out of replacement elements at this index.
    MissingReplacement {
        /// Index of the target that had no replacement.
        index: usize,
    },

    /// The element has no inline style, e.g. it is not an `HTMLElement`.
    NotStylable,

    /// A `data` key that `dataset` would reject.
    InvalidDataKey(String),

    /// A failure inside a callback given to `Handle::each`.
    Nested(Box<Error>),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::Js(value) => match value.dyn_ref::<js_sys::Error>() {
                Some(e) => write!(f, "{}", String::from(e.message())),
                None => write!(f, "{:?}", value),
            },
            ErrorKind::NoDocument => write!(f, "no document is available"),
            ErrorKind::MissingTarget => write!(f, "the handle has no element to operate on"),
            ErrorKind::MissingReplacement { index } => {
                write!(f, "no replacement element for target {}", index)
            }
            ErrorKind::NotStylable => write!(f, "the element does not support inline styles"),
            ErrorKind::InvalidDataKey(key) => write!(f, "invalid data attribute key {:?}", key),
            ErrorKind::Nested(inner) => write!(f, "{}", inner),
        }
    }
}

impl From<JsValue> for ErrorKind {
    #[inline]
    fn from(value: JsValue) -> ErrorKind {
        ErrorKind::Js(value)
    }
}

/// A failed handle operation, annotated with the method name and selector.
#[derive(Clone, Debug)]
pub struct Error {
    context: Context,
    kind: ErrorKind,
}

impl Error {
    /// Construct a new error from its context and cause.
    pub fn new(context: Context, kind: ErrorKind) -> Error {
        Error { context, kind }
    }

    /// The operation that failed.
    #[inline]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The name of the method that failed.
    #[inline]
    pub fn method(&self) -> &'static str {
        self.context.method()
    }

    /// The selector of the handle the method was called on.
    #[inline]
    pub fn selector(&self) -> &str {
        self.context.selector()
    }

    /// Why the operation failed.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} failed: {}", self.context, self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Nested(inner) => Some(&**inner),
            _ => None,
        }
    }
}

impl From<Error> for JsValue {
    fn from(e: Error) -> JsValue {
        js_sys::Error::new(&e.to_string()).into()
    }
}

/// Decides what happens to a failed operation.
///
/// Returning `Err` propagates the error to the caller of the handle method
/// (or to whoever awaits the chain). Returning `Ok` absorbs it: the chain
/// carries on and the failed call yields an empty result.
pub trait ErrorHandler {
    /// Handle one failed operation.
    fn handle(&self, error: Error) -> Result<(), Error>;
}

/// The default handler: every error is returned to the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct Propagate;

impl ErrorHandler for Propagate {
    #[inline]
    fn handle(&self, error: Error) -> Result<(), Error> {
        Err(error)
    }
}

/// Log the error and keep going.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAndContinue;

impl ErrorHandler for LogAndContinue {
    fn handle(&self, err: Error) -> Result<(), Error> {
        error!("{}", err);
        Ok(())
    }
}

/// Any `Fn(&Error)` observes errors and absorbs them.
impl<F> ErrorHandler for F
where
    F: Fn(&Error),
{
    fn handle(&self, error: Error) -> Result<(), Error> {
        self(&error);
        Ok(())
    }
}
