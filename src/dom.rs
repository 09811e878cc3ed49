use crate::config::Config;
use crate::error::{Context, Error, ErrorKind};
use crate::events::ListenerRegistry;
use crate::handle::Handle;
use crate::logging::debug;
use crate::resolve::{self, Source};
use crate::targets::{Cardinality, Targets};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use web_sys::{Document, Element};

/// The entry point: a document plus the settings its handles share.
///
/// Cloning a `Dom` is cheap and yields the same context.
#[derive(Clone)]
pub struct Dom {
    inner: Rc<DomInner>,
}

struct DomInner {
    document: Document,
    config: Config,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

impl fmt::Debug for Dom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Dom")
            .field("config", &self.inner.config)
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl Dom {
    /// A context for the current window's document with the default
    /// configuration.
    pub fn new() -> Result<Dom, Error> {
        Dom::with_config(Config::default())
    }

    /// A context for the current window's document.
    pub fn with_config(config: Config) -> Result<Dom, Error> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| Error::new(Context::new("new", ""), ErrorKind::NoDocument))?;
        Ok(Dom::from_document(document, config))
    }

    /// A context for an arbitrary document.
    pub fn from_document(document: Document, config: Config) -> Dom {
        Dom {
            inner: Rc::new(DomInner {
                document,
                config,
                listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
            }),
        }
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Number of `(listener, event, element)` attachments currently kept
    /// alive by this context.
    pub fn attached_listeners(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    #[inline]
    pub(crate) fn listeners(&self) -> &Rc<RefCell<ListenerRegistry>> {
        &self.inner.listeners
    }

    /// Wrap the first element matching `source` (`$`).
    ///
    /// A selector that matches nothing is not an error: the handle's `raw()`
    /// is `Targets::Single(None)`.
    pub fn one(&self, source: impl Into<Source>) -> Result<Handle, Error> {
        self.lookup("one", source.into(), Cardinality::Single)
    }

    /// Wrap every element matching `source` (`$$`).
    pub fn all(&self, source: impl Into<Source>) -> Result<Handle, Error> {
        self.lookup("all", source.into(), Cardinality::Many)
    }

    /// Wrap already-resolved elements. The cardinality of the handle is the
    /// variant of `targets`; `selector` is what errors will report.
    pub fn wrap(&self, selector: impl Into<Rc<str>>, targets: Targets<Element>) -> Handle {
        Handle::new(self.clone(), selector.into(), targets)
    }

    fn lookup(
        &self,
        method: &'static str,
        source: Source,
        cardinality: Cardinality,
    ) -> Result<Handle, Error> {
        let selector: Rc<str> = source.describe().into();
        debug!("Dom::{}: resolving {:?}", method, &*selector);
        match resolve::resolve(self.document(), &source, cardinality, true) {
            Ok(targets) => Ok(self.wrap(selector, targets)),
            Err(kind) => {
                let e = Error::new(Context::new(method, selector.clone()), kind);
                self.config().error_handler().handle(e)?;
                Ok(self.wrap(selector, Targets::with_cardinality(cardinality, vec![])))
            }
        }
    }

    /// Append a `<style>` element with `rules` to the document's `<head>`.
    pub fn add_style_sheet(&self, rules: &str) -> Result<(), Error> {
        match add_style_sheet(self.document(), rules) {
            Ok(()) => Ok(()),
            Err(kind) => {
                let e = Error::new(Context::new("add_style_sheet", ""), kind);
                self.config().error_handler().handle(e)
            }
        }
    }
}

pub(crate) fn add_style_sheet(document: &Document, rules: &str) -> Result<(), ErrorKind> {
    let style = document.create_element("style")?;
    style.set_text_content(Some(rules));
    let head = document.head().ok_or(ErrorKind::MissingTarget)?;
    head.append_with_node_1(&style)?;
    Ok(())
}
