//! Chainable handles over one or many elements.

use crate::dom::Dom;
use crate::error::{Context, Error, ErrorKind};
use crate::logging::trace;
use crate::queue::{ChainExecutor, Execution, Job, Step};
use crate::targets::{Cardinality, Targets};
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use std::slice;
use web_sys::Element;

mod attributes;
mod content;
mod events;
mod insertion;
mod motion;
mod traversal;

/// One or many elements, and the chain of operations applied to them.
///
/// Every mutating method applies its operation to the single element or to
/// each element of the collection, and returns the same handle so calls can
/// be chained:
///
/// ```no_run
/// # fn main() -> Result<(), domchain::Error> {
/// let dom = domchain::Dom::new()?;
/// dom.all(".item")?
///     .add_class("selected")?
///     .set("aria-selected", "true")?
///     .css("backgroundColor", "gold")?;
/// # Ok(())
/// # }
/// ```
///
/// Methods that reach other elements (`parent`, `siblings`, `closest`,
/// `find`) return a new handle.
#[derive(Clone)]
pub struct Handle {
    dom: Dom,
    selector: Rc<str>,
    targets: Rc<Targets<Element>>,
    executor: ChainExecutor,
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Handle")
            .field("selector", &&*self.selector)
            .field("cardinality", &self.cardinality())
            .field("len", &self.len())
            .field("executor", &self.executor)
            .finish()
    }
}

impl Handle {
    pub(crate) fn new(dom: Dom, selector: Rc<str>, targets: Targets<Element>) -> Handle {
        let execution = dom.config().execution();
        Handle::with_execution(dom, selector, targets, execution)
    }

    pub(crate) fn with_execution(
        dom: Dom,
        selector: Rc<str>,
        targets: Targets<Element>,
        execution: Execution,
    ) -> Handle {
        let executor = ChainExecutor::new(execution, dom.config().error_handler().clone());
        Handle {
            dom,
            selector,
            targets: Rc::new(targets),
            executor,
        }
    }

    /// Does this handle address a single element (`$`) rather than a
    /// collection (`$$`)? Fixed for the handle's lifetime.
    #[inline]
    pub fn is_single(&self) -> bool {
        self.targets.is_single()
    }

    #[inline]
    pub fn cardinality(&self) -> Cardinality {
        self.targets.cardinality()
    }

    /// The underlying elements.
    #[inline]
    pub fn raw(&self) -> &Targets<Element> {
        &self.targets
    }

    /// The selector this handle was created from.
    #[inline]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[inline]
    pub fn first(&self) -> Option<&Element> {
        self.targets.first()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Element> {
        self.targets.iter()
    }

    #[inline]
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    #[inline]
    pub fn execution(&self) -> Execution {
        self.executor.execution()
    }

    /// Number of chained operations that have not run yet.
    #[inline]
    pub fn pending(&self) -> usize {
        self.executor.pending()
    }

    /// Is `other` this very handle, or a clone of it?
    #[inline]
    pub fn same_handle(&self, other: &Handle) -> bool {
        Rc::ptr_eq(&self.targets, &other.targets)
    }

    /// Run the operations queued so far (deferred execution), or wait for
    /// the chain to finish its suspended steps (immediate execution).
    pub async fn flush(&self) -> Result<(), Error> {
        self.executor.flush().await
    }

    /// Resolves when no step of this handle's chain is suspended.
    pub fn settled(&self) -> impl Future<Output = Result<(), Error>> {
        self.executor.settled()
    }

    #[inline]
    pub(crate) fn context(&self, method: &'static str) -> Context {
        Context::new(method, self.selector.clone())
    }

    /// Hand `op` to the chain, annotated with `method` and this handle's
    /// selector.
    pub(crate) fn dispatch<F>(&self, method: &'static str, op: F) -> Result<&Self, Error>
    where
        F: 'static + FnOnce(&Targets<Element>) -> Result<Step<ErrorKind>, ErrorKind>,
    {
        let context = self.context(method);
        let targets = self.targets.clone();
        trace!("Handle::dispatch: {}", context);
        let job: Job = Box::new(move || match op(&targets) {
            Ok(step) => {
                let context = context.clone();
                Ok(step.map_err(move |kind| Error::new(context, kind)))
            }
            Err(kind) => Err(Error::new(context, kind)),
        });
        self.executor.enqueue(job)?;
        Ok(self)
    }

    /// Dispatch `f` for every element.
    pub(crate) fn fan_out<F>(&self, method: &'static str, f: F) -> Result<&Self, Error>
    where
        F: 'static + FnMut(&Element) -> Result<(), ErrorKind>,
    {
        self.dispatch(method, move |targets| {
            targets.for_each(f)?;
            Ok(Step::Done)
        })
    }

    /// Build a new handle from this one's elements. Failures go through the
    /// error handler; if it absorbs them the new handle is empty.
    pub(crate) fn derive<F>(
        &self,
        method: &'static str,
        selector: Rc<str>,
        cardinality: Cardinality,
        find: F,
    ) -> Result<Handle, Error>
    where
        F: FnOnce(&Targets<Element>) -> Result<Targets<Element>, ErrorKind>,
    {
        let targets = match find(&self.targets) {
            Ok(targets) => targets,
            Err(kind) => {
                self.executor
                    .handler()
                    .handle(Error::new(self.context(method), kind))?;
                Targets::with_cardinality(cardinality, vec![])
            }
        };
        Ok(Handle::new(self.dom.clone(), selector, targets))
    }
}

impl<'a> IntoIterator for &'a Handle {
    type Item = &'a Element;
    type IntoIter = slice::Iter<'a, Element>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
