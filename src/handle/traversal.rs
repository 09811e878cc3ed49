use super::Handle;
use crate::error::{Error, ErrorKind};
use crate::queue::Execution;
use crate::resolve;
use crate::targets::{dedup_by, Cardinality, Targets};
use std::rc::Rc;
use web_sys::Element;

/// Walking to other elements. These run at once, even in a deferred chain,
/// and return new handles.
impl Handle {
    /// The parent element of each element.
    pub fn parent(&self) -> Result<Handle, Error> {
        let cardinality = self.cardinality();
        self.derive("parent", self.selector.clone(), cardinality, |targets| {
            Ok(match targets {
                Targets::Single(el) => Targets::Single(el.as_ref().and_then(|el| el.parent_element())),
                Targets::Many(els) => {
                    Targets::Many(dedup(els.iter().filter_map(|el| el.parent_element())))
                }
            })
        })
    }

    /// Every other child of each element's parent.
    pub fn siblings(&self) -> Result<Handle, Error> {
        self.derive("siblings", self.selector.clone(), Cardinality::Many, |targets| {
            Ok(Targets::Many(dedup(targets.iter().flat_map(siblings_of))))
        })
    }

    /// The nearest inclusive ancestor of each element that matches
    /// `sub_selector`.
    pub fn closest(&self, sub_selector: &str) -> Result<Handle, Error> {
        let cardinality = self.cardinality();
        self.derive("closest", sub_selector.into(), cardinality, |targets| {
            Ok(match targets {
                Targets::Single(None) => Targets::Single(None),
                Targets::Single(Some(el)) => Targets::Single(el.closest(sub_selector)?),
                Targets::Many(els) => {
                    let mut found = vec![];
                    for el in els {
                        found.extend(el.closest(sub_selector)?);
                    }
                    Targets::Many(dedup(found))
                }
            })
        })
    }

    /// Every descendant of the elements that matches `sub_selector`.
    pub fn find(&self, sub_selector: &str) -> Result<Handle, Error> {
        self.derive("find", sub_selector.into(), Cardinality::Many, |targets| {
            let mut found = vec![];
            for el in targets {
                found.extend(resolve::elements(&el.query_selector_all(sub_selector)?));
            }
            Ok(Targets::Many(dedup(found)))
        })
    }

    /// Call `f` with a single-element handle for each element, in order.
    ///
    /// The per-element handles always execute immediately. A failure returned
    /// by `f` is reported as a failure of `each`.
    pub fn each<F>(&self, mut f: F) -> Result<&Self, Error>
    where
        F: 'static + FnMut(&Handle) -> Result<(), Error>,
    {
        let dom = self.dom.clone();
        let selector: Rc<str> = self.selector.clone();
        self.fan_out("each", move |el| {
            let handle = Handle::with_execution(
                dom.clone(),
                selector.clone(),
                Targets::Single(Some(el.clone())),
                Execution::Immediate,
            );
            f(&handle).map_err(|e| ErrorKind::Nested(Box::new(e)))
        })
    }
}

fn siblings_of(el: &Element) -> Vec<Element> {
    let parent = match el.parent_element() {
        Some(parent) => parent,
        None => return vec![],
    };
    let children = parent.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .filter(|child| !child.is_same_node(Some(el.as_ref())))
        .collect()
}

fn dedup<I>(elements: I) -> Vec<Element>
where
    I: IntoIterator<Item = Element>,
{
    dedup_by(elements, |a, b| a.is_same_node(Some(b.as_ref())))
}
