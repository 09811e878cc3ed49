use crate::error::ErrorKind;
use crate::sanitize;
use crate::targets::{Cardinality, Targets};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlTemplateElement, NodeList};

/// Something that resolves to DOM elements.
///
/// Strings convert automatically: if the trimmed string starts with `<` it is
/// markup, otherwise it is a CSS selector.
#[derive(Clone, Debug)]
pub enum Source {
    /// A CSS selector, matched against the document.
    Query(String),
    /// An HTML fragment, parsed into a detached element.
    Markup(String),
    /// An element that is used as-is.
    Element(Element),
}

/// Does `s` look like an HTML fragment rather than a selector?
#[inline]
pub fn looks_like_markup(s: &str) -> bool {
    s.trim_start().starts_with('<')
}

impl Source {
    /// The text handles created from this source report as their selector.
    pub(crate) fn describe(&self) -> String {
        match self {
            Source::Query(selector) => selector.clone(),
            Source::Markup(html) => html.trim().to_string(),
            Source::Element(el) => el.tag_name().to_ascii_lowercase(),
        }
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Source {
        if looks_like_markup(s) {
            Source::Markup(s.to_string())
        } else {
            Source::Query(s.to_string())
        }
    }
}

impl From<String> for Source {
    fn from(s: String) -> Source {
        if looks_like_markup(&s) {
            Source::Markup(s)
        } else {
            Source::Query(s)
        }
    }
}

impl From<&String> for Source {
    #[inline]
    fn from(s: &String) -> Source {
        Source::from(s.as_str())
    }
}

impl From<Element> for Source {
    #[inline]
    fn from(el: Element) -> Source {
        Source::Element(el)
    }
}

impl From<&Element> for Source {
    #[inline]
    fn from(el: &Element) -> Source {
        Source::Element(el.clone())
    }
}

/// Resolve to at most one element. A selector that matches nothing, or markup
/// without any element in it, resolves to `None`.
pub(crate) fn resolve_one(
    document: &Document,
    source: &Source,
    sanitize: bool,
) -> Result<Option<Element>, ErrorKind> {
    match source {
        Source::Query(selector) => Ok(document.query_selector(selector)?),
        Source::Markup(html) => parse_fragment(document, html, sanitize),
        Source::Element(el) => Ok(Some(el.clone())),
    }
}

/// Resolve to every matching element, in document order.
pub(crate) fn resolve_all(
    document: &Document,
    source: &Source,
    sanitize: bool,
) -> Result<Vec<Element>, ErrorKind> {
    match source {
        Source::Query(selector) => Ok(elements(&document.query_selector_all(selector)?)),
        _ => Ok(resolve_one(document, source, sanitize)?.into_iter().collect()),
    }
}

pub(crate) fn resolve(
    document: &Document,
    source: &Source,
    cardinality: Cardinality,
    sanitize: bool,
) -> Result<Targets<Element>, ErrorKind> {
    Ok(match cardinality {
        Cardinality::Single => Targets::Single(resolve_one(document, source, sanitize)?),
        Cardinality::Many => Targets::Many(resolve_all(document, source, sanitize)?),
    })
}

/// The elements of a `NodeList`, skipping text and comment nodes.
pub(crate) fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Parse `html` into a detached subtree and return its first element.
///
/// The unsanitized path parses into an inert `<template>` so that nothing in
/// the fragment loads or runs before it is inserted.
pub(crate) fn parse_fragment(
    document: &Document,
    html: &str,
    sanitize: bool,
) -> Result<Option<Element>, ErrorKind> {
    if sanitize {
        let div = document.create_element("div")?;
        sanitize::set_html(&div, html)?;
        Ok(div.first_element_child())
    } else {
        let template: HtmlTemplateElement = document.create_element("template")?.unchecked_into();
        template.set_inner_html(html);
        Ok(template.content().first_element_child())
    }
}
