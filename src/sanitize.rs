//! Safe HTML insertion.
//!
//! Prefers the host's `Element.setHTML`, which runs the browser's own
//! sanitizer. Where that is missing, the markup is parsed into an inert
//! `<template>` and cleaned before it is moved into the element.

use crate::resolve;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DocumentFragment, Element, HtmlTemplateElement};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = Element)]
    type SanitizingElement;

    #[wasm_bindgen(method, catch, js_name = setHTML)]
    fn set_html(this: &SanitizingElement, html: &str) -> Result<(), JsValue>;
}

const FORBIDDEN_ELEMENTS: &[&str] = &[
    "base", "embed", "frame", "frameset", "iframe", "link", "meta", "noscript", "object", "script",
    "template",
];

const URL_ATTRIBUTES: &[&str] = &[
    "action",
    "background",
    "formaction",
    "href",
    "poster",
    "src",
    "xlink:href",
];

/// Replace the children of `element` with the sanitized content of `html`.
pub(crate) fn set_html(element: &Element, html: &str) -> Result<(), JsValue> {
    if host_sanitizes(element) {
        return element.unchecked_ref::<SanitizingElement>().set_html(html);
    }

    let document = element
        .owner_document()
        .ok_or_else(|| JsValue::from_str("element has no owner document"))?;
    let template: HtmlTemplateElement = document.create_element("template")?.unchecked_into();
    template.set_inner_html(html);
    let content = template.content();
    clean(&content)?;

    element.set_inner_html("");
    element.append_with_node_1(&content)?;
    Ok(())
}

fn host_sanitizes(element: &Element) -> bool {
    js_sys::Reflect::has(element.as_ref(), &JsValue::from_str("setHTML")).unwrap_or(false)
}

fn clean(fragment: &DocumentFragment) -> Result<(), JsValue> {
    let all = fragment.query_selector_all("*")?;
    for el in resolve::elements(&all) {
        if is_forbidden_element(&el.local_name()) {
            el.remove();
            continue;
        }
        for name in el.get_attribute_names().iter() {
            let name = match name.as_string() {
                Some(name) => name,
                None => continue,
            };
            let value = el.get_attribute(&name).unwrap_or_default();
            if is_unsafe_attribute(&name, &value) {
                el.remove_attribute(&name)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn is_forbidden_element(local_name: &str) -> bool {
    FORBIDDEN_ELEMENTS
        .iter()
        .any(|forbidden| forbidden.eq_ignore_ascii_case(local_name))
}

pub(crate) fn is_unsafe_attribute(name: &str, value: &str) -> bool {
    let name = name.to_ascii_lowercase();
    if name.starts_with("on") || name == "srcdoc" {
        return true;
    }
    URL_ATTRIBUTES.contains(&name.as_str()) && is_script_url(value)
}

// Browsers ignore embedded whitespace and control characters in the scheme.
fn is_script_url(value: &str) -> bool {
    let scheme: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    scheme.starts_with("javascript:")
        || scheme.starts_with("vbscript:")
        || scheme.starts_with("data:text/html")
}
