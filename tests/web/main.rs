//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

use domchain::{Config, Dom};
use log::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

pub mod chain;
pub mod insertion;

pub fn window() -> web_sys::Window {
    web_sys::window().expect("no global `window` exists")
}

pub fn document() -> web_sys::Document {
    window()
        .document()
        .expect("should have a document on window")
}

/// Ensure that logs go to the devtools console.
pub fn init_logging() {
    use std::sync::Once;
    static START: Once = Once::new();
    START.call_once(|| {
        console_log::init_with_level(Level::Trace).expect("could not initialize console_log");
    });
}

/// Attach a `<div id="{id}">` containing `html` to the document body.
///
/// Every test uses its own id and scopes its selectors under it, since the
/// fixtures of earlier tests stay in the document.
pub fn fixture(id: &str, html: &str) -> web_sys::Element {
    init_logging();
    let container = document()
        .create_element("div")
        .expect("should create element OK");
    container.set_id(id);
    container.set_inner_html(html);
    document()
        .body()
        .expect("should have a body")
        .append_child(&container)
        .expect("should append child OK");
    debug!("fixture #{}: {}", id, html);
    container
}

pub fn dom() -> Dom {
    init_logging();
    Dom::new().expect("should have a document")
}

pub fn dom_with(config: Config) -> Dom {
    init_logging();
    Dom::with_config(config).expect("should have a document")
}

pub fn query(selector: &str) -> web_sys::Element {
    document()
        .query_selector(selector)
        .expect("should querySelector OK")
        .unwrap_or_else(|| panic!("should find `{}`", selector))
}

pub fn query_all(selector: &str) -> Vec<web_sys::Element> {
    let list = document()
        .query_selector_all(selector)
        .expect("should querySelectorAll OK");
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|node| node.unchecked_into())
        .collect()
}

pub fn has_class(el: &web_sys::Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// The `outerHTML` of every child element of the element matching
/// `selector`, for compact structural assertions.
pub fn children_html(selector: &str) -> Vec<String> {
    let parent = query(selector);
    let children = parent.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .map(|el| el.outer_html())
        .collect()
}
