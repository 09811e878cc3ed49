use super::*;
use domchain::{Cardinality, Error, ErrorKind, Execution, LogAndContinue, Mode, Targets};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn one_and_all_keep_their_cardinality() {
    fixture("chain-cardinality", "<p>a</p><p>b</p>");
    let dom = dom();

    let one = dom.one("#chain-cardinality p").unwrap();
    assert!(one.is_single());
    assert_eq!(one.cardinality(), Cardinality::Single);
    assert_eq!(one.len(), 1);
    assert_eq!(one.first().unwrap().text_content().unwrap(), "a");

    let all = dom.all("#chain-cardinality p").unwrap();
    assert!(!all.is_single());
    assert_eq!(all.len(), 2);

    let none = dom.one("#chain-cardinality span").unwrap();
    assert!(none.is_single());
    assert!(none.is_empty());
    assert!(matches!(none.raw(), Targets::Single(None)));

    let many_none = dom.all("#chain-cardinality span").unwrap();
    assert!(matches!(many_none.raw(), Targets::Many(els) if els.is_empty()));
}

#[wasm_bindgen_test]
fn operations_fan_out_in_document_order() {
    fixture("chain-order", "<i>1</i><i>2</i><i>3</i>");
    let seen = Rc::new(RefCell::new(vec![]));
    let seen2 = seen.clone();

    dom()
        .all("#chain-order i")
        .unwrap()
        .each(move |h| {
            seen2
                .borrow_mut()
                .push(h.first().unwrap().text_content().unwrap());
            Ok(())
        })
        .unwrap();

    assert_eq!(*seen.borrow(), vec!["1", "2", "3"]);
}

#[wasm_bindgen_test]
fn mutators_on_an_empty_handle_do_nothing() {
    fixture("chain-empty", "");
    let dom = dom();
    let missing = dom.one("#chain-empty .nope").unwrap();
    missing
        .add_class("x")
        .unwrap()
        .set("title", "t")
        .unwrap()
        .text("hello")
        .unwrap();
    assert!(missing.is_empty());
}

#[wasm_bindgen_test]
fn replacing_a_missing_element_fails_with_context() {
    fixture("chain-replace-missing", "<b>x</b>");
    let dom = dom();
    let replacement = dom.one("#chain-replace-missing b").unwrap();
    let e = dom
        .one("#chain-replace-missing .nope")
        .unwrap()
        .replace_with(&replacement, Mode::Move)
        .unwrap_err();
    assert_eq!(e.method(), "replace_with");
    assert_eq!(e.selector(), "#chain-replace-missing .nope");
    assert!(matches!(e.kind(), ErrorKind::MissingTarget));
}

#[wasm_bindgen_test]
fn mutators_return_the_same_handle() {
    fixture("chain-identity", "<ul><li>a</li></ul>");
    let list = dom().one("#chain-identity ul").unwrap();

    let returned = list.add_class("x").unwrap();
    assert!(std::ptr::eq(returned, &list));
    assert!(returned.same_handle(&list));

    let found = list.find("li").unwrap();
    assert!(!found.same_handle(&list));
    assert_eq!(found.selector(), "li");
}

#[wasm_bindgen_test]
fn class_then_toggle_leaves_no_class() {
    let root = fixture("chain-toggle", "<span></span><span></span>");
    dom()
        .all("#chain-toggle span")
        .unwrap()
        .add_class("hi")
        .unwrap()
        .toggle_class("hi")
        .unwrap()
        .set("data-k", "v")
        .unwrap();

    let spans = query_all("#chain-toggle span");
    assert_eq!(spans.len(), 2);
    for span in &spans {
        assert!(!has_class(span, "hi"));
        let html: &web_sys::HtmlElement = span.unchecked_ref();
        assert_eq!(html.dataset().get("k"), Some("v".to_string()));
    }
    root.remove();
}

#[wasm_bindgen_test]
fn attributes_and_data() {
    fixture("chain-attrs", "<input>");
    let input = dom().one("#chain-attrs input").unwrap();
    input
        .set("placeholder", "name")
        .unwrap()
        .toggle("disabled")
        .unwrap()
        .data("userId", "7")
        .unwrap();

    let el = query("#chain-attrs input");
    assert_eq!(el.get_attribute("placeholder").as_deref(), Some("name"));
    assert!(el.has_attribute("disabled"));
    assert_eq!(el.get_attribute("data-user-id").as_deref(), Some("7"));

    input.unset("placeholder").unwrap().toggle("disabled").unwrap();
    assert!(!el.has_attribute("placeholder"));
    assert!(!el.has_attribute("disabled"));
}

#[wasm_bindgen_test]
fn errors_are_annotated_and_handled() {
    fixture("chain-handler", "<p></p>");
    let seen = Rc::new(RefCell::new(vec![]));
    let seen2 = seen.clone();
    let dom = dom_with(Config::new().with_error_handler(move |e: &Error| {
        seen2
            .borrow_mut()
            .push((e.method().to_string(), e.selector().to_string()));
    }));

    let p = dom.one("#chain-handler p").unwrap();
    p.data("bad-key", "1").unwrap().add_class("after").unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![("data".to_string(), "#chain-handler p".to_string())]
    );
    assert!(has_class(&query("#chain-handler p"), "after"));
}

#[wasm_bindgen_test]
fn errors_propagate_by_default() {
    fixture("chain-propagate", "<p></p>");
    let e = dom()
        .one("#chain-propagate p")
        .unwrap()
        .data("bad-key", "1")
        .unwrap_err();
    assert_eq!(e.method(), "data");
    assert!(matches!(e.kind(), ErrorKind::InvalidDataKey(key) if key == "bad-key"));
}

#[wasm_bindgen_test]
fn invalid_selectors_go_through_the_handler() {
    let dom = dom_with(Config::new().with_error_handler(LogAndContinue));
    let handle = dom.all("##not a selector").unwrap();
    assert!(handle.is_empty());
    assert!(!handle.is_single());

    let e = super::dom().one("##not a selector").unwrap_err();
    assert_eq!(e.method(), "one");
    assert!(matches!(e.kind(), ErrorKind::Js(_)));
}

#[wasm_bindgen_test]
async fn deferred_chains_run_on_flush() {
    fixture("chain-deferred", "<p></p>");
    let dom = dom_with(Config::new().with_execution(Execution::Deferred));
    let p = dom.one("#chain-deferred p").unwrap();
    assert_eq!(p.execution(), Execution::Deferred);

    p.add_class("a").unwrap().text("queued").unwrap();
    assert_eq!(p.pending(), 2);
    let el = query("#chain-deferred p");
    assert!(!has_class(&el, "a"));
    assert_eq!(el.text_content().unwrap(), "");

    p.flush().await.unwrap();
    assert_eq!(p.pending(), 0);
    assert!(has_class(&el, "a"));
    assert_eq!(el.text_content().unwrap(), "queued");
}

#[wasm_bindgen_test]
async fn work_chained_during_a_flush_waits_for_the_next_one() {
    fixture("chain-reentrant", "<p></p>");
    let dom = dom_with(Config::new().with_execution(Execution::Deferred));
    let p = dom.one("#chain-reentrant p").unwrap();

    let inner = p.clone();
    p.each(move |_| {
        inner.add_class("later")?;
        Ok(())
    })
    .unwrap();

    p.flush().await.unwrap();
    let el = query("#chain-reentrant p");
    assert!(!has_class(&el, "later"));
    assert_eq!(p.pending(), 1);

    p.flush().await.unwrap();
    assert!(has_class(&el, "later"));
}

#[wasm_bindgen_test]
async fn deferred_failures_surface_from_flush() {
    fixture("chain-deferred-error", "<p></p>");
    let dom = dom_with(Config::new().with_execution(Execution::Deferred));
    let p = dom.one("#chain-deferred-error p").unwrap();
    p.data("Bad-key", "1").unwrap().add_class("skipped").unwrap();

    let e = p.flush().await.unwrap_err();
    assert_eq!(e.method(), "data");
    assert!(!has_class(&query("#chain-deferred-error p"), "skipped"));
}

#[wasm_bindgen_test]
fn wrap_uses_the_given_targets() {
    fixture("chain-wrap", "<em></em>");
    let el = query("#chain-wrap em");
    let handle = dom().wrap("em", Targets::Many(vec![el.clone()]));
    assert!(!handle.is_single());
    handle.add_class("wrapped").unwrap();
    assert!(has_class(&el, "wrapped"));
}

#[wasm_bindgen_test]
fn remove_class_only_touches_the_named_class() {
    fixture("chain-remove-class", "<p class='a b'></p><p class='b'></p>");
    dom()
        .all("#chain-remove-class p")
        .unwrap()
        .remove_class("b")
        .unwrap();
    let ps = query_all("#chain-remove-class p");
    assert_eq!(ps[0].class_name(), "a");
    assert_eq!(ps[1].class_name(), "");
}
