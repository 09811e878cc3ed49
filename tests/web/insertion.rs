use super::*;
use domchain::{ErrorKind, Mode, Options, Position, Source};
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn append_markup_selectors_and_elements() {
    fixture(
        "insert-append",
        "<ul class='list'><li>0</li></ul><li class='loose'>moved</li>",
    );
    let dom = dom();
    let extra = document().create_element("li").unwrap();
    extra.set_text_content(Some("element"));

    dom.one("#insert-append .list")
        .unwrap()
        .append(vec![
            Source::from("<li>1</li>"),
            Source::from("#insert-append .loose"),
            Source::from(extra),
        ])
        .unwrap();

    assert_eq!(
        children_html("#insert-append .list"),
        vec![
            "<li>0</li>",
            "<li>1</li>",
            "<li class=\"loose\">moved</li>",
            "<li>element</li>",
        ]
    );
}

#[wasm_bindgen_test]
fn prepend_keeps_argument_order() {
    fixture("insert-prepend", "<ol><li>c</li></ol>");
    dom()
        .one("#insert-prepend ol")
        .unwrap()
        .prepend(vec!["<li>a</li>", "<li>b</li>"])
        .unwrap();
    assert_eq!(
        children_html("#insert-prepend ol"),
        vec!["<li>a</li>", "<li>b</li>", "<li>c</li>"]
    );
}

#[wasm_bindgen_test]
fn append_sanitizes_unless_told_not_to() {
    fixture("insert-sanitize", "<div class='safe'></div><div class='raw'></div>");
    let dom = dom();
    dom.one("#insert-sanitize .safe")
        .unwrap()
        .append(vec!["<p onclick='alert(1)'>hi</p>"])
        .unwrap();
    dom.one("#insert-sanitize .raw")
        .unwrap()
        .append_with(
            vec!["<p onclick='alert(1)'>hi</p>"],
            Options {
                sanitize: false,
                ..Options::default()
            },
        )
        .unwrap();

    let safe = query("#insert-sanitize .safe p");
    assert!(!safe.has_attribute("onclick"));
    let raw = query("#insert-sanitize .raw p");
    assert!(raw.has_attribute("onclick"));
}

#[wasm_bindgen_test]
fn move_to_relocates_elements() {
    fixture(
        "insert-move",
        "<div class='from'><span>1</span><span>2</span></div><div class='to'><em></em></div>",
    );
    dom()
        .all("#insert-move .from span")
        .unwrap()
        .move_to("#insert-move .to", Options::default())
        .unwrap();

    assert!(children_html("#insert-move .from").is_empty());
    assert_eq!(
        children_html("#insert-move .to"),
        vec!["<em></em>", "<span>1</span>", "<span>2</span>"]
    );
}

#[wasm_bindgen_test]
fn clone_to_every_destination_at_a_position() {
    fixture(
        "insert-clone",
        "<b>x</b><section><hr class='d'></section><section><hr class='d'></section>",
    );
    dom()
        .one("#insert-clone b")
        .unwrap()
        .clone_to(
            "#insert-clone .d",
            Options {
                position: Position::Before,
                all: true,
                ..Options::default()
            },
        )
        .unwrap();

    assert_eq!(query_all("#insert-clone b").len(), 3);
    for section in query_all("#insert-clone section") {
        let first = section.first_element_child().unwrap();
        assert_eq!(first.outer_html(), "<b>x</b>");
    }
}

#[wasm_bindgen_test]
fn clone_to_after_the_first_destination_only() {
    fixture("insert-after", "<i>y</i><p class='d'></p><p class='d'></p>");
    dom()
        .one("#insert-after i")
        .unwrap()
        .clone_to(
            "#insert-after .d",
            Options {
                position: Position::After,
                ..Options::default()
            },
        )
        .unwrap();

    assert_eq!(
        children_html("#insert-after"),
        vec![
            "<i>y</i>",
            "<p class=\"d\"></p>",
            "<i>y</i>",
            "<p class=\"d\"></p>",
        ]
    );
}

#[wasm_bindgen_test]
fn replace_single_with_all_replacements() {
    fixture(
        "insert-replace-one",
        "<div class='old'></div><template></template><a>1</a><a>2</a>",
    );
    let dom = dom();
    let replacements = dom.all("#insert-replace-one a").unwrap();
    dom.one("#insert-replace-one .old")
        .unwrap()
        .replace_with(&replacements, Mode::Clone)
        .unwrap();

    assert_eq!(
        children_html("#insert-replace-one"),
        vec![
            "<a>1</a>",
            "<a>2</a>",
            "<template></template>",
            "<a>1</a>",
            "<a>2</a>",
        ]
    );
}

#[wasm_bindgen_test]
fn replace_many_pairwise() {
    fixture(
        "insert-replace-many",
        "<p>a</p><p>b</p><div><i>1</i><i>2</i></div>",
    );
    let dom = dom();
    let replacements = dom.all("#insert-replace-many i").unwrap();
    dom.all("#insert-replace-many > p")
        .unwrap()
        .replace_with(&replacements, Mode::Move)
        .unwrap();

    assert_eq!(
        children_html("#insert-replace-many"),
        vec!["<i>1</i>", "<i>2</i>", "<div></div>"]
    );
}

#[wasm_bindgen_test]
fn replace_many_runs_out_of_replacements() {
    fixture("insert-replace-short", "<p>a</p><p>b</p><i>1</i>");
    let dom = dom();
    let replacements = dom.all("#insert-replace-short i").unwrap();
    let e = dom
        .all("#insert-replace-short p")
        .unwrap()
        .replace_with(&replacements, Mode::Clone)
        .unwrap_err();
    assert!(matches!(e.kind(), ErrorKind::MissingReplacement { index: 1 }));
    assert_eq!(
        children_html("#insert-replace-short"),
        vec!["<i>1</i>", "<p>b</p>", "<i>1</i>"]
    );
}

#[wasm_bindgen_test]
fn remove_detaches() {
    fixture("insert-remove", "<p>a</p><p>b</p><span></span>");
    let ps = dom().all("#insert-remove p").unwrap();
    ps.remove().unwrap();
    assert_eq!(children_html("#insert-remove"), vec!["<span></span>"]);
    // The handle still holds the detached elements.
    assert_eq!(ps.len(), 2);
    assert!(ps.first().unwrap().parent_element().is_none());
}
