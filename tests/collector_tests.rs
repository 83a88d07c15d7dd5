use kbd_check::document::dom_model::Document;
use kbd_check::document::snapshot::RawNode;
use kbd_check::inspect::collector::{collect_tabbables, effective_tab_index, parse_tab_index};
use kbd_check::inspect::inspect_model::InspectOptions;
use kbd_check::inspect::inspector::inspect;

mod common;
use common::fixtures::{button, link, page, sized};

fn collected_ids(doc: &kbd_check::document::snapshot::DomSnapshot) -> Vec<String> {
    inspect(doc, &InspectOptions::default())
        .elements
        .iter()
        .map(|e| doc.attribute(e.handle, "id").unwrap_or("?").to_string())
        .collect()
}

// ============================================================================
// Candidate matching
// ============================================================================

#[test]
fn native_controls_are_collected() {
    let doc = page(vec![
        link("a1", "/x", "Link", 10.0),
        button("b1", "Button", 50.0),
        sized(RawNode::element("input").attr("id", "i1"), 90.0),
        sized(RawNode::element("select").attr("id", "s1"), 130.0),
        sized(RawNode::element("textarea").attr("id", "t1"), 170.0),
        sized(RawNode::element("div").attr("id", "d1").attr("tabindex", "0"), 210.0),
    ]);
    assert_eq!(collected_ids(&doc), vec!["a1", "b1", "i1", "s1", "t1", "d1"]);
}

#[test]
fn anchor_without_href_is_skipped() {
    let doc = page(vec![
        sized(RawNode::element("a").attr("id", "bare"), 10.0).text_child("Nowhere"),
        link("real", "#top", "Top", 50.0),
    ]);
    assert_eq!(collected_ids(&doc), vec!["real"]);
}

#[test]
fn hidden_inputs_are_skipped_case_insensitively() {
    let doc = page(vec![
        sized(RawNode::element("input").attr("id", "h1").attr("type", "hidden"), 10.0),
        sized(RawNode::element("input").attr("id", "h2").attr("type", "HIDDEN"), 50.0),
        sized(RawNode::element("input").attr("id", "shown").attr("type", "text"), 90.0),
    ]);
    assert_eq!(collected_ids(&doc), vec!["shown"]);
}

#[test]
fn disabled_controls_are_skipped() {
    let doc = page(vec![
        button("off", "Off", 10.0).attr("disabled", ""),
        button("on", "On", 50.0),
    ]);
    assert_eq!(collected_ids(&doc), vec!["on"]);
}

#[test]
fn negative_tabindex_is_skipped() {
    let doc = page(vec![
        button("minus", "Minus", 10.0).attr("tabindex", "-1"),
        sized(RawNode::element("div").attr("id", "div-minus").attr("tabindex", "-1"), 50.0),
        button("plain", "Plain", 90.0),
    ]);
    assert_eq!(collected_ids(&doc), vec!["plain"]);
}

#[test]
fn invalid_tabindex_falls_back_to_native_focusability() {
    let doc = page(vec![
        sized(RawNode::element("div").attr("id", "junk-div").attr("tabindex", "abc"), 10.0),
        button("junk-button", "Junk", 50.0).attr("tabindex", "abc"),
    ]);

    let snapshot = inspect(&doc, &InspectOptions::default());
    assert_eq!(snapshot.len(), 1, "div with junk tabindex is not focusable");
    let el = &snapshot.elements[0];
    assert_eq!(el.tab_index, 0);
    assert_eq!(el.explicit_tab_index, None);
}

#[test]
fn tab_index_label_keeps_authored_text() {
    let doc = page(vec![
        button("junk", "Junk", 10.0).attr("tabindex", "abc"),
        button("suffixed", "Suffixed", 50.0).attr("tabindex", "2x"),
        button("plain", "Plain", 90.0),
    ]);

    let snapshot = inspect(&doc, &InspectOptions::default());
    let rows: Vec<(String, Option<i32>, String)> = snapshot
        .elements
        .iter()
        .map(|e| (e.name.clone(), e.explicit_tab_index, e.explicit_tab_index_label()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Suffixed".to_string(), Some(2), "2x".to_string()),
            ("Junk".to_string(), None, "abc".to_string()),
            ("Plain".to_string(), None, "none".to_string()),
        ]
    );
}

#[test]
fn ignore_attribute_excludes_subtree_and_self() {
    let doc = page(vec![
        sized(RawNode::element("div").attr("data-kbdcheck-ignore", ""), 0.0)
            .child(button("nested", "Nested", 10.0)),
        button("self", "Self", 50.0).attr("data-kbdcheck-ignore", "true"),
        button("kept", "Kept", 90.0),
    ]);
    assert_eq!(collected_ids(&doc), vec!["kept"]);
}

#[test]
fn custom_ignore_attribute() {
    let doc = page(vec![
        button("a", "A", 10.0).attr("data-devtools", ""),
        button("b", "B", 50.0).attr("data-kbdcheck-ignore", ""),
    ]);
    let options = InspectOptions {
        ignore_attribute: "data-devtools".into(),
        ..InspectOptions::default()
    };
    let snapshot = inspect(&doc, &options);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(doc.attribute(snapshot.elements[0].handle, "id"), Some("b"));
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn invisible_elements_are_skipped() {
    let doc = page(vec![
        button("none", "None", 10.0).display("none"),
        button("hidden-vis", "Hidden", 50.0).visibility("hidden"),
        button("hidden-attr", "Attr", 90.0).attr("hidden", ""),
        button("transparent", "Clear", 130.0).opacity(0.0),
        RawNode::element("button").attr("id", "zero").text_child("Zero"),
        button("visible", "Visible", 170.0).opacity(0.2),
    ]);
    assert_eq!(collected_ids(&doc), vec!["visible"]);
}

#[test]
fn opacity_zero_never_appears() {
    let doc = page(vec![
        link("a", "/a", "A", 10.0).opacity(0.0),
        sized(RawNode::element("div").attr("id", "d").attr("tabindex", "3"), 50.0).opacity(0.0),
        button("b", "B", 90.0).opacity(0.0),
    ]);
    assert!(inspect(&doc, &InspectOptions::default()).is_empty());
}

// ============================================================================
// tabindex parsing
// ============================================================================

#[test]
fn parse_tab_index_follows_html_integer_rules() {
    assert_eq!(parse_tab_index("0"), Some(0));
    assert_eq!(parse_tab_index("5"), Some(5));
    assert_eq!(parse_tab_index("  7"), Some(7));
    assert_eq!(parse_tab_index("-1"), Some(-1));
    assert_eq!(parse_tab_index("+2"), Some(2));
    assert_eq!(parse_tab_index("3px"), Some(3), "Trailing garbage ignored");
    assert_eq!(parse_tab_index(""), None);
    assert_eq!(parse_tab_index("abc"), None);
    assert_eq!(parse_tab_index("-"), None);
    assert_eq!(parse_tab_index("99999999999"), None, "Out of range");
}

#[test]
fn effective_tab_index_defaults() {
    let doc = page(vec![
        button("b", "B", 10.0),
        sized(RawNode::element("span").attr("id", "s"), 50.0),
        sized(RawNode::element("span").attr("id", "t").attr("tabindex", "4"), 90.0),
    ]);
    let id = |s: &str| doc.element_by_id(s).unwrap();

    assert_eq!(effective_tab_index(&doc, id("b")), Some(0));
    assert_eq!(effective_tab_index(&doc, id("s")), Some(-1));
    assert_eq!(effective_tab_index(&doc, id("t")), Some(4));
}

#[test]
fn candidates_record_encounter_order() {
    let doc = page(vec![
        button("first", "1", 10.0).display("none"),
        button("second", "2", 50.0),
        button("third", "3", 90.0).attr("tabindex", ""),
    ]);
    let body = doc.body().unwrap();
    let candidates = collect_tabbables(&doc, body, &InspectOptions::default());

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].encounter, 0);
    assert_eq!(candidates[1].encounter, 1);
    assert!(!candidates[1].has_tab_index_attr, "Empty tabindex counts as unset");
    assert_eq!(candidates[1].order_key(), 0);
}
