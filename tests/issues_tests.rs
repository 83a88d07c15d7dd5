use kbd_check::document::dom_model::{DocumentMut, Rect, Viewport};
use kbd_check::document::snapshot::RawNode;
use kbd_check::inspect::identity::{markup_fingerprint, stable_id};
use kbd_check::inspect::inspect_model::{InspectOptions, Issue, NO_NAME};
use kbd_check::inspect::inspector::{collapse_whitespace, inspect, markup_preview};
use kbd_check::inspect::issues::{classify_issues, is_offscreen, is_tiny_target, is_unnamed};

mod common;
use common::fixtures::{button, page, sized};

fn viewport() -> Viewport {
    Viewport {
        width: 1000.0,
        height: 600.0,
        scroll_x: 0.0,
        scroll_y: 0.0,
    }
}

// ============================================================================
// Individual heuristics
// ============================================================================

#[test]
fn unnamed_detection() {
    assert!(is_unnamed(""));
    assert!(is_unnamed(NO_NAME));
    assert!(!is_unnamed("Save"));
}

#[test]
fn tiny_target_threshold() {
    assert!(is_tiny_target(&Rect::new(0.0, 0.0, 23.9, 40.0), 24.0));
    assert!(is_tiny_target(&Rect::new(0.0, 0.0, 40.0, 10.0), 24.0));
    assert!(!is_tiny_target(&Rect::new(0.0, 0.0, 24.0, 24.0), 24.0), "Exactly 24 is fine");
    assert!(is_tiny_target(&Rect::new(0.0, 0.0, 40.0, 40.0), 44.0));
}

#[test]
fn offscreen_on_any_side() {
    let vp = viewport();
    assert!(is_offscreen(&Rect::new(10.0, -50.0, 40.0, 40.0), &vp), "Above");
    assert!(is_offscreen(&Rect::new(-50.0, 10.0, 40.0, 40.0), &vp), "Left");
    assert!(is_offscreen(&Rect::new(10.0, 601.0, 40.0, 40.0), &vp), "Below");
    assert!(is_offscreen(&Rect::new(1001.0, 10.0, 40.0, 40.0), &vp), "Right");
    assert!(!is_offscreen(&Rect::new(-20.0, -20.0, 40.0, 40.0), &vp), "Partly visible");
    assert!(!is_offscreen(&Rect::new(10.0, 600.0, 40.0, 40.0), &vp), "Touching the edge");
}

#[test]
fn issues_accumulate_in_detection_order() {
    let issues = classify_issues(
        NO_NAME,
        Some(3),
        &Rect::new(10.0, 900.0, 10.0, 10.0),
        &viewport(),
        &InspectOptions::default(),
    );
    assert_eq!(
        issues,
        vec![Issue::NoName, Issue::PositiveTabindex, Issue::TinyTarget, Issue::Offscreen]
    );
    assert!(!issues.contains(&Issue::LowContrast));
}

#[test]
fn zero_and_negative_tabindex_are_not_positive() {
    let rect = Rect::new(10.0, 10.0, 100.0, 40.0);
    let opts = InspectOptions::default();
    assert!(classify_issues("Ok", Some(0), &rect, &viewport(), &opts).is_empty());
    assert!(classify_issues("Ok", None, &rect, &viewport(), &opts).is_empty());
}

#[test]
fn issue_tags_serialize_kebab_case() {
    assert_eq!(serde_json::to_string(&Issue::PositiveTabindex).unwrap(), "\"positive-tabindex\"");
    assert_eq!(Issue::TinyTarget.to_string(), "tiny-target");
    assert_eq!(Issue::LowContrast.as_str(), "low-contrast");
}

// ============================================================================
// Through a full inspection pass
// ============================================================================

#[test]
fn offscreen_follows_scroll_position() {
    let mut doc = page(vec![button("far", "Far away", 1500.0)]);

    let before = inspect(&doc, &InspectOptions::default());
    assert!(before.elements[0].has_issue(Issue::Offscreen));

    doc.scroll_to(0.0, 1200.0);
    let after = inspect(&doc, &InspectOptions::default());
    let el = &after.elements[0];
    assert!(!el.has_issue(Issue::Offscreen));
    assert_eq!(el.geometry.viewport.top(), 300.0);
    assert_eq!(el.geometry.page.top(), 1500.0, "Page geometry ignores scroll");
}

#[test]
fn tiny_target_threshold_is_configurable() {
    let doc = page(vec![button("b", "B", 10.0)]);
    let strict = InspectOptions {
        tiny_target_px: 44.0,
        ..InspectOptions::default()
    };
    assert!(inspect(&doc, &strict).elements[0].has_issue(Issue::TinyTarget));
    assert!(inspect(&doc, &InspectOptions::default()).elements[0].is_ok());
}

#[test]
fn low_contrast_is_never_reported() {
    let doc = page(vec![
        button("pale", "Pale", 10.0).opacity(0.05),
        sized(RawNode::element("a").attr("href", "/").attr("id", "faint"), 50.0).opacity(0.1),
    ]);
    let snapshot = inspect(&doc, &InspectOptions::default());
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.elements.iter().all(|e| !e.has_issue(Issue::LowContrast)));
}

// ============================================================================
// Identity and markup
// ============================================================================

#[test]
fn stable_id_shape_and_determinism() {
    let id = stable_id(0, "button", "<button id=\"save\">Save</button>");
    assert!(id.starts_with("kbd-0-button-"));
    assert_eq!(id.len(), "kbd-0-button-".len() + 8);
    assert_eq!(id, stable_id(0, "button", "<button id=\"save\">Save</button>"));
    assert_ne!(id, stable_id(1, "button", "<button id=\"save\">Save</button>"));
}

#[test]
fn stable_id_only_reads_the_markup_prefix() {
    // `<button id="save">` is 18 characters, so the prefix ends at "Sa".
    let a = stable_id(2, "button", "<button id=\"save\">Save draft</button>");
    let b = stable_id(2, "button", "<button id=\"save\">Sail away</button>");
    let c = stable_id(2, "button", "<button id=\"save\">Load</button>");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn fingerprint_is_sha1_hex() {
    assert_eq!(markup_fingerprint("abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
}

#[test]
fn stable_ids_survive_recompute_and_track_content() {
    let mut doc = page(vec![button("save", "Save", 10.0), button("load", "Load", 50.0)]);
    let first = inspect(&doc, &InspectOptions::default());
    let second = inspect(&doc, &InspectOptions::default());
    assert_eq!(first, second);

    let save = first.elements[0].handle;
    doc.set_text(save, "Discard");
    let third = inspect(&doc, &InspectOptions::default());
    assert_ne!(first.elements[0].stable_id, third.elements[0].stable_id);
    assert_eq!(first.elements[1].stable_id, third.elements[1].stable_id);
}

#[test]
fn markup_is_collapsed_and_previewed() {
    assert_eq!(collapse_whitespace("<a>\n   Home \t</a>"), "<a> Home </a>");

    let long = "x".repeat(100);
    let preview = markup_preview(&long);
    assert_eq!(preview.chars().count(), 71);
    assert!(preview.ends_with('\u{2026}'));

    let doc = page(vec![button("b", &"word ".repeat(200), 10.0)]);
    let el = &inspect(&doc, &InspectOptions::default()).elements[0];
    assert_eq!(el.markup.chars().count(), 400);
    assert!(el.markup.starts_with("<button id=\"b\">word word"));
}
