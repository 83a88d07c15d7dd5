use kbd_check::document::snapshot::RawNode;
use kbd_check::overlay::console::format_console_panel;
use kbd_check::overlay::controller::{OverlayConfig, OverlayController};
use kbd_check::overlay::frame::OverlayFrame;
use kbd_check::overlay::host::{HostEvent, RecordingHost};
use kbd_check::overlay::html::{render_html_report, render_overlay_html};
use kbd_check::trace::logger::TraceLogger;
use kbd_check::document::dom_model::Document;
use kbd_check::document::snapshot::DomSnapshot;

mod common;
use common::fixtures::{button, mixed_order_page, page, page_with, sized};

fn frame_for(mut doc: DomSnapshot) -> OverlayFrame {
    let mut host = RecordingHost::new();
    let mut ctl = OverlayController::new(OverlayConfig::default(), TraceLogger::disabled());
    ctl.mount(&mut doc, &mut host);
    ctl.enable(&doc, &mut host);
    let home = doc.element_by_id("home");
    if let Some(home) = home {
        ctl.handle_event(&HostEvent::FocusIn(home), &doc, &mut host);
    }
    ctl.render(&doc).unwrap()
}

// ============================================================================
// Frame model
// ============================================================================

#[test]
fn frame_has_one_badge_box_and_row_per_element() {
    let frame = frame_for(mixed_order_page());

    assert_eq!(frame.element_count, 4);
    assert_eq!(frame.badges.len(), 4);
    assert_eq!(frame.boxes.len(), 4);
    assert_eq!(frame.rows.len(), 4);

    let orders: Vec<usize> = frame.badges.iter().map(|b| b.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4]);
    for (badge, row) in frame.badges.iter().zip(&frame.rows) {
        assert_eq!(badge.key, row.key);
    }
    assert_eq!(frame.boxes[0].key, format!("{}-box", frame.rows[0].key));
}

#[test]
fn badge_sits_above_left_and_is_clamped() {
    let doc = page(vec![
        sized(RawNode::element("button").attr("id", "corner"), 0.0).rect(4.0, 4.0, 40.0, 40.0).text_child("C"),
        button("mid", "M", 100.0),
    ]);
    let frame = frame_for(doc);

    assert_eq!((frame.badges[0].top, frame.badges[0].left), (0.0, 0.0));
    assert_eq!((frame.badges[1].top, frame.badges[1].left), (92.0, 2.0));
    assert_eq!(frame.boxes[1].width, 120.0);
    assert_eq!(frame.boxes[1].height, 32.0);
}

#[test]
fn rows_carry_table_columns() {
    let frame = frame_for(mixed_order_page());

    let input = &frame.rows[0];
    assert_eq!(input.role, "textbox");
    assert_eq!(input.name, "(no name)");
    assert_eq!(input.tab_index, "5");
    assert_eq!(input.issues, vec!["no-name", "positive-tabindex"]);

    let home = &frame.rows[1];
    assert_eq!(home.tab_index, "none");
    assert!(home.issues.is_empty());
    assert!(home.snippet.starts_with("<a href=\"/home\" id=\"home\">Home</a>"));
    assert!(home.snippet.ends_with('\u{2026}'));

    assert_eq!(frame.rows[3].tab_index, "0");
    assert_eq!(frame.focus_trail, vec!["a#home [link] \"Home\""]);
}

#[test]
fn frame_serializes_without_theme_field() {
    let frame = frame_for(mixed_order_page());
    let json = serde_json::to_value(&frame).unwrap();
    assert!(json.get("theme").is_none());
    assert_eq!(json["dark"], false);
    assert_eq!(json["rows"][0]["order"], 1);
}

// ============================================================================
// HTML overlay
// ============================================================================

#[test]
fn overlay_html_is_presentational() {
    let html = render_overlay_html(&frame_for(mixed_order_page()));

    assert_eq!(html.matches("class=\"kbd-badge\"").count(), 4);
    assert_eq!(html.matches("class=\"kbd-box\"").count(), 4);
    assert_eq!(html.matches("aria-hidden=\"true\"").count(), 8);
    assert_eq!(html.matches("pointer-events:none").count(), 8);
    assert!(html.contains("border:2px dashed"));
    assert!(!html.contains("tabindex=\""), "Overlay markup never joins the tab order");
}

#[test]
fn panel_lists_rows_and_footer() {
    let html = render_overlay_html(&frame_for(mixed_order_page()));

    assert!(html.contains("role=\"region\""));
    assert!(html.contains("Keyboard navigation – 4 elements"));
    assert!(html.contains("Toggle: Ctrl+Alt+K"));
    assert_eq!(html.matches("class=\"kbd-ok\"").count(), 2);
    assert_eq!(html.matches("class=\"kbd-issue\"").count(), 3);
    assert!(html.contains("a#home [link] &quot;Home&quot;"));
    assert!(html.contains("title=\"&lt;a href=&quot;/home&quot; id=&quot;home&quot;&gt;Home&lt;/a&gt;\""));
}

#[test]
fn page_content_is_escaped() {
    let doc = page(vec![button("x", "", 10.0).attr("aria-label", "<script>alert('x')</script>")]);
    let html = render_overlay_html(&frame_for(doc));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
}

#[test]
fn dark_theme_switches_palette() {
    let light = render_overlay_html(&frame_for(mixed_order_page()));
    assert!(light.contains("#0d9488"));
    assert!(!light.contains("#fde047"));

    let dark_doc = page_with(None, Some("dark"), vec![button("b", "B", 10.0)]);
    let dark_frame = frame_for(dark_doc);
    assert!(dark_frame.dark);
    let dark = render_overlay_html(&dark_frame);
    assert!(dark.contains("#fde047"));
    assert!(dark.contains("rgba(17,24,39,0.95)"));
}

#[test]
fn html_report_is_a_standalone_page() {
    let report = render_html_report(&frame_for(mixed_order_page()), "Shop & Co");
    assert!(report.starts_with("<!DOCTYPE html>"));
    assert!(report.contains("<title>Shop &amp; Co — Keyboard Navigation Check</title>"));
    assert!(report.contains("class=\"kbd-panel\""));
    assert!(!report.contains("kbd-badge"));
}

// ============================================================================
// Console panel
// ============================================================================

#[test]
fn console_panel_lists_every_row() {
    let out = format_console_panel(&frame_for(mixed_order_page()));

    assert!(out.starts_with("=== Keyboard navigation: 4 elements (toggle: Ctrl+Alt+K) ==="));
    assert!(out.contains("  #1  textbox  \"(no name)\"  tabindex=5  [no-name, positive-tabindex]"));
    assert!(out.contains("  #2  link  \"Home\"  tabindex=none  [ok]"));
    assert!(out.contains("  #3  button  \"(no name)\"  tabindex=none  [no-name]"));
    assert!(out.contains("  #4  div  \"Panel\"  tabindex=0  [ok]"));
    assert!(out.ends_with("Focus path: a#home [link] \"Home\"\n"));
}

#[test]
fn console_panel_for_empty_page() {
    let out = format_console_panel(&frame_for(page(vec![])));
    assert!(out.contains("0 elements"));
    assert!(out.contains("(no tabbable elements)"));
    assert!(out.ends_with("Focus path: \u{2013}\n"));
}
