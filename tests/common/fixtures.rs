#![allow(dead_code)]

use kbd_check::document::dom_model::Viewport;
use kbd_check::document::snapshot::{DomSnapshot, RawDocument, RawNode};

/// `<html><body>children</body></html>` with the default 1280x800 viewport.
pub fn page(children: Vec<RawNode>) -> DomSnapshot {
    page_with(None, None, children)
}

pub fn page_with(
    url: Option<&str>,
    html_class: Option<&str>,
    children: Vec<RawNode>,
) -> DomSnapshot {
    let body = children
        .into_iter()
        .fold(RawNode::element("body").rect(0.0, 0.0, 1280.0, 2000.0), |b, c| b.child(c));

    let mut html = RawNode::element("html").rect(0.0, 0.0, 1280.0, 2000.0);
    if let Some(class) = html_class {
        html = html.attr("class", class);
    }

    DomSnapshot::from_raw(RawDocument {
        url: url.map(String::from),
        title: "Fixture".into(),
        viewport: Viewport::default(),
        root: html.child(body),
    })
}

/// Give `node` a comfortably sized, on-screen box at row `y`.
pub fn sized(node: RawNode, y: f64) -> RawNode {
    node.rect(10.0, y, 120.0, 32.0)
}

pub fn link(id: &str, href: &str, text: &str, y: f64) -> RawNode {
    sized(RawNode::element("a").attr("id", id).attr("href", href), y).text_child(text)
}

pub fn button(id: &str, text: &str, y: f64) -> RawNode {
    let b = sized(RawNode::element("button").attr("id", id), y);
    if text.is_empty() { b } else { b.text_child(text) }
}

/// The four-element page: link "Home", unnamed button, input with
/// tabindex 5, div with tabindex 0 and aria-label "Panel".
pub fn mixed_order_page() -> DomSnapshot {
    page(vec![
        link("home", "/home", "Home", 10.0),
        button("mystery", "", 60.0),
        sized(RawNode::element("input").attr("id", "qty").attr("tabindex", "5"), 110.0),
        sized(
            RawNode::element("div")
                .attr("id", "panel")
                .attr("tabindex", "0")
                .attr("aria-label", "Panel"),
            160.0,
        ),
    ])
}

pub fn names(snapshot: &kbd_check::inspect::inspect_model::InspectionSnapshot) -> Vec<String> {
    snapshot.elements.iter().map(|e| e.name.clone()).collect()
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("kbd-check-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
