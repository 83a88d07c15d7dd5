use crate::document::dom_model::Document;
use crate::document::dom_model::NodeId;
use crate::inspect::collector::{Candidate, collect_tabbables};
use crate::inspect::identity::stable_id;
use crate::inspect::inspect_model::{Geometry, InspectOptions, InspectedElement, InspectionSnapshot};
use crate::inspect::issues::classify_issues;
use crate::inspect::naming::{accessible_name, role_of, truncate_chars};
use crate::inspect::tab_order::resolve_tab_order;

pub const MARKUP_PREVIEW_CHARS: usize = 70;
pub const MARKUP_FULL_CHARS: usize = 400;

/// Inspect the whole document.
pub fn inspect<D: Document + ?Sized>(doc: &D, options: &InspectOptions) -> InspectionSnapshot {
    inspect_scope(doc, doc.root(), options)
}

/// Collect, order, name and classify everything tabbable under `scope`.
///
/// Nodes that vanish mid-pass are dropped and orders are assigned afterwards,
/// so the result is always numbered 1..N.
pub fn inspect_scope<D: Document + ?Sized>(
    doc: &D,
    scope: NodeId,
    options: &InspectOptions,
) -> InspectionSnapshot {
    let ordered = resolve_tab_order(collect_tabbables(doc, scope, options));

    let elements = ordered
        .iter()
        .filter_map(|c| inspect_candidate(doc, c, options))
        .enumerate()
        .map(|(i, mut el)| {
            el.order = i + 1;
            el
        })
        .collect();

    InspectionSnapshot { elements }
}

fn inspect_candidate<D: Document + ?Sized>(
    doc: &D,
    candidate: &Candidate,
    options: &InspectOptions,
) -> Option<InspectedElement> {
    let node = candidate.node;
    let tag = doc.tag_name(node)?.to_string();
    let viewport_rect = doc.bounding_rect(node)?;
    let outer_html = doc.outer_html(node)?;
    let viewport = doc.viewport();

    let name = accessible_name(doc, node);
    let role = role_of(doc, node);
    let issues = classify_issues(
        &name,
        candidate.explicit_tab_index,
        &viewport_rect,
        &viewport,
        options,
    );

    let geometry = Geometry {
        viewport: viewport_rect,
        page: viewport_rect.translate(viewport.scroll_x, viewport.scroll_y),
    };

    let collapsed = collapse_whitespace(&outer_html);

    Some(InspectedElement {
        handle: node,
        stable_id: stable_id(candidate.encounter, &tag, &outer_html),
        order: 0,
        authored_tab_index: candidate.authored_tab_index.clone(),
        explicit_tab_index: candidate.explicit_tab_index,
        tab_index: candidate.tab_index,
        tag,
        role,
        name,
        issues,
        geometry,
        markup: truncate_chars(&collapsed, MARKUP_FULL_CHARS).to_string(),
    })
}

/// Every whitespace run becomes a single space.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Compact snippet for the panel; the full markup stays on the element.
pub fn markup_preview(markup: &str) -> String {
    format!("{}\u{2026}", truncate_chars(markup, MARKUP_PREVIEW_CHARS))
}
