use crate::document::dom_model::{Document, NodeId};
use crate::inspect::inspect_model::InspectOptions;

/// An element that passed collection, with the data ordering needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub node: NodeId,

    /// Position in document order among collected elements
    pub encounter: usize,

    /// `tabindex` attribute exactly as authored
    pub authored_tab_index: Option<String>,

    /// Parsed `tabindex` attribute
    pub explicit_tab_index: Option<i32>,

    /// Browser `tabIndex` value
    pub tab_index: i32,

    /// Whether a non-empty `tabindex` attribute is present
    pub has_tab_index_attr: bool,
}

impl Candidate {
    /// Index used for ordering: unset and empty `tabindex` count as 0.
    pub fn order_key(&self) -> i32 {
        if self.has_tab_index_attr {
            self.tab_index
        } else {
            0
        }
    }
}

/// Collect elements reachable by sequential keyboard navigation under `scope`.
///
/// The result is in document order but callers must not rely on it; ordering
/// is `tab_order::resolve_tab_order`'s job.
pub fn collect_tabbables<D: Document + ?Sized>(
    doc: &D,
    scope: NodeId,
    options: &InspectOptions,
) -> Vec<Candidate> {
    doc.descendants(scope)
        .into_iter()
        .filter(|&n| matches_tabbable(doc, n))
        .filter(|&n| !doc.has_attribute(n, "disabled"))
        .filter_map(|n| {
            let tab_index = effective_tab_index(doc, n)?;
            (tab_index != -1).then_some((n, tab_index))
        })
        .filter(|&(n, _)| doc.closest(n, &options.ignore_attribute).is_none())
        .filter(|&(n, _)| is_visible(doc, n))
        .enumerate()
        .map(|(encounter, (node, tab_index))| {
            let raw = doc.attribute(node, "tabindex");
            Candidate {
                node,
                encounter,
                authored_tab_index: raw.map(str::to_string),
                explicit_tab_index: raw.and_then(parse_tab_index),
                tab_index,
                has_tab_index_attr: raw.is_some_and(|r| !r.is_empty()),
            }
        })
        .collect()
}

/// `a[href], button, input:not([type=hidden]), select, textarea, [tabindex]`
pub fn matches_tabbable<D: Document + ?Sized>(doc: &D, node: NodeId) -> bool {
    if doc.has_attribute(node, "tabindex") {
        return true;
    }
    match doc.tag_name(node) {
        Some("a") => doc.has_attribute(node, "href"),
        Some("button") | Some("select") | Some("textarea") => true,
        Some("input") => !doc
            .attribute(node, "type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden")),
        _ => false,
    }
}

/// Elements that take focus without an explicit `tabindex`.
pub fn is_natively_focusable<D: Document + ?Sized>(doc: &D, node: NodeId) -> bool {
    match doc.tag_name(node) {
        Some("a") => doc.has_attribute(node, "href"),
        Some("button") | Some("input") | Some("select") | Some("textarea") => true,
        _ => false,
    }
}

/// What the browser reports as `tabIndex`: a valid attribute wins, otherwise
/// 0 for natively focusable elements and -1 for the rest.
pub fn effective_tab_index<D: Document + ?Sized>(doc: &D, node: NodeId) -> Option<i32> {
    doc.tag_name(node)?;
    if let Some(parsed) = doc.attribute(node, "tabindex").and_then(parse_tab_index) {
        return Some(parsed);
    }
    Some(if is_natively_focusable(doc, node) { 0 } else { -1 })
}

/// HTML integer parsing: leading whitespace, optional sign, then digits.
/// Trailing garbage after the digits is ignored.
pub fn parse_tab_index(raw: &str) -> Option<i32> {
    let s = raw.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}

/// Not `hidden`, not `visibility:hidden`/`display:none`, not fully
/// transparent, and a non-empty box.
pub fn is_visible<D: Document + ?Sized>(doc: &D, node: NodeId) -> bool {
    if doc.has_attribute(node, "hidden") {
        return false;
    }

    let Some(style) = doc.computed_style(node) else {
        return false;
    };
    if style.visibility == "hidden" || style.display == "none" || style.opacity == 0.0 {
        return false;
    }

    doc.bounding_rect(node)
        .is_some_and(|r| r.width > 0.0 && r.height > 0.0)
}
