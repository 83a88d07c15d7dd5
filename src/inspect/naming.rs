use url::Url;

use crate::document::dom_model::{Document, NodeId};
use crate::inspect::inspect_model::NO_NAME;

/// Length of the name fragment in focus trail descriptors.
pub const DESCRIPTOR_NAME_CHARS: usize = 24;

// ============================================================================
// Accessible name
// ============================================================================

/// Best-effort accessible name.
///
/// This is a simplified precedence list, not the full accessible name
/// computation: implicit role naming rules are ignored and `aria-labelledby`
/// is followed one level deep with no cycle handling.
///
/// 1. `aria-label`
/// 2. text of every element in `aria-labelledby`, space-joined
/// 3. `<label for=id>` text
/// 4. `title`, `alt`, `placeholder`
/// 5. rendered text
/// 6. link destination
/// 7. [`NO_NAME`]
pub fn accessible_name<D: Document + ?Sized>(doc: &D, node: NodeId) -> String {
    if let Some(label) = non_empty(doc.attribute(node, "aria-label")) {
        return label;
    }

    if let Some(ids) = doc.attribute(node, "aria-labelledby") {
        let joined = ids
            .split_whitespace()
            .filter_map(|id| doc.element_by_id(id))
            .filter_map(|n| doc.text_content(n))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(text) = non_empty(Some(joined.as_str())) {
            return text;
        }
    }

    if let Some(id) = doc.attribute(node, "id").filter(|id| !id.is_empty()) {
        let label_text = doc.label_for(id).and_then(|l| doc.text_content(l));
        if let Some(text) = non_empty(label_text.as_deref()) {
            return text;
        }
    }

    for attr in ["title", "alt", "placeholder"] {
        if let Some(value) = non_empty(doc.attribute(node, attr)) {
            return value;
        }
    }

    if let Some(text) = non_empty(doc.inner_text(node).as_deref()) {
        return text;
    }

    if doc.tag_name(node) == Some("a") {
        if let Some(dest) = link_destination(doc, node) {
            return dest;
        }
    }

    NO_NAME.to_string()
}

/// `href` resolved against the document URL when there is one.
pub fn link_destination<D: Document + ?Sized>(doc: &D, node: NodeId) -> Option<String> {
    let href = doc.attribute(node, "href")?.trim();

    let base = doc.base_url().and_then(|b| Url::parse(b).ok());
    let resolved = match base {
        Some(base) => base.join(href).ok().map(|u| u.to_string()),
        None => Url::parse(href).ok().map(|u| u.to_string()),
    };

    resolved.or_else(|| (!href.is_empty()).then(|| href.to_string()))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Role
// ============================================================================

/// Explicit `role` wins, otherwise a fixed tag table.
pub fn role_of<D: Document + ?Sized>(doc: &D, node: NodeId) -> String {
    if let Some(role) = doc.attribute(node, "role").filter(|r| !r.is_empty()) {
        return role.to_string();
    }

    let tag = doc.tag_name(node).unwrap_or_default();
    match tag {
        "a" => "link".to_string(),
        "button" => "button".to_string(),
        "input" => doc
            .attribute(node, "type")
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "textbox".to_string()),
        "select" => "combobox".to_string(),
        "textarea" => "textbox (multiline)".to_string(),
        other => other.to_ascii_lowercase(),
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// One-line label for the focus trail: `tag#id.c1.c2 [role] "name"`.
pub fn describe_element<D: Document + ?Sized>(doc: &D, node: NodeId) -> Option<String> {
    let tag = doc.tag_name(node)?.to_string();
    let id = doc
        .attribute(node, "id")
        .filter(|id| !id.is_empty())
        .map(|id| format!("#{}", id))
        .unwrap_or_default();
    let classes = doc.class_list(node);
    let cls = if classes.is_empty() {
        String::new()
    } else {
        format!(".{}", classes.iter().take(2).copied().collect::<Vec<_>>().join("."))
    };

    let role = role_of(doc, node);
    let name = accessible_name(doc, node);

    Some(format!(
        "{}{}{} [{}] \"{}\"",
        tag,
        id,
        cls,
        role,
        truncate_chars(&name, DESCRIPTOR_NAME_CHARS)
    ))
}

/// Prefix of at most `max` characters, never splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
