use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::dom_model::{
    default_display_for, ComputedStyle, Document, DocumentMut, NodeId, Rect, Viewport,
};
use crate::error::KbdCheckError;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

// ============================================================================
// Extraction format
// ============================================================================

/// A page as produced by the DOM extraction script.
///
/// Rects are page coordinates; the viewport carries the scroll offset at
/// capture time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewport: Viewport,
    pub root: RawNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNode {
    Element {
        tag: String,
        #[serde(default)]
        attrs: BTreeMap<String, String>,
        #[serde(default)]
        style: ComputedStyle,
        #[serde(default)]
        rect: Rect,
        #[serde(default)]
        children: Vec<RawNode>,
    },
    Text {
        text: String,
    },
}

impl RawNode {
    pub fn element(tag: &str) -> Self {
        RawNode::Element {
            tag: tag.to_string(),
            attrs: BTreeMap::new(),
            style: ComputedStyle::default(),
            rect: Rect::default(),
            children: vec![],
        }
    }

    pub fn text(text: &str) -> Self {
        RawNode::Text {
            text: text.to_string(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if let RawNode::Element { attrs, .. } = &mut self {
            attrs.insert(name.to_string(), value.to_string());
        }
        self
    }

    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        if let RawNode::Element { rect, .. } = &mut self {
            *rect = Rect::new(x, y, width, height);
        }
        self
    }

    pub fn display(mut self, value: &str) -> Self {
        if let RawNode::Element { style, .. } = &mut self {
            style.display = value.to_string();
        }
        self
    }

    pub fn visibility(mut self, value: &str) -> Self {
        if let RawNode::Element { style, .. } = &mut self {
            style.visibility = value.to_string();
        }
        self
    }

    pub fn opacity(mut self, value: f64) -> Self {
        if let RawNode::Element { style, .. } = &mut self {
            style.opacity = value;
        }
        self
    }

    pub fn child(mut self, node: RawNode) -> Self {
        if let RawNode::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn text_child(self, text: &str) -> Self {
        self.child(RawNode::text(text))
    }
}

// ============================================================================
// Arena-backed document
// ============================================================================

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        style: ComputedStyle,
        rect: Rect,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory document built from a [`RawDocument`].
///
/// Removed nodes leave a tombstone in the arena, so a handle taken before the
/// removal resolves to `None` rather than to some other node.
#[derive(Debug, Clone)]
pub struct DomSnapshot {
    url: Option<String>,
    title: String,
    viewport: Viewport,
    nodes: Vec<Option<NodeData>>,
    root: NodeId,
}

impl DomSnapshot {
    pub fn from_raw(raw: RawDocument) -> Self {
        let mut snapshot = DomSnapshot {
            url: raw.url,
            title: raw.title,
            viewport: raw.viewport,
            nodes: Vec::new(),
            root: NodeId(0),
        };

        let root = match raw.root {
            element @ RawNode::Element { .. } => element,
            text @ RawNode::Text { .. } => RawNode::element("html").child(text),
        };
        snapshot.root = snapshot.insert_raw(root, None);
        snapshot
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, KbdCheckError> {
        let raw: RawDocument =
            serde_json::from_value(value).map_err(|e| KbdCheckError::SnapshotParse {
                context: "page extraction".into(),
                source: e,
            })?;
        Ok(Self::from_raw(raw))
    }

    /// Parse extraction JSON of any nesting depth.
    ///
    /// Every DOM level costs two JSON levels, so serde_json's recursion limit
    /// is lifted and the stack grows on demand instead.
    pub fn from_json_str(json: &str) -> Result<Self, KbdCheckError> {
        let parse_err = |e: serde_json::Error| KbdCheckError::SnapshotParse {
            context: "page extraction".into(),
            source: e,
        };

        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let raw = RawDocument::deserialize(serde_stacker::Deserializer::new(&mut de))
            .map_err(parse_err)?;
        de.end().map_err(parse_err)?;
        Ok(Self::from_raw(raw))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn insert_raw(&mut self, raw: RawNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        match raw {
            RawNode::Text { text } => {
                self.nodes.push(Some(NodeData {
                    kind: NodeKind::Text(text),
                    parent,
                    children: vec![],
                }));
            }
            RawNode::Element {
                tag,
                attrs,
                mut style,
                rect,
                children,
            } => {
                let tag = tag.to_ascii_lowercase();
                if style.display.trim().is_empty() {
                    style.display = default_display_for(&tag).to_string();
                }
                self.nodes.push(Some(NodeData {
                    kind: NodeKind::Element {
                        tag,
                        attrs,
                        style,
                        rect,
                    },
                    parent,
                    children: vec![],
                }));
                for child in children {
                    let child_id = self.insert_raw(child, Some(id));
                    if let Some(Some(data)) = self.nodes.get_mut(id.0) {
                        data.children.push(child_id);
                    }
                }
            }
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).and_then(|n| n.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.0).and_then(|n| n.as_mut())
    }

    fn tombstone(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id.0).and_then(|n| n.take()) {
            Some(data) => data.children,
            None => return,
        };
        for child in children {
            self.tombstone(child);
        }
    }

    fn is_rendered(&self, id: NodeId) -> bool {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Element { attrs, style, .. }) => {
                !attrs.contains_key("hidden")
                    && style.display != "none"
                    && style.visibility != "hidden"
            }
            Some(NodeKind::Text(_)) => true,
            None => false,
        }
    }

    /// False when the node or an ancestor is `hidden` or `display:none`.
    fn has_layout_box(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            let Some(data) = self.node(n) else { return false };
            if let NodeKind::Element { attrs, style, .. } = &data.kind {
                if attrs.contains_key("hidden") || style.display.trim() == "none" {
                    return false;
                }
            }
            current = data.parent;
        }
        true
    }

    fn collect_text(&self, id: NodeId, rendered_only: bool, out: &mut String) {
        let Some(data) = self.node(id) else { return };
        if rendered_only && !self.is_rendered(id) {
            return;
        }
        match &data.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in &data.children {
                    let breaks = rendered_only && self.breaks_line(child);
                    if breaks {
                        out.push('\n');
                    }
                    self.collect_text(child, rendered_only, out);
                    if breaks {
                        out.push('\n');
                    }
                }
            }
        }
    }

    /// Block-level boxes and `<br>` separate their text from siblings.
    fn breaks_line(&self, id: NodeId) -> bool {
        match self.node(id).map(|n| &n.kind) {
            Some(NodeKind::Element { tag, style, .. }) => tag == "br" || style.is_block_level(),
            _ => false,
        }
    }

    fn serialize(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.node(id) else { return };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attrs, .. } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for &child in &data.children {
                    self.serialize(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

impl Document for DomSnapshot {
    fn root(&self) -> NodeId {
        self.root
    }

    fn body(&self) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.tag_name(n) == Some("body"))
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(data) = self.node(scope) else {
            return out;
        };

        let mut stack: Vec<NodeId> = data.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            if let NodeKind::Element { .. } = node.kind {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).map(|v| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    fn computed_style(&self, node: NodeId) -> Option<&ComputedStyle> {
        match &self.node(node)?.kind {
            NodeKind::Element { style, .. } => Some(style),
            NodeKind::Text(_) => None,
        }
    }

    fn bounding_rect(&self, node: NodeId) -> Option<Rect> {
        match &self.node(node)?.kind {
            NodeKind::Element { rect, .. } => {
                if !self.has_layout_box(node) {
                    return Some(Rect::default());
                }
                Some(rect.translate(-self.viewport.scroll_x, -self.viewport.scroll_y))
            }
            NodeKind::Text(_) => None,
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn text_content(&self, node: NodeId) -> Option<String> {
        self.node(node)?;
        let mut out = String::new();
        self.collect_text(node, false, &mut out);
        Some(out)
    }

    fn inner_text(&self, node: NodeId) -> Option<String> {
        self.node(node)?;
        let mut out = String::new();
        self.collect_text(node, true, &mut out);
        Some(out.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    fn outer_html(&self, node: NodeId) -> Option<String> {
        self.node(node)?;
        let mut out = String::new();
        self.serialize(node, &mut out);
        Some(out)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if self.attribute(self.root, "id") == Some(id) {
            return Some(self.root);
        }
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.attribute(n, "id") == Some(id))
    }

    fn base_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl DocumentMut for DomSnapshot {
    fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Option<NodeId> {
        self.tag_name(parent)?;
        let raw = attrs
            .iter()
            .fold(RawNode::element(tag), |node, (k, v)| node.attr(k, v));
        let id = self.insert_raw(raw, Some(parent));
        self.node_mut(parent)?.children.push(id);
        Some(id)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        match self.node_mut(node).map(|n| &mut n.kind) {
            Some(NodeKind::Element { attrs, .. }) => {
                attrs.insert(name.to_string(), value.to_string());
                true
            }
            _ => false,
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
        match self.node_mut(node).map(|n| &mut n.kind) {
            Some(NodeKind::Element { attrs, .. }) => attrs.remove(name).is_some(),
            _ => false,
        }
    }

    fn remove_node(&mut self, node: NodeId) -> bool {
        if node == self.root {
            return false;
        }
        let Some(parent) = self.parent(node) else {
            return false;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        self.tombstone(node);
        true
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> bool {
        if self.tag_name(node).is_none() {
            return false;
        }
        let old = self
            .node_mut(node)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child in old {
            self.tombstone(child);
        }
        let text_id = self.insert_raw(RawNode::text(text), Some(node));
        if let Some(n) = self.node_mut(node) {
            n.children.push(text_id);
        }
        true
    }

    fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.viewport.scroll_x = x.max(0.0);
        self.viewport.scroll_y = y.max(0.0);
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}
