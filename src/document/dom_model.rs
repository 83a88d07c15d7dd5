use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry and style primitives
// ============================================================================

/// Opaque handle to a node inside a [`Document`].
///
/// A handle never owns the node. It can outlive it: once the node is removed
/// every accessor taking this handle returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Visible area of the page plus its scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default, rename = "scrollX")]
    pub scroll_x: f64,
    #[serde(default, rename = "scrollY")]
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// The subset of computed style the inspector reads.
///
/// An empty `display` means "not captured"; documents resolve it to the
/// element's default with [`default_display_for`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    #[serde(default = "default_display")]
    pub display: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: default_display(),
            visibility: default_visibility(),
            opacity: default_opacity(),
        }
    }
}

fn default_display() -> String { String::new() }
fn default_visibility() -> String { "visible".to_string() }
fn default_opacity() -> f64 { 1.0 }

impl ComputedStyle {
    /// Starts a new line in rendered text (`block`, `flex`, `list-item`, ...).
    pub fn is_block_level(&self) -> bool {
        let display = self.display.trim();
        !(display.is_empty()
            || display == "none"
            || display == "contents"
            || display.starts_with("inline"))
    }
}

const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "dfn", "em", "i",
    "img", "input", "kbd", "label", "mark", "q", "s", "samp", "select", "small", "span",
    "strong", "sub", "sup", "svg", "textarea", "time", "u", "var", "wbr",
];

/// User-agent default `display` for a lower-cased tag.
pub fn default_display_for(tag: &str) -> &'static str {
    if INLINE_TAGS.contains(&tag) {
        "inline"
    } else {
        "block"
    }
}

// ============================================================================
// Document access
// ============================================================================

/// Read-only view over a live (or captured) page.
///
/// Everything that takes a [`NodeId`] returns `Option` so callers can skip
/// nodes that vanished between two reads instead of failing.
pub trait Document {
    /// The document element (`<html>`).
    fn root(&self) -> NodeId;

    fn body(&self) -> Option<NodeId>;

    /// Element descendants of `scope` in document order, `scope` excluded.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId>;

    /// Lower-cased tag name. `None` for text nodes and removed nodes.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn computed_style(&self, node: NodeId) -> Option<&ComputedStyle>;

    /// Border box relative to the viewport. Elements that generate no box
    /// (their own or an ancestor's `display:none` or `hidden`) report 0x0.
    fn bounding_rect(&self, node: NodeId) -> Option<Rect>;

    fn viewport(&self) -> Viewport;

    /// All descendant text, untouched.
    fn text_content(&self, node: NodeId) -> Option<String>;

    /// Rendered text: hidden subtrees skipped, block-level children on their
    /// own line, whitespace collapsed.
    fn inner_text(&self, node: NodeId) -> Option<String>;

    fn outer_html(&self, node: NodeId) -> Option<String>;

    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// URL the page was loaded from, used to resolve relative links.
    fn base_url(&self) -> Option<&str>;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Nearest inclusive ancestor carrying `attr`.
    fn closest(&self, node: NodeId, attr: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.has_attribute(n, attr) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    fn class_list(&self, node: NodeId) -> Vec<&str> {
        self.attribute(node, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// First `<label for="id">` in the document.
    fn label_for(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root()).into_iter().find(|&n| {
            self.tag_name(n) == Some("label") && self.attribute(n, "for") == Some(id)
        })
    }
}

/// Write access, used by the overlay container and by scenario replay.
pub trait DocumentMut: Document {
    /// Append a new element under `parent`; `None` if `parent` is gone.
    fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Option<NodeId>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool;

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool;

    /// Detach `node` and its subtree. Outstanding handles become stale.
    fn remove_node(&mut self, node: NodeId) -> bool;

    /// Replace the children of `node` with a single text node.
    fn set_text(&mut self, node: NodeId, text: &str) -> bool;

    fn set_viewport_size(&mut self, width: f64, height: f64);

    fn scroll_to(&mut self, x: f64, y: f64);
}
