use crate::document::dom_model::{Document, DocumentMut, NodeId};

pub const OVERLAY_ROOT_ID: &str = "kbdcheck-overlay-root";

/// Host color scheme, read from the `dark` class on the document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_document<D: Document + ?Sized>(doc: &D) -> Self {
        if doc.class_list(doc.root()).contains(&"dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Pick the light or dark variant of a style value.
    pub fn pick<'a>(&self, light: &'a str, dark: &'a str) -> &'a str {
        if self.is_dark() { dark } else { light }
    }
}

/// The single container the overlay draws into.
///
/// Created on first need and reused afterwards; an existing element with
/// [`OVERLAY_ROOT_ID`] is adopted instead of duplicated.
#[derive(Debug, Default)]
pub struct OverlayLayer {
    container: Option<NodeId>,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Locate or create the container. `None` only when the page has no body
    /// to attach to, in which case nothing is drawn.
    pub fn ensure_container<D: DocumentMut + ?Sized>(&mut self, doc: &mut D) -> Option<NodeId> {
        if let Some(existing) = self.live_container(&*doc) {
            return Some(existing);
        }

        if let Some(adopted) = doc.element_by_id(OVERLAY_ROOT_ID) {
            self.container = Some(adopted);
            return Some(adopted);
        }

        let body = doc.body()?;
        let created = doc.append_element(
            body,
            "div",
            &[("id", OVERLAY_ROOT_ID), ("aria-hidden", "true")],
        )?;
        self.container = Some(created);
        Some(created)
    }

    /// The remembered container, if it is still in the document.
    pub fn live_container<D: Document + ?Sized>(&self, doc: &D) -> Option<NodeId> {
        self.container.filter(|&c| doc.tag_name(c).is_some())
    }
}
