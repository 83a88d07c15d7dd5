use std::collections::BTreeMap;

use crate::document::dom_model::NodeId;
use crate::overlay::hotkey::KeyChord;

/// Change notifications the overlay can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Window key-down, for the toggle chord
    KeyDown,
    /// Structural, attribute and text changes anywhere under the body
    Mutation,
    Resize,
    Scroll,
    /// Focus changes, observed in the capture phase
    FocusIn,
}

/// Listeners that exist only while the overlay is enabled.
pub const OBSERVATION_LISTENERS: [ListenerKind; 4] = [
    ListenerKind::Mutation,
    ListenerKind::Resize,
    ListenerKind::Scroll,
    ListenerKind::FocusIn,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// The host page's subscription mechanism.
///
/// Whatever form notifications take (mutation observers, window events, a
/// replayed script), the controller only attaches and detaches through this.
pub trait EventHost {
    fn attach(&mut self, kind: ListenerKind) -> ListenerId;
    fn detach(&mut self, id: ListenerId);
}

/// A notification delivered to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Key(KeyChord),
    Mutation,
    Resize,
    Scroll,
    FocusIn(NodeId),
}

impl HostEvent {
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            HostEvent::Key(_) => ListenerKind::KeyDown,
            HostEvent::Mutation => ListenerKind::Mutation,
            HostEvent::Resize => ListenerKind::Resize,
            HostEvent::Scroll => ListenerKind::Scroll,
            HostEvent::FocusIn(_) => ListenerKind::FocusIn,
        }
    }
}

/// In-memory host that keeps track of live subscriptions.
#[derive(Debug, Default)]
pub struct RecordingHost {
    next_id: u64,
    live: BTreeMap<ListenerId, ListenerKind>,
    pub attach_count: usize,
    pub detach_count: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.live.values().any(|&k| k == kind)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live_kinds(&self) -> Vec<ListenerKind> {
        let mut kinds: Vec<_> = self.live.values().copied().collect();
        kinds.sort();
        kinds
    }
}

impl EventHost for RecordingHost {
    fn attach(&mut self, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.live.insert(id, kind);
        self.attach_count += 1;
        id
    }

    fn detach(&mut self, id: ListenerId) {
        if self.live.remove(&id).is_some() {
            self.detach_count += 1;
        }
    }
}
