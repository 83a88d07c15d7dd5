use crate::document::dom_model::{Document, DocumentMut, NodeId};
use crate::inspect::inspect_model::{InspectOptions, InspectionSnapshot};
use crate::inspect::inspector::inspect;
use crate::inspect::naming::describe_element;
use crate::overlay::focus_trail::{DEFAULT_TRAIL_CAPACITY, FocusTrail};
use crate::overlay::frame::{OverlayFrame, build_frame};
use crate::overlay::hotkey::DEFAULT_HOTKEY_LABEL;
use crate::overlay::host::{EventHost, HostEvent, ListenerId, ListenerKind, OBSERVATION_LISTENERS};
use crate::overlay::layer::{OverlayLayer, Theme};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

// ============================================================================
// State
// ============================================================================

/// Lifecycle of the live synchronizer.
///
/// `EnabledIdle` is transient: entering it immediately recomputes and
/// attaches the observers, which moves on to `EnabledObserving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Disabled,
    EnabledIdle,
    EnabledObserving,
}

impl SyncState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Disabled => "disabled",
            SyncState::EnabledIdle => "enabled-idle",
            SyncState::EnabledObserving => "enabled-observing",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, SyncState::Disabled)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Start enabled when mounted
    pub enabled_by_default: bool,

    /// Shown in the panel header; does not change the detected chord
    pub hotkey_label: String,

    pub trail_capacity: usize,

    pub inspect: InspectOptions,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled_by_default: false,
            hotkey_label: DEFAULT_HOTKEY_LABEL.to_string(),
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            inspect: InspectOptions::default(),
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Owns the overlay's state: visibility, the current snapshot, the focus
/// trail and every listener attached to the host.
///
/// All work runs synchronously inside whichever event triggered it. The host
/// must call [`OverlayController::unmount`] before dropping the controller so
/// no subscription outlives it.
pub struct OverlayController {
    config: OverlayConfig,
    state: SyncState,
    snapshot: InspectionSnapshot,
    trail: FocusTrail,
    layer: OverlayLayer,
    key_listener: Option<ListenerId>,
    observers: Vec<(ListenerKind, ListenerId)>,
    tracer: TraceLogger,
    step: u64,
}

impl OverlayController {
    pub fn new(config: OverlayConfig, tracer: TraceLogger) -> Self {
        let trail = FocusTrail::with_capacity(config.trail_capacity);
        Self {
            config,
            state: SyncState::Disabled,
            snapshot: InspectionSnapshot::empty(),
            trail,
            layer: OverlayLayer::new(),
            key_listener: None,
            observers: Vec::new(),
            tracer,
            step: 0,
        }
    }

    // ---- Accessors ----

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    pub fn is_mounted(&self) -> bool {
        self.key_listener.is_some()
    }

    pub fn snapshot(&self) -> &InspectionSnapshot {
        &self.snapshot
    }

    pub fn focus_trail(&self) -> &FocusTrail {
        &self.trail
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn layer(&self) -> &OverlayLayer {
        &self.layer
    }

    // ---- Lifecycle ----

    /// Insert the overlay into a page.
    ///
    /// Creates (or adopts) the container, subscribes to the toggle chord and
    /// enables right away when configured to. Mounting twice is a no-op apart
    /// from re-checking the container. Returns whether a container exists.
    pub fn mount<D, H>(&mut self, doc: &mut D, host: &mut H) -> bool
    where
        D: DocumentMut + ?Sized,
        H: EventHost + ?Sized,
    {
        let has_container = self.layer.ensure_container(doc).is_some();
        if !has_container {
            eprintln!("Warning: no overlay container; the overlay will not draw");
        }

        if self.key_listener.is_none() {
            self.key_listener = Some(host.attach(ListenerKind::KeyDown));
            self.trace(TraceEvent::now(self.step, self.state, "mount")
                .with_detail(format!("container={}", has_container)));

            if self.config.enabled_by_default {
                self.enable(&*doc, host);
            }
        }

        has_container
    }

    /// Detach every listener and drop the snapshot. The container stays in
    /// the page so a later mount adopts it.
    pub fn unmount<H: EventHost + ?Sized>(&mut self, host: &mut H) {
        self.disable(host);
        if let Some(id) = self.key_listener.take() {
            host.detach(id);
            self.trace(TraceEvent::now(self.step, self.state, "unmount"));
        }
    }

    pub fn enable<D, H>(&mut self, doc: &D, host: &mut H)
    where
        D: Document + ?Sized,
        H: EventHost + ?Sized,
    {
        if self.state.is_enabled() {
            return;
        }

        self.state = SyncState::EnabledIdle;
        self.trace(TraceEvent::now(self.step, self.state, "enable"));

        self.recompute(doc);
        for kind in OBSERVATION_LISTENERS {
            let id = host.attach(kind);
            self.observers.push((kind, id));
        }
        self.state = SyncState::EnabledObserving;
        self.trace(TraceEvent::now(self.step, self.state, "observe")
            .with_detail(format!("{} listeners", self.observers.len())));
    }

    /// Tear down the observers and forget the snapshot. The focus trail is
    /// session state and survives.
    pub fn disable<H: EventHost + ?Sized>(&mut self, host: &mut H) {
        if !self.state.is_enabled() {
            return;
        }

        for (_, id) in self.observers.drain(..) {
            host.detach(id);
        }
        self.snapshot = InspectionSnapshot::empty();
        self.state = SyncState::Disabled;
        self.trace(TraceEvent::now(self.step, self.state, "disable"));
    }

    pub fn toggle<D, H>(&mut self, doc: &D, host: &mut H)
    where
        D: Document + ?Sized,
        H: EventHost + ?Sized,
    {
        if self.state.is_enabled() {
            self.disable(host);
        } else {
            self.enable(doc, host);
        }
    }

    // ---- Recompute and events ----

    /// Full collect → order → name → classify pass, replacing the snapshot.
    pub fn recompute<D: Document + ?Sized>(&mut self, doc: &D) -> &InspectionSnapshot {
        self.snapshot = inspect(doc, &self.config.inspect);
        self.trace(
            TraceEvent::now(self.step, self.state, "recompute")
                .with_counts(self.snapshot.len(), self.snapshot.issue_count()),
        );
        &self.snapshot
    }

    /// Dispatch one host notification. Returns whether it changed anything.
    ///
    /// Events for a listener kind that is not currently attached are dropped,
    /// exactly as if the host never delivered them.
    pub fn handle_event<D, H>(&mut self, event: &HostEvent, doc: &D, host: &mut H) -> bool
    where
        D: Document + ?Sized,
        H: EventHost + ?Sized,
    {
        if !self.is_listening(event.listener_kind()) {
            return false;
        }

        match event {
            HostEvent::Key(chord) => {
                if !chord.is_toggle_chord() {
                    return false;
                }
                self.toggle(doc, host);
                true
            }
            HostEvent::Mutation | HostEvent::Resize | HostEvent::Scroll => {
                self.recompute(doc);
                true
            }
            HostEvent::FocusIn(node) => self.record_focus(doc, *node),
        }
    }

    /// Append the focused element's descriptor to the trail. Returns false
    /// for vanished nodes and immediate repeats.
    pub fn record_focus<D: Document + ?Sized>(&mut self, doc: &D, node: NodeId) -> bool {
        let Some(descriptor) = describe_element(doc, node) else {
            return false;
        };
        let appended = self.trail.push(descriptor.clone());
        if appended {
            self.trace(TraceEvent::now(self.step, self.state, "focus").with_focus(descriptor));
        }
        appended
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        match kind {
            ListenerKind::KeyDown => self.key_listener.is_some(),
            other => self.observers.iter().any(|(k, _)| *k == other),
        }
    }

    // ---- Rendering ----

    /// Frame for the current snapshot, or `None` when disabled or when the
    /// container is missing.
    pub fn render<D: Document + ?Sized>(&self, doc: &D) -> Option<OverlayFrame> {
        if !self.state.is_enabled() {
            return None;
        }
        self.layer.live_container(doc)?;

        Some(build_frame(
            &self.snapshot,
            &self.trail,
            Theme::from_document(doc),
            &self.config.hotkey_label,
        ))
    }

    fn trace(&mut self, event: TraceEvent) {
        self.tracer.log(&event);
        self.step += 1;
    }
}
