use std::path::Path;

use crate::document::dom_model::{Document, DocumentMut, NodeId};
use crate::document::snapshot::DomSnapshot;
use crate::document::source::load_snapshot;
use crate::error::KbdCheckError;
use crate::overlay::controller::{OverlayConfig, OverlayController};
use crate::overlay::hotkey::KeyChord;
use crate::overlay::host::{HostEvent, RecordingHost};
use crate::scenario::scenario_model::{
    CheckResult, Scenario, ScenarioCheck, ScenarioEvent, ScenarioResult,
};
use crate::trace::logger::TraceLogger;

/// Load a scenario file and the page it runs against.
pub fn load_scenario(path: &str) -> Result<(Scenario, DomSnapshot), KbdCheckError> {
    let content = std::fs::read_to_string(path).map_err(|e| KbdCheckError::ScenarioRead {
        path: path.to_string(),
        source: e,
    })?;
    let scenario: Scenario =
        serde_yaml::from_str(&content).map_err(|e| KbdCheckError::ScenarioParse {
            path: path.to_string(),
            source: e,
        })?;

    let doc = match (&scenario.snapshot, &scenario.page) {
        (Some(location), _) => {
            let resolved = resolve_relative(path, location);
            load_snapshot(&resolved)?
        }
        (None, Some(page)) => DomSnapshot::from_raw(page.clone()),
        (None, None) => return Err(KbdCheckError::MissingPage(path.to_string())),
    };

    Ok((scenario, doc))
}

fn resolve_relative(scenario_path: &str, location: &str) -> String {
    if crate::document::source::is_remote(location) || Path::new(location).is_absolute() {
        return location.to_string();
    }
    Path::new(scenario_path)
        .parent()
        .map(|dir| dir.join(location).display().to_string())
        .unwrap_or_else(|| location.to_string())
}

/// Replays scenario events through an [`OverlayController`].
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Mount the overlay on `doc`, deliver every event in order, then unmount.
    ///
    /// A failing event stops the run; the result records how far it got.
    pub fn run(
        scenario: &Scenario,
        mut doc: DomSnapshot,
        mut config: OverlayConfig,
        tracer: TraceLogger,
    ) -> ScenarioResult {
        if let Some(enabled) = scenario.enabled_by_default {
            config.enabled_by_default = enabled;
        }

        let mut host = RecordingHost::new();
        let mut controller = OverlayController::new(config, tracer);
        controller.mount(&mut doc, &mut host);

        let mut checks = Vec::new();
        let mut error = None;
        let mut events_run = 0;

        for (i, event) in scenario.events.iter().enumerate() {
            match Self::execute_event(event, i, &mut doc, &mut controller, &mut host, &mut checks) {
                Ok(()) => events_run = i + 1,
                Err(e) => {
                    error = Some(format!("Event {} ({}) failed: {}", i, event.label(), e));
                    break;
                }
            }
        }

        let frame = controller.render(&doc);
        let focus_trail = controller.focus_trail().to_vec();
        controller.unmount(&mut host);

        let passed = error.is_none() && checks.iter().all(|c| c.passed);
        ScenarioResult {
            name: scenario.name.clone(),
            passed,
            events_run,
            checks,
            focus_trail,
            frame,
            error,
        }
    }

    fn execute_event(
        event: &ScenarioEvent,
        event_index: usize,
        doc: &mut DomSnapshot,
        controller: &mut OverlayController,
        host: &mut RecordingHost,
        checks: &mut Vec<CheckResult>,
    ) -> Result<(), KbdCheckError> {
        let host_event = match event {
            ScenarioEvent::Key {
                key,
                ctrl,
                alt,
                shift,
                meta,
            } => HostEvent::Key(KeyChord {
                key: key.clone(),
                ctrl: *ctrl,
                alt: *alt,
                shift: *shift,
                meta: *meta,
            }),

            ScenarioEvent::Toggle => HostEvent::Key(KeyChord::new("k").ctrl().alt()),

            ScenarioEvent::Focus { target } => {
                HostEvent::FocusIn(Self::target(doc, target, event)?)
            }

            ScenarioEvent::Scroll { x, y } => {
                doc.scroll_to(*x, *y);
                HostEvent::Scroll
            }

            ScenarioEvent::Resize { width, height } => {
                doc.set_viewport_size(*width, *height);
                HostEvent::Resize
            }

            ScenarioEvent::SetAttribute {
                target,
                name,
                value,
            } => {
                let node = Self::target(doc, target, event)?;
                doc.set_attribute(node, name, value);
                HostEvent::Mutation
            }

            ScenarioEvent::RemoveAttribute { target, name } => {
                let node = Self::target(doc, target, event)?;
                doc.remove_attribute(node, name);
                HostEvent::Mutation
            }

            ScenarioEvent::Remove { target } => {
                let node = Self::target(doc, target, event)?;
                doc.remove_node(node);
                HostEvent::Mutation
            }

            ScenarioEvent::SetText { target, text } => {
                let node = Self::target(doc, target, event)?;
                doc.set_text(node, text);
                HostEvent::Mutation
            }

            ScenarioEvent::Mutate => HostEvent::Mutation,

            ScenarioEvent::Expect { checks: specs } => {
                for check in specs {
                    checks.push(evaluate_check(check, event_index, controller));
                }
                return Ok(());
            }
        };

        controller.handle_event(&host_event, &*doc, host);
        Ok(())
    }

    fn target(
        doc: &DomSnapshot,
        target: &str,
        event: &ScenarioEvent,
    ) -> Result<NodeId, KbdCheckError> {
        let id = target.trim_start_matches('#');
        doc.element_by_id(id).ok_or_else(|| KbdCheckError::UnknownTarget {
            id: id.to_string(),
            event: event.label().to_string(),
        })
    }
}

/// Evaluate one check against the controller's current state.
pub fn evaluate_check(
    check: &ScenarioCheck,
    event_index: usize,
    controller: &OverlayController,
) -> CheckResult {
    let snapshot = controller.snapshot();
    let trail = controller.focus_trail();

    let (passed, actual) = match check {
        ScenarioCheck::Enabled { expected } => {
            let actual = controller.is_enabled();
            (actual == *expected, actual.to_string())
        }
        ScenarioCheck::ElementCount { expected } => {
            (snapshot.len() == *expected, snapshot.len().to_string())
        }
        ScenarioCheck::Names { expected } => {
            let names: Vec<String> = snapshot.elements.iter().map(|e| e.name.clone()).collect();
            (names == *expected, names.join(", "))
        }
        ScenarioCheck::HasIssue { order, issue } => {
            let found = snapshot.elements.iter().find(|e| e.order == *order);
            let tags = found
                .map(|e| e.issues.iter().map(|i| i.as_str()).collect::<Vec<_>>().join(", "))
                .unwrap_or_else(|| "(no such element)".to_string());
            let passed = found.is_some_and(|e| e.issues.iter().any(|i| i.as_str() == issue));
            (passed, tags)
        }
        ScenarioCheck::TrailLength { expected } => (trail.len() == *expected, trail.len().to_string()),
        ScenarioCheck::TrailLast { expected } => {
            let last = trail.last().unwrap_or_default();
            (last == expected.as_str(), last.to_string())
        }
    };

    CheckResult {
        event_index,
        check: check.clone(),
        passed,
        actual: Some(actual),
    }
}
