use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::trace::trace::TraceEvent;

/// Overlay trace sink: one JSON object per line, appended.
///
/// Tracing is best effort. A file that cannot be opened leaves the logger
/// disabled, and write failures only produce a warning on stderr.
pub struct TraceLogger {
    sink: Option<TraceSink>,
}

struct TraceSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Self {
                sink: Some(TraceSink {
                    path: path.to_path_buf(),
                    file: Mutex::new(file),
                }),
            },
            Err(e) => {
                eprintln!(
                    "Warning: trace disabled, cannot open '{}': {}",
                    path.display(),
                    e
                );
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|s| s.path.as_path())
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else { return };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Warning: dropping trace event '{}': {}", event.event, e);
                return;
            }
        };

        let Ok(mut file) = sink.file.lock() else {
            eprintln!("Warning: trace file lock poisoned; event '{}' dropped", event.event);
            return;
        };
        if let Err(e) = writeln!(file, "{}", line) {
            eprintln!("Warning: trace write to '{}' failed: {}", sink.path.display(), e);
        }
    }
}
