use std::fmt;

#[derive(Debug)]
pub enum KbdCheckError {
    /// Snapshot file could not be read
    SnapshotRead { path: String, source: std::io::Error },

    /// Snapshot JSON did not match the extraction format
    SnapshotParse { context: String, source: serde_json::Error },

    /// Fetching a snapshot from an extraction endpoint failed
    Fetch { url: String, source: reqwest::Error },

    /// Scenario file could not be read
    ScenarioRead { path: String, source: std::io::Error },

    /// Scenario YAML was malformed
    ScenarioParse { path: String, source: serde_yaml::Error },

    /// A scenario event referenced an element id that is not in the page
    UnknownTarget { id: String, event: String },

    /// Scenario has neither a snapshot path nor an inline page
    MissingPage(String),

    /// Report serialization failed
    JsonSerialize { context: String, source: serde_json::Error },
}

impl fmt::Display for KbdCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KbdCheckError::SnapshotRead { path, source } => {
                write!(f, "Failed to read snapshot '{}': {}", path, source)
            }
            KbdCheckError::SnapshotParse { context, source } => {
                write!(f, "Snapshot parse error ({}): {}", context, source)
            }
            KbdCheckError::Fetch { url, source } => {
                write!(f, "Failed to fetch snapshot from {}: {}", url, source)
            }
            KbdCheckError::ScenarioRead { path, source } => {
                write!(f, "Failed to read scenario '{}': {}", path, source)
            }
            KbdCheckError::ScenarioParse { path, source } => {
                write!(f, "Scenario parse error ({}): {}", path, source)
            }
            KbdCheckError::UnknownTarget { id, event } => {
                write!(f, "No element with id '{}' for {} event", id, event)
            }
            KbdCheckError::MissingPage(path) => {
                write!(f, "Scenario '{}' names no snapshot and no inline page", path)
            }
            KbdCheckError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
        }
    }
}

impl std::error::Error for KbdCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KbdCheckError::SnapshotRead { source, .. } => Some(source),
            KbdCheckError::SnapshotParse { source, .. } => Some(source),
            KbdCheckError::Fetch { source, .. } => Some(source),
            KbdCheckError::ScenarioRead { source, .. } => Some(source),
            KbdCheckError::ScenarioParse { source, .. } => Some(source),
            KbdCheckError::JsonSerialize { source, .. } => Some(source),
            _ => None,
        }
    }
}
