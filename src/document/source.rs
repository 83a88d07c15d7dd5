use crate::document::snapshot::DomSnapshot;
use crate::error::KbdCheckError;

/// Whether `location` should be fetched over HTTP rather than read from disk.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Load a page extraction from a file path or an `http(s)://` endpoint.
pub fn load_snapshot(location: &str) -> Result<DomSnapshot, KbdCheckError> {
    if is_remote(location) {
        fetch_snapshot(location)
    } else {
        read_snapshot(location)
    }
}

pub fn read_snapshot(path: &str) -> Result<DomSnapshot, KbdCheckError> {
    let content = std::fs::read_to_string(path).map_err(|e| KbdCheckError::SnapshotRead {
        path: path.to_string(),
        source: e,
    })?;
    DomSnapshot::from_json_str(&content)
}

/// GET an extraction endpoint that answers with the snapshot JSON.
pub fn fetch_snapshot(url: &str) -> Result<DomSnapshot, KbdCheckError> {
    let fetch_err = |e: reqwest::Error| KbdCheckError::Fetch {
        url: url.to_string(),
        source: e,
    };

    let body = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(fetch_err)?
        .text()
        .map_err(fetch_err)?;

    DomSnapshot::from_json_str(&body)
}
