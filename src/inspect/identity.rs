use sha1::{Digest, Sha1};

/// Markup prefix that feeds the fingerprint.
pub const FINGERPRINT_PREFIX_CHARS: usize = 20;

/// Render key for an inspected element.
///
/// Pure function of document position, tag and the start of the element's
/// markup, so it holds steady across recomputes while the node is unchanged
/// and shifts when its serialized content does.
pub fn stable_id(encounter: usize, tag: &str, outer_html: &str) -> String {
    let prefix: String = outer_html.chars().take(FINGERPRINT_PREFIX_CHARS).collect();
    format!("kbd-{}-{}-{}", encounter, tag, &markup_fingerprint(&prefix)[..8])
}

pub fn markup_fingerprint(text: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
