use crate::{
    document::source::load_snapshot,
    error::KbdCheckError,
    inspect::{
        inspect_model::{InspectOptions, InspectionSnapshot},
        inspector::inspect,
    },
};

pub mod cli;
pub mod document;
pub mod error;
pub mod inspect;
pub mod overlay;
pub mod scenario;
pub mod trace;

/// Load a page extraction and run one inspection pass over it.
pub fn inspect_location(
    location: &str,
    options: &InspectOptions,
) -> Result<InspectionSnapshot, KbdCheckError> {
    let doc = load_snapshot(location)?;
    Ok(inspect(&doc, options))
}
