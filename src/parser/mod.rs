//! Parser module — source scanning, comment extraction, annotation parsing.

pub mod annotation;
pub mod comment;
pub mod gdscript;

use crate::model::ScannedUnit;
use tracing::debug;

/// Scan every `(path, text)` pair. Order of the result follows the input;
/// sorting for output happens at render time.
pub fn scan_all<'a, I>(sources: I) -> Vec<ScannedUnit>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    sources
        .into_iter()
        .map(|(path, text)| {
            let unit = gdscript::scan(path, text);
            debug!(
                path,
                declared_type = unit.declared_type.as_deref(),
                members = unit.members.len(),
                "scanned unit"
            );
            unit
        })
        .collect()
}
