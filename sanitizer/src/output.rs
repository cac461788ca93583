//! Rendering of the final output document.

use std::cmp::Ordering;

use crate::error::{ErrorKind, SanitizerResult};
use crate::merge::MergedUsers;
use crate::sanitizer_error;
use crate::types::OutputRecord;

/// Sorts records by last name, then by formatted phone.
///
/// A missing phone compares as an empty string, so it sorts before any present phone. The sort
/// is stable: records equal on both keys keep their relative order.
pub fn sort_records(records: &mut [OutputRecord]) {
    records.sort_by(compare_records);
}

fn compare_records(a: &OutputRecord, b: &OutputRecord) -> Ordering {
    a.last_name
        .cmp(&b.last_name)
        .then_with(|| phone_sort_key(a).cmp(phone_sort_key(b)))
}

fn phone_sort_key(record: &OutputRecord) -> &str {
    record.phone.as_deref().unwrap_or_default()
}

/// Renders records as a pretty-printed JSON array.
pub fn render_document(records: &[OutputRecord]) -> SanitizerResult<String> {
    serde_json::to_string_pretty(records).map_err(|err| {
        sanitizer_error!(
            ErrorKind::SerializationError,
            "Failed to render output document",
            err.to_string(),
            source: err
        )
    })
}

/// Parses a document produced by [`render_document`].
pub fn parse_document(document: &str) -> SanitizerResult<Vec<OutputRecord>> {
    Ok(serde_json::from_str(document)?)
}

/// Sorts the accumulated users and renders them.
pub fn build_document(merged: MergedUsers) -> SanitizerResult<String> {
    let mut records = merged.into_records();
    sort_records(&mut records);

    render_document(&records)
}
