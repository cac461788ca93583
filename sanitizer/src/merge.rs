//! Deduplication of users by identity.
//!
//! Raw records are folded, in source order, into a [`MergedUsers`] accumulator. Records are
//! keyed by [`NormalizedUser::unique_key`]; the first record seen for a key fixes its position,
//! later ones are merged into it with [`OutputRecord::merge`].

use std::borrow::Borrow;
use std::collections::HashMap;

use tracing::debug;

use crate::types::{OutputRecord, RawRecord};
use crate::user::NormalizedUser;

/// Outcome of ingesting a single raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// The record was valid and its key had not been seen before.
    Inserted,
    /// The record was valid and merged into an existing one.
    Merged,
    /// The record was invalid and dropped.
    Skipped,
}

/// Accumulator of deduplicated output records, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct MergedUsers {
    records: Vec<OutputRecord>,
    positions: HashMap<String, usize>,
}

impl MergedUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `raw` and folds it into the accumulator.
    ///
    /// Invalid records leave the accumulator untouched.
    pub fn ingest(&mut self, raw: &RawRecord) -> Ingest {
        let user = NormalizedUser::from_raw(raw);
        if !user.is_valid() {
            debug!(
                first_name = user.first_name(),
                last_name = user.last_name(),
                "skipping invalid user record"
            );

            return Ingest::Skipped;
        }

        let unique_key = user.unique_key();
        let record = user.to_output_record();

        match self.positions.get(&unique_key) {
            Some(&position) => {
                debug!(%unique_key, "merging duplicate user record");
                self.records[position].merge(record);

                Ingest::Merged
            }
            None => {
                self.positions.insert(unique_key, self.records.len());
                self.records.push(record);

                Ingest::Inserted
            }
        }
    }

    /// Returns the record stored for `unique_key`, if any.
    pub fn get(&self, unique_key: &str) -> Option<&OutputRecord> {
        self.positions
            .get(unique_key)
            .map(|&position| &self.records[position])
    }

    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the accumulator, returning the records in first-seen order.
    pub fn into_records(self) -> Vec<OutputRecord> {
        self.records
    }
}

/// Folds `records` into `accumulator` in order and returns it.
pub fn fold_records<I>(mut accumulator: MergedUsers, records: I) -> MergedUsers
where
    I: IntoIterator,
    I::Item: Borrow<RawRecord>,
{
    for record in records {
        accumulator.ingest(record.borrow());
    }

    accumulator
}
