//! Validation, deduplication and rendering of user records.
//!
//! A run fetches raw records from a [`source::Source`], normalizes and validates each one with
//! the [`user`] model, folds the valid ones into a deduplicated [`merge::MergedUsers`]
//! accumulator, renders the sorted result with [`output`] and hands the document to a
//! [`sink::Sink`]. [`pipeline::Pipeline`] wires these steps together.

pub mod error;
mod macros;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod types;
pub mod user;
