//! Configuration types for the sanitizer runner.

mod base;
mod runner;
mod sink;
mod source;

pub use base::*;
pub use runner::*;
pub use sink::*;
pub use source::*;
