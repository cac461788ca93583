//! Logging setup shared by the sanitizer binaries and tests.

pub mod tracing;
