mod base;
pub mod http;
pub mod memory;

pub use base::{DEFAULT_FETCH_ERROR_MESSAGE, Source, fetch_error};
