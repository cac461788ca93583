//! Configuration loading for the sanitizer runner.

mod environment;
mod load;
pub mod shared;

pub use environment::{Environment, EnvironmentError};
pub use load::{LoadConfigError, load_config, load_config_from};
