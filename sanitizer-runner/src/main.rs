//! User sanitizer binary.
//!
//! Fetches user records from the configured endpoint, keeps the valid ones, merges duplicates
//! and writes the sorted result to the configured file.

use std::process::ExitCode;

use sanitizer_config::shared::RunnerConfig;
use sanitizer_telemetry::tracing::init_tracing;
use tracing::error;

use crate::config::load_runner_config;
use crate::core::start_sanitizer_with_config;
use crate::error::{RunnerError, RunnerResult};

mod config;
mod core;
mod error;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", err.render_report());
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration, initializes tracing and runs the pipeline once.
fn run() -> RunnerResult<()> {
    let runner_config = load_runner_config()?;

    let _log_flusher = init_tracing(env!("CARGO_BIN_NAME")).map_err(RunnerError::config)?;

    // A single fetch and a single write, nothing to parallelize.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main(runner_config))
}

async fn async_main(runner_config: RunnerConfig) -> RunnerResult<()> {
    if let Err(err) = start_sanitizer_with_config(runner_config).await {
        error!(category = err.category(), "{err}");

        return Err(err);
    }

    Ok(())
}
