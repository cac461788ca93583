use sanitizer::pipeline::{Pipeline, PipelineSummary};
use sanitizer::sink::file::FileSink;
use sanitizer::source::http::HttpSource;
use sanitizer_config::shared::{RunnerConfig, RunnerConfigWithoutSecrets};
use tracing::{debug, info};

use crate::error::RunnerResult;

/// Runs the sanitizer once against the configured endpoint and output file.
pub async fn start_sanitizer_with_config(
    runner_config: RunnerConfig,
) -> RunnerResult<PipelineSummary> {
    info!("starting user sanitizer");

    log_config(&runner_config);

    let source = HttpSource::new(
        runner_config.source.url.clone(),
        runner_config.source.bearer_token.clone(),
        runner_config.source.timeout(),
    )?;
    let sink = FileSink::new(runner_config.sink.path.clone());

    let pipeline = Pipeline::new(source, sink);
    let summary = pipeline.run().await?;

    info!(
        path = %pipeline.sink().path().display(),
        written_records = summary.written_records,
        "user sanitizer finished"
    );

    Ok(summary)
}

fn log_config(config: &RunnerConfig) {
    let config = RunnerConfigWithoutSecrets::from(config.clone());

    debug!(
        url = %config.source.url,
        timeout_ms = config.source.timeout_ms,
        "using http source config"
    );
    debug!(path = %config.sink.path.display(), "using file sink config");
}
