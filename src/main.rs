use std::io;

use tracing_subscriber::EnvFilter;

use timer_overhead::{preflight, Config, Runner};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::default();
    preflight::run_all_checks(&config);

    let runner = Runner::new(config);
    match runner.run(&mut io::stdout().lock()) {
        Ok(report) => {
            if let Some(e) = report.first_error() {
                tracing::warn!("some measurements were unavailable: {}", e);
            }
        }
        Err(e) => tracing::error!("failed to write report: {}", e),
    }
}
