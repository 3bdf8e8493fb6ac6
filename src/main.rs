//! nyan - a nyan cat test reporter.
//!
//! This is the main entry point for the nyan CLI tool.

use clap::Parser;
use nyan_reporter::cli::{handle_result, Cli};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `NYAN_LOG=debug`).
const LOG_ENV: &str = "NYAN_LOG";

fn main() -> std::process::ExitCode {
    init_logging();
    let cli = Cli::parse();
    handle_result(cli.execute())
}

/// Log to stderr only when asked to, so diagnostics never interleave with
/// the animation by default.
fn init_logging() {
    if std::env::var_os(LOG_ENV).is_none() {
        return;
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(LOG_ENV))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
