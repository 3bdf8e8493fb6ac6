//! nyan-reporter - a nyan cat test reporter.
//!
//! Renders test-suite progress as a running cat with a rainbow trail and a
//! pass/fail scoreboard, repainting the same terminal region on every
//! lifecycle callback from the host test runner.
//!
//! The crate is split into a terminal capability layer ([`terminal`]), the
//! animation renderer ([`reporter`]), and adapters that drive the renderer
//! from a host runner ([`events`], [`cli`]).

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod events;
pub mod reporter;
pub mod results;
pub mod terminal;

// Re-export key types for convenience
pub use config::{ColorChoice, ReporterOptions};
pub use reporter::{NyanReporter, Reporter};
pub use results::{AggregatedResult, RunCounters, TestFileResult};
pub use terminal::Terminal;
