//! libtest JSON event adapter.
//!
//! Turns the line-delimited JSON emitted by
//! `cargo test -- -Z unstable-options --format json` into reporter
//! lifecycle calls. Lines that are not libtest events (cargo's own
//! progress output, blank lines) are skipped.

use std::io::{self, BufRead};

use serde::Deserialize;

use crate::reporter::Reporter;
use crate::results::{AggregatedResult, TestFileResult};

/// Error type for driving a reporter from an event stream.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Reading the event stream failed.
    #[error("Failed to read test events: {0}")]
    Read(#[source] io::Error),
    /// The reporter could not write its output.
    #[error("Failed to render: {0}")]
    Render(#[source] io::Error),
}

/// One line of libtest JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LibtestEvent {
    /// Suite-level event (`started`, `ok`, `failed`).
    Suite {
        /// Event name.
        event: String,
        /// Number of tests in the suite, on `started`.
        #[serde(default)]
        test_count: Option<u32>,
    },
    /// Test-level event (`started`, `ok`, `failed`, `ignored`, `timeout`).
    Test {
        /// Event name.
        event: String,
        /// Fully qualified test name.
        #[serde(default)]
        name: String,
        /// Captured output, on `failed`.
        #[serde(default)]
        stdout: Option<String>,
        /// Failure reason, when libtest provides one.
        #[serde(default)]
        message: Option<String>,
    },
    /// Benchmarks, reports and anything newer.
    #[serde(other)]
    Other,
}

impl LibtestEvent {
    /// Parse a single line; `None` if it is not a libtest event.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('{') {
            return None;
        }
        match serde_json::from_str(line) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::debug!(error = %e, line, "skipping unparseable event");
                None
            }
        }
    }
}

/// Feeds libtest events to a reporter while keeping the aggregate counters.
pub struct EventAdapter<R: Reporter> {
    reporter: R,
    results: AggregatedResult,
    started: bool,
    clock: fn() -> i64,
}

impl<R: Reporter> EventAdapter<R> {
    /// Adapter driving `reporter`, timing the run with `clock` (epoch ms).
    pub fn new(reporter: R, clock: fn() -> i64) -> Self {
        Self {
            reporter,
            results: AggregatedResult::default(),
            started: false,
            clock,
        }
    }

    /// Aggregate results so far.
    pub fn results(&self) -> &AggregatedResult {
        &self.results
    }

    /// Process one line of input.
    pub fn feed_line(&mut self, line: &str) -> io::Result<()> {
        match LibtestEvent::parse(line) {
            Some(event) => self.handle(event),
            None => Ok(()),
        }
    }

    /// Process one event.
    pub fn handle(&mut self, event: LibtestEvent) -> io::Result<()> {
        match event {
            LibtestEvent::Suite { event, test_count } if event == "started" => {
                let count = test_count.unwrap_or(0);
                self.results.counters.num_total_tests =
                    self.results.counters.num_total_tests.saturating_add(count);
                self.ensure_started()
            }
            LibtestEvent::Test {
                event,
                name,
                stdout,
                message,
            } => {
                let counters = &mut self.results.counters;
                let result = match event.as_str() {
                    "ok" => {
                        counters.num_passed_tests += 1;
                        TestFileResult::passed(name)
                    }
                    "failed" => {
                        counters.num_failed_tests += 1;
                        let detail = failure_text(&name, stdout.as_deref(), message.as_deref());
                        TestFileResult::failed(name, detail)
                    }
                    "ignored" => {
                        counters.num_pending_tests += 1;
                        TestFileResult::passed(name)
                    }
                    _ => return Ok(()),
                };
                self.ensure_started()?;
                self.results.test_results.push(result);
                let results = &self.results;
                let latest = &results.test_results[results.test_results.len() - 1];
                self.reporter.on_test_result(latest, results)
            }
            _ => Ok(()),
        }
    }

    /// Complete the run and hand back the reporter and final results.
    ///
    /// A run that never saw a suite start is started here so at least one
    /// frame is drawn.
    pub fn finish(mut self) -> io::Result<(R, AggregatedResult)> {
        self.ensure_started()?;
        self.reporter.on_run_complete(&self.results)?;
        Ok((self.reporter, self.results))
    }

    fn ensure_started(&mut self) -> io::Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        self.results.counters.start_time = (self.clock)();
        tracing::debug!(start_time = self.results.counters.start_time, "starting run");
        self.reporter.on_run_start(&self.results)
    }
}

fn failure_text(name: &str, stdout: Option<&str>, message: Option<&str>) -> String {
    let mut text = format!("  ● {name}");
    for part in [message, stdout].into_iter().flatten() {
        let part = part.trim_end();
        if !part.is_empty() {
            text.push_str("\n\n");
            text.push_str(part);
        }
    }
    text
}

/// Drive `reporter` with every event read from `input` until end of input.
///
/// Invalid UTF-8 is replaced rather than rejected. On a read error the run
/// is still completed before the error is returned.
pub fn run<B: BufRead, R: Reporter>(
    input: B,
    reporter: R,
    clock: fn() -> i64,
) -> Result<(R, AggregatedResult), EventError> {
    let mut adapter = EventAdapter::new(reporter, clock);
    for line in input.split(b'\n') {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                // Leave the terminal usable before reporting the read failure.
                adapter.finish().map_err(EventError::Render)?;
                return Err(EventError::Read(e));
            }
        };
        adapter
            .feed_line(&String::from_utf8_lossy(&line))
            .map_err(EventError::Render)?;
    }
    adapter.finish().map_err(EventError::Render)
}
