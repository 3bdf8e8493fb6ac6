//! Run snapshots supplied by the host test runner.
//!
//! Counters are deserialized leniently: a missing, null, negative or
//! non-numeric value becomes zero instead of failing the whole snapshot.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Aggregate pass/fail/pending counts for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunCounters {
    /// Tests that passed so far.
    #[serde(deserialize_with = "lenient_count")]
    pub num_passed_tests: u32,
    /// Tests that failed so far.
    #[serde(deserialize_with = "lenient_count")]
    pub num_failed_tests: u32,
    /// Tests skipped or marked pending so far.
    #[serde(deserialize_with = "lenient_count")]
    pub num_pending_tests: u32,
    /// Total tests known to the runner.
    #[serde(deserialize_with = "lenient_count")]
    pub num_total_tests: u32,
    /// Run start as milliseconds since the Unix epoch; 0 when unknown.
    #[serde(deserialize_with = "lenient_millis")]
    pub start_time: i64,
}

impl RunCounters {
    /// Milliseconds elapsed between `start_time` and `now`.
    ///
    /// Zero when the start time is unknown or in the future.
    pub fn elapsed_millis(&self, now: i64) -> u64 {
        if self.start_time <= 0 {
            return 0;
        }
        u64::try_from(now.saturating_sub(self.start_time)).unwrap_or(0)
    }
}

/// Outcome of a single test file (or a single test for runners without files).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestFileResult {
    /// Path or name identifying the test unit.
    pub test_file_path: String,
    /// Rendered failure output, if the unit failed.
    pub failure_message: Option<String>,
}

impl TestFileResult {
    /// A passing (or skipped) result.
    pub fn passed(path: impl Into<String>) -> Self {
        Self {
            test_file_path: path.into(),
            failure_message: None,
        }
    }

    /// A failing result carrying its failure text.
    pub fn failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            test_file_path: path.into(),
            failure_message: Some(message.into()),
        }
    }
}

/// Counters plus every per-file result seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregatedResult {
    /// Aggregate counts.
    #[serde(flatten)]
    pub counters: RunCounters,
    /// Per-file results in completion order.
    pub test_results: Vec<TestFileResult>,
}

impl AggregatedResult {
    /// Empty results for a run starting at `start_time`.
    pub fn started_at(start_time: i64) -> Self {
        Self {
            counters: RunCounters {
                start_time,
                ..RunCounters::default()
            },
            test_results: Vec::new(),
        }
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(coerce_number)
        .map_or(0, |n| u32::try_from(n.max(0)).unwrap_or(u32::MAX)))
}

fn lenient_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_number).unwrap_or(0).max(0))
}

fn coerce_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
