//! Reporter lifecycle and the nyan cat renderer.
//!
//! A host runner drives a [`Reporter`] through three callbacks:
//! `on_run_start`, then `on_test_result` once per finished test unit, then
//! `on_run_complete`. Calls are sequential; `&mut self` enforces that.

mod art;
mod nyan;
mod rainbow;

use std::io;

use crate::results::{AggregatedResult, TestFileResult};

pub use art::{cat_frame, Face, CAT_WIDTH};
pub use nyan::{AnimationState, NyanReporter, ROWS, SCOREBOARD_WIDTH};
pub use rainbow::{generate_palette, Trajectory, PALETTE_LEN};

/// Lifecycle callbacks invoked by a host test runner.
///
/// Errors are output failures; implementations never fail because of the
/// content of the results they are given.
pub trait Reporter {
    /// The run is starting.
    fn on_run_start(&mut self, results: &AggregatedResult) -> io::Result<()>;

    /// A test unit finished; `results` already includes it.
    fn on_test_result(
        &mut self,
        result: &TestFileResult,
        results: &AggregatedResult,
    ) -> io::Result<()>;

    /// The run finished.
    fn on_run_complete(&mut self, results: &AggregatedResult) -> io::Result<()>;
}
