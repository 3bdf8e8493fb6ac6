//! The nyan cat renderer.
//!
//! Every frame paints four rows three times over: the scoreboard, the
//! rainbow trail, then the cat. After each pass the cursor moves back up
//! [`ROWS`] lines, so the frame always ends where it started and the next
//! frame overwrites it in place.

use std::io::{self, Write};

use super::art::{cat_frame, Face, CAT_WIDTH};
use super::rainbow::{generate_palette, Trajectory, PALETTE_LEN};
use super::Reporter;
use crate::config::ReporterOptions;
use crate::results::{AggregatedResult, RunCounters, TestFileResult};
use crate::terminal::{print_failure_details, print_summary, Terminal};

/// Rows in the animation region.
pub const ROWS: usize = 4;

/// Columns taken by the scoreboard to the left of the trail.
pub const SCOREBOARD_WIDTH: u16 = 5;

const ROWS_U16: u16 = ROWS as u16;

/// Mutable animation state for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationState {
    tick: bool,
    color_index: usize,
    trajectories: [Trajectory; ROWS],
}

impl AnimationState {
    /// Fresh state for a terminal `width` columns wide.
    ///
    /// The trail may use three quarters of the width minus the cat.
    pub fn new(width: u16) -> Self {
        let capacity = (usize::from(width) * 3 / 4).saturating_sub(CAT_WIDTH);
        Self {
            tick: false,
            color_index: 0,
            trajectories: std::array::from_fn(|_| Trajectory::new(capacity)),
        }
    }

    /// Gait phase; flips after every frame.
    pub fn tick(&self) -> bool {
        self.tick
    }

    /// Number of rainbow segments colored so far.
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// The trail rows, top to bottom.
    pub fn trajectories(&self) -> &[Trajectory; ROWS] {
        &self.trajectories
    }

    /// Current trail length (identical for every row).
    pub fn trail_len(&self) -> usize {
        self.trajectories[0].len()
    }

    fn append_segment(&mut self, palette: &[u8; PALETTE_LEN], terminal: &Terminal) {
        let glyph = if self.tick { "_" } else { "-" };
        let code = palette[self.color_index % PALETTE_LEN];
        self.color_index = self.color_index.wrapping_add(1);

        let cell = terminal.rainbow(code, glyph);
        for trajectory in &mut self.trajectories {
            trajectory.push(cell.clone());
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Test reporter that draws a nyan cat flying over a rainbow.
///
/// # Example
///
/// ```ignore
/// let mut reporter = NyanReporter::stdout(ReporterOptions::default());
/// reporter.on_run_start(&results)?;
/// reporter.on_test_result(&result, &results)?;
/// reporter.on_run_complete(&results)?;
/// ```
#[derive(Debug)]
pub struct NyanReporter<W: Write> {
    out: W,
    terminal: Terminal,
    options: ReporterOptions,
    palette: [u8; PALETTE_LEN],
    state: AnimationState,
    clock: fn() -> i64,
}

impl NyanReporter<io::Stdout> {
    /// Reporter drawing to stdout with the process's detected capabilities.
    pub fn stdout(options: ReporterOptions) -> Self {
        Self::new(io::stdout(), *Terminal::global(), options)
    }
}

impl<W: Write> NyanReporter<W> {
    /// Reporter drawing to `out`.
    ///
    /// The `color` option is applied on top of the terminal's detected
    /// color support.
    pub fn new(out: W, terminal: Terminal, options: ReporterOptions) -> Self {
        let terminal = terminal.with_colors(options.color.resolve(terminal.colors()));
        Self {
            out,
            terminal,
            options,
            palette: generate_palette(),
            state: AnimationState::new(terminal.width()),
            clock: now_millis,
        }
    }

    /// Replace the clock used to time the run (epoch milliseconds).
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Animation state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Options in effect.
    pub fn options(&self) -> &ReporterOptions {
        &self.options
    }

    /// Terminal capabilities in effect.
    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    /// Borrow the output writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the reporter and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw one complete frame for `counters`.
    pub fn draw_frame(&mut self, counters: &RunCounters) -> io::Result<()> {
        self.state.append_segment(&self.palette, &self.terminal);
        self.draw_scoreboard(counters)?;
        self.draw_rainbow()?;
        self.draw_cat(counters)?;

        self.state.tick = !self.state.tick;
        self.out.flush()
    }

    fn draw_scoreboard(&mut self, counters: &RunCounters) -> io::Result<()> {
        let rows = [
            ("total tests", counters.num_total_tests),
            ("green", counters.num_passed_tests),
            ("fail", counters.num_failed_tests),
            ("pending", counters.num_pending_tests),
        ];
        for (color, count) in rows {
            writeln!(self.out, " {}", self.terminal.format(color, count))?;
        }

        self.terminal.cursor().move_up(&mut self.out, ROWS_U16)
    }

    fn draw_rainbow(&mut self) -> io::Result<()> {
        let cursor = self.terminal.cursor();
        for trajectory in &self.state.trajectories {
            cursor.move_right(&mut self.out, SCOREBOARD_WIDTH)?;
            for cell in trajectory.cells() {
                self.out.write_all(cell.as_bytes())?;
            }
            self.out.write_all(b"\n")?;
        }

        cursor.move_up(&mut self.out, ROWS_U16)
    }

    fn draw_cat(&mut self, counters: &RunCounters) -> io::Result<()> {
        let cursor = self.terminal.cursor();
        let trail = u16::try_from(self.state.trail_len()).unwrap_or(u16::MAX);
        let offset = SCOREBOARD_WIDTH.saturating_add(trail);

        for row in cat_frame(self.state.tick, Face::from_counters(counters)) {
            cursor.move_right(&mut self.out, offset)?;
            writeln!(self.out, "{row}")?;
        }

        cursor.move_up(&mut self.out, ROWS_U16)
    }
}

impl<W: Write> Reporter for NyanReporter<W> {
    fn on_run_start(&mut self, results: &AggregatedResult) -> io::Result<()> {
        tracing::debug!(total = results.counters.num_total_tests, "run started");
        let cursor = self.terminal.cursor();
        cursor.carriage_return(&mut self.out)?;
        cursor.hide(&mut self.out)?;

        if self.options.render_on_run_completely {
            return self.out.flush();
        }
        self.draw_frame(&results.counters)
    }

    fn on_test_result(
        &mut self,
        result: &TestFileResult,
        results: &AggregatedResult,
    ) -> io::Result<()> {
        tracing::trace!(
            path = %result.test_file_path,
            failed = result.failure_message.is_some(),
            "test result"
        );
        if self.options.render_on_run_completely {
            return Ok(());
        }
        self.draw_frame(&results.counters)
    }

    fn on_run_complete(&mut self, results: &AggregatedResult) -> io::Result<()> {
        let counters = &results.counters;
        tracing::debug!(
            passed = counters.num_passed_tests,
            failed = counters.num_failed_tests,
            pending = counters.num_pending_tests,
            total = counters.num_total_tests,
            "run complete"
        );

        self.draw_frame(counters)?;
        self.terminal.cursor().show(&mut self.out)?;
        for _ in 0..ROWS {
            self.out.write_all(b"\n")?;
        }

        print_summary(&self.terminal, &mut self.out, counters, (self.clock)())?;

        if !self.options.suppress_error_reporter {
            print_failure_details(&self.terminal, &mut self.out, results)?;
        }

        self.out.flush()
    }
}
