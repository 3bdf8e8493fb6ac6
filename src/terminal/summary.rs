//! End-of-run summary and failure dump.

use std::io::{self, Write};

use super::Terminal;
use crate::results::{AggregatedResult, RunCounters};

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;

/// Units from smallest to largest, in milliseconds.
const UNITS: [(f64, &str); 4] = [(SECOND, "s"), (MINUTE, "m"), (HOUR, "h"), (DAY, "d")];

/// Round to one decimal place.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Render a millisecond duration compactly: `850ms`, `1.2s`, `3m`, `1.5h`.
///
/// A value that rounds up to the next unit is shown in that unit, so
/// `59_950` is `1m` rather than `60s`.
pub fn format_duration(millis: u64) -> String {
    if millis < 1_000 {
        return format!("{millis}ms");
    }

    #[allow(clippy::cast_precision_loss)]
    let millis = millis as f64;
    let mut index = UNITS
        .iter()
        .rposition(|&(size, _)| millis >= size)
        .unwrap_or(0);
    let mut rounded = round_tenths(millis / UNITS[index].0);
    while index + 1 < UNITS.len() && rounded * UNITS[index].0 >= UNITS[index + 1].0 {
        index += 1;
        rounded = round_tenths(millis / UNITS[index].0);
    }

    let unit = UNITS[index].1;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}{unit}")
    } else {
        format!("{rounded:.1}{unit}")
    }
}

/// Print the totals block shown after the animation.
///
/// `now` is the completion time in epoch milliseconds.
pub fn print_summary<W: Write + ?Sized>(
    terminal: &Terminal,
    out: &mut W,
    counters: &RunCounters,
    now: i64,
) -> io::Result<()> {
    let glyphs = terminal.glyphs();
    let duration = format_duration(counters.elapsed_millis(now));

    writeln!(out)?;
    writeln!(
        out,
        "{}{}",
        terminal.format("total tests", format!("   {} total", counters.num_total_tests)),
        terminal.format("light", format!(" ({duration}) "))
    )?;
    writeln!(
        out,
        "{}{}",
        terminal.format("bright pass", format!("   {}", glyphs.ok)),
        terminal.format("green", format!(" {} passing", counters.num_passed_tests))
    )?;

    if counters.num_failed_tests > 0 {
        writeln!(
            out,
            "{}",
            terminal.format(
                "fail",
                format!("   {} {} failing ", glyphs.err, counters.num_failed_tests)
            )
        )?;
    }

    if counters.num_pending_tests > 0 {
        writeln!(
            out,
            "{}{}",
            terminal.format("pending", format!("   {}", glyphs.bang)),
            terminal.format("pending", format!(" {} pending", counters.num_pending_tests))
        )?;
    }

    writeln!(out)?;

    if counters.num_total_tests == counters.num_passed_tests {
        writeln!(
            out,
            "{}",
            terminal.format("bright pass", format!("   {}  All Tests Passed", glyphs.ok))
        )?;
    }

    Ok(())
}

/// Dump the failure text of every result that carries one.
///
/// Prints nothing when no result has a failure message.
pub fn print_failure_details<W: Write + ?Sized>(
    terminal: &Terminal,
    out: &mut W,
    results: &AggregatedResult,
) -> io::Result<()> {
    let messages: Vec<&str> = results
        .test_results
        .iter()
        .filter_map(|result| result.failure_message.as_deref())
        .filter(|message| !message.is_empty())
        .collect();

    if messages.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        terminal.format("bright fail", format!("  {} Failed Tests:", terminal.glyphs().err))
    )?;
    writeln!(out, "\n")?;

    for message in messages {
        writeln!(out, "{message}")?;
    }

    out.write_all(b"\n")
}
