//! Semantic color table and color support detection.

use std::env;
use std::io;

use crossterm::tty::IsTty;

/// SGR foreground codes keyed by semantic name.
pub static SEMANTIC_COLORS: &[(&str, u8)] = &[
    ("total tests", 93),
    ("pass", 90),
    ("fail", 31),
    ("bright pass", 92),
    ("bright fail", 91),
    ("bright yellow", 93),
    ("pending", 36),
    ("suite", 0),
    ("error title", 0),
    ("error message", 31),
    ("error stack", 90),
    ("checkmark", 32),
    ("fast", 90),
    ("medium", 33),
    ("slow", 31),
    ("green", 32),
    ("light", 90),
    ("diff gutter", 90),
    ("diff added", 32),
    ("diff removed", 31),
];

/// Look up the SGR code for a semantic color name.
pub fn color_code(name: &str) -> Option<u8> {
    SEMANTIC_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, code)| code)
}

/// Decide whether stdout should receive colored output.
///
/// Honours `NO_COLOR` (https://no-color.org/), `FORCE_COLOR` and
/// `TERM=dumb` before falling back to whether stdout is a terminal.
pub fn detect_color_support() -> bool {
    color_support_from(
        env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()),
        env::var("FORCE_COLOR").ok().as_deref(),
        env::var("TERM").ok().as_deref(),
        io::stdout().is_tty(),
    )
}

fn color_support_from(
    no_color: bool,
    force_color: Option<&str>,
    term: Option<&str>,
    stdout_tty: bool,
) -> bool {
    if no_color {
        return false;
    }
    if let Some(force) = force_color {
        return !matches!(force, "0" | "false");
    }
    if term == Some("dumb") {
        return false;
    }
    stdout_tty
}
