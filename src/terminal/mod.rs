//! Terminal capability and output helpers.
//!
//! Capabilities (interactivity, color support, width, glyphs) are resolved
//! once per process by [`Terminal::global`]. Everything that writes escape
//! sequences goes through [`Cursor`] or [`Terminal::format`], which degrade to
//! plain text when the capability is missing.

mod color;
mod cursor;
mod summary;

use std::io;
use std::sync::OnceLock;

use crossterm::tty::IsTty;

pub use color::{color_code, detect_color_support, SEMANTIC_COLORS};
pub use cursor::Cursor;
pub use summary::{format_duration, print_failure_details, print_summary};

/// Width assumed when output is not attached to a terminal.
pub const FALLBACK_WIDTH: u16 = 75;

/// Status symbols used by the summary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Passing marker.
    pub ok: &'static str,
    /// Failing marker.
    pub err: &'static str,
    /// Progress dot.
    pub dot: &'static str,
    /// Separator.
    pub comma: &'static str,
    /// Pending marker.
    pub bang: &'static str,
}

impl Glyphs {
    /// Unicode symbol set.
    pub const UNICODE: Self = Self {
        ok: "✓",
        err: "✖",
        dot: "․",
        comma: ",",
        bang: "!",
    };

    /// Symbol set for consoles with limited font coverage.
    pub const WINDOWS: Self = Self {
        ok: "\u{221A}",
        err: "\u{00D7}",
        dot: ".",
        comma: ",",
        bang: "!",
    };

    /// Symbol set for the current platform.
    pub fn platform() -> Self {
        if cfg!(windows) {
            Self::WINDOWS
        } else {
            Self::UNICODE
        }
    }
}

/// Resolved terminal capabilities.
///
/// Construct with [`Terminal::detect`] for the real process streams, or
/// [`Terminal::new`] for a fixed capability set (headless rendering, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    interactive: bool,
    colors: bool,
    width: u16,
    glyphs: Glyphs,
}

impl Terminal {
    /// Create a terminal with explicit capabilities.
    ///
    /// `width` is ignored when `interactive` is false, matching detection.
    pub fn new(interactive: bool, colors: bool, width: u16) -> Self {
        Self {
            interactive,
            colors,
            width: if interactive { width } else { FALLBACK_WIDTH },
            glyphs: Glyphs::platform(),
        }
    }

    /// Probe the process's stdout/stderr for capabilities.
    pub fn detect() -> Self {
        let interactive = io::stdout().is_tty() && io::stderr().is_tty();
        let width = if interactive {
            crossterm::terminal::size()
                .map(|(cols, _)| cols)
                .unwrap_or(FALLBACK_WIDTH)
        } else {
            FALLBACK_WIDTH
        };
        let terminal = Self {
            interactive,
            colors: detect_color_support(),
            width,
            glyphs: Glyphs::platform(),
        };
        tracing::debug!(
            interactive = terminal.interactive,
            colors = terminal.colors,
            width = terminal.width,
            "detected terminal capabilities"
        );
        terminal
    }

    /// Process-wide capabilities, detected on first use.
    pub fn global() -> &'static Terminal {
        static GLOBAL: OnceLock<Terminal> = OnceLock::new();
        GLOBAL.get_or_init(Self::detect)
    }

    /// Same capabilities with color output forced on or off.
    #[must_use]
    pub fn with_colors(self, colors: bool) -> Self {
        Self { colors, ..self }
    }

    /// Same capabilities with a different glyph set.
    #[must_use]
    pub fn with_glyphs(self, glyphs: Glyphs) -> Self {
        Self { glyphs, ..self }
    }

    /// True when both stdout and stderr are attached to a terminal.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// True when colored output is enabled.
    pub fn colors(&self) -> bool {
        self.colors
    }

    /// Column count, or [`FALLBACK_WIDTH`] when not interactive.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Status symbols for this platform.
    pub fn glyphs(&self) -> Glyphs {
        self.glyphs
    }

    /// Cursor controller bound to this terminal's interactivity.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.interactive)
    }

    /// Wrap `value` in the color mapped from a semantic name.
    ///
    /// Returns the plain value when colors are disabled or the name is not
    /// in [`SEMANTIC_COLORS`].
    pub fn format(&self, name: &str, value: impl std::fmt::Display) -> String {
        match color_code(name) {
            Some(code) if self.colors => format!("\x1b[{code}m{value}\x1b[0m"),
            _ => value.to_string(),
        }
    }

    /// Paint a glyph with an xterm 256-color code.
    pub fn rainbow(&self, code: u8, glyph: &str) -> String {
        if self.colors {
            format!("\x1b[38;5;{code}m{glyph}\x1b[0m")
        } else {
            glyph.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_uses_fallback_width() {
        let terminal = Terminal::new(false, false, 200);
        assert_eq!(terminal.width(), FALLBACK_WIDTH);
        assert!(!terminal.is_interactive());
    }

    #[test]
    fn test_interactive_keeps_width() {
        let terminal = Terminal::new(true, false, 120);
        assert_eq!(terminal.width(), 120);
    }

    #[test]
    fn test_format_without_colors_is_identity() {
        let terminal = Terminal::new(true, false, 80);
        for (name, _) in SEMANTIC_COLORS {
            assert_eq!(terminal.format(name, "x"), "x");
        }
        assert_eq!(terminal.format("pass", 42), "42");
        assert_eq!(terminal.format("no such color", "x"), "x");
    }

    #[test]
    fn test_format_with_colors() {
        let terminal = Terminal::new(true, true, 80);
        assert_eq!(terminal.format("pass", "x"), "\x1b[90mx\x1b[0m");
        assert_eq!(terminal.format("fail", 3), "\x1b[31m3\x1b[0m");
        assert_eq!(terminal.format("pending", "p"), "\x1b[36mp\x1b[0m");
    }

    #[test]
    fn test_format_unknown_name_passes_through() {
        let terminal = Terminal::new(true, true, 80);
        assert_eq!(terminal.format("chartreuse", "x"), "x");
    }

    #[test]
    fn test_rainbow() {
        let colored = Terminal::new(true, true, 80);
        assert_eq!(colored.rainbow(154, "-"), "\x1b[38;5;154m-\x1b[0m");

        let plain = Terminal::new(true, false, 80);
        assert_eq!(plain.rainbow(154, "-"), "-");
    }

    #[test]
    fn test_with_colors_overrides() {
        let terminal = Terminal::new(false, false, 80).with_colors(true);
        assert!(terminal.colors());
        assert_eq!(terminal.format("green", "ok"), "\x1b[32mok\x1b[0m");
    }

    #[test]
    fn test_glyph_sets() {
        assert_eq!(Glyphs::UNICODE.ok, "✓");
        assert_eq!(Glyphs::UNICODE.err, "✖");
        assert_eq!(Glyphs::WINDOWS.dot, ".");
        let terminal = Terminal::new(false, false, 0).with_glyphs(Glyphs::WINDOWS);
        assert_eq!(terminal.glyphs(), Glyphs::WINDOWS);
    }

    #[test]
    fn test_global_is_stable() {
        assert_eq!(Terminal::global(), Terminal::global());
    }
}
