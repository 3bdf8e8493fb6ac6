//! CLI arguments and the `nyan` command.
//!
//! This module contains the clap CLI definition and wires the config,
//! the libtest event adapter and the renderer together.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::config::{ColorChoice, ReporterOptions};
use crate::events;
use crate::reporter::{NyanReporter, ROWS};
use crate::terminal::{Cursor, Terminal};

/// Nyan cat test reporter.
///
/// Reads libtest JSON events and draws a nyan cat flying over a rainbow
/// while your tests run.
#[derive(Parser, Debug)]
#[command(name = "nyan")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(after_help = "Example:\n  cargo test -- -Z unstable-options --format json | nyan")]
pub struct Cli {
    /// Event file to read (default: stdin).
    pub input: Option<PathBuf>,

    /// Path to a JSON config file (default: .nyan.json if present).
    #[arg(short, long, env = "NYAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Don't print failure messages after the summary.
    #[arg(long)]
    pub suppress_error_reporter: bool,

    /// Only draw once, when the run completes.
    #[arg(long)]
    pub render_on_run_completely: bool,

    /// When to use colors.
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,
}

impl Cli {
    /// Merge config-file options with command-line overrides.
    pub fn options(&self) -> Result<ReporterOptions, crate::config::ConfigError> {
        let mut options = ReporterOptions::load(self.config.as_deref())?;
        options.suppress_error_reporter |= self.suppress_error_reporter;
        options.render_on_run_completely |= self.render_on_run_completely;
        if let Some(color) = self.color {
            options.color = color;
        }
        Ok(options)
    }

    /// Run the reporter over the input stream.
    ///
    /// Exits with failure when any test failed.
    pub fn execute(&self) -> anyhow::Result<ExitCode> {
        let options = self.options().context("Failed to load reporter options")?;
        install_interrupt_handler();

        let input: Box<dyn BufRead> = match &self.input {
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
            )),
            None => Box::new(io::stdin().lock()),
        };

        let reporter = NyanReporter::stdout(options);
        let (_, results) = events::run(input, reporter, || chrono::Utc::now().timestamp_millis())?;

        if results.counters.num_failed_tests > 0 {
            Ok(ExitCode::FAILURE)
        } else {
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Restore the cursor if the run is interrupted mid-animation.
fn install_interrupt_handler() {
    let result = ctrlc::set_handler(|| {
        let mut stdout = io::stdout();
        let _ = restore_terminal(Terminal::global().cursor(), &mut stdout);
        std::process::exit(130);
    });
    if let Err(e) = result {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }
}

/// Show the cursor and move below the animation rows.
fn restore_terminal<W: Write>(cursor: Cursor, out: &mut W) -> io::Result<()> {
    cursor.show(out)?;
    for _ in 0..ROWS {
        writeln!(out)?;
    }
    out.flush()
}

/// Print an error and turn it into a failing exit code.
pub fn handle_result(result: anyhow::Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "nyan",
            "--suppress-error-reporter",
            "--render-on-run-completely",
            "--color",
            "never",
            "events.json",
        ]);
        assert!(cli.suppress_error_reporter);
        assert!(cli.render_on_run_completely);
        assert_eq!(cli.color, Some(ColorChoice::Never));
        assert_eq!(cli.input, Some(PathBuf::from("events.json")));
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nyan.json");
        fs::write(&path, r#"{"suppressErrorReporter": true, "color": "always"}"#).unwrap();

        let cli = Cli::parse_from([
            "nyan",
            "--config",
            path.to_str().unwrap(),
            "--render-on-run-completely",
            "--color",
            "never",
        ]);
        let options = cli.options().unwrap();
        assert!(options.suppress_error_reporter);
        assert!(options.render_on_run_completely);
        assert_eq!(options.color, ColorChoice::Never);
    }

    #[test]
    fn test_missing_config_is_error() {
        let cli = Cli::parse_from(["nyan", "--config", "/definitely/not/here.json"]);
        assert!(cli.options().is_err());
    }

    #[test]
    fn test_restore_terminal_clears_animation_rows() {
        let mut out = Vec::new();
        restore_terminal(Cursor::new(true), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?25h\n\n\n\n");

        let mut out = Vec::new();
        restore_terminal(Cursor::new(false), &mut out).unwrap();
        assert_eq!(out, b"\n".repeat(ROWS));
    }

    #[test]
    fn test_handle_result() {
        assert_eq!(handle_result(Ok(ExitCode::SUCCESS)), ExitCode::SUCCESS);
        assert_eq!(
            handle_result(Err(anyhow::anyhow!("boom"))),
            ExitCode::FAILURE
        );
    }
}
