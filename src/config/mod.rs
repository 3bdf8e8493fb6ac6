//! Reporter options and their JSON config file.
//!
//! Options come from `.nyan.json` (or an explicit path) and can be
//! overridden from the command line. Keys use the camelCase names host
//! runners pass to reporters; unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

/// Default config file path.
pub const CONFIG_FILE: &str = ".nyan.json";

/// When to emit colored output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Use color when the terminal supports it.
    #[default]
    Auto,
    /// Always emit color codes.
    Always,
    /// Never emit color codes.
    Never,
}

impl ColorChoice {
    /// Resolve against the detected color support.
    pub fn resolve(self, detected: bool) -> bool {
        match self {
            Self::Auto => detected,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Options recognised by the nyan reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReporterOptions {
    /// Skip the failure dump at the end of the run.
    #[serde(deserialize_with = "strict_true")]
    pub suppress_error_reporter: bool,
    /// Draw only once, when the run completes.
    #[serde(deserialize_with = "strict_true")]
    pub render_on_run_completely: bool,
    /// Color output policy.
    #[serde(deserialize_with = "lenient_color")]
    pub color: ColorChoice,
}

/// Error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Error reading the config file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl ReporterOptions {
    /// Load options from a file, or return defaults if the file doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Explicit config path. When `None`, [`CONFIG_FILE`] is tried
    ///   and a missing file yields defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path));
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let options = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), ?options, "loaded config");
        Ok(options)
    }

    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Only a literal `true` enables a flag; any other value means false.
fn strict_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value == serde_json::Value::Bool(true))
}

fn lenient_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ColorChoice, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        Some("auto") => ColorChoice::Auto,
        _ => {
            tracing::warn!(%value, "unrecognised color setting, using auto");
            ColorChoice::Auto
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let options = ReporterOptions::default();
        assert!(!options.suppress_error_reporter);
        assert!(!options.render_on_run_completely);
        assert_eq!(options.color, ColorChoice::Auto);
    }

    #[test]
    fn test_from_json_camel_case() {
        let options = ReporterOptions::from_json(
            r#"{"suppressErrorReporter": true, "renderOnRunCompletely": true, "color": "never"}"#,
        )
        .unwrap();
        assert!(options.suppress_error_reporter);
        assert!(options.render_on_run_completely);
        assert_eq!(options.color, ColorChoice::Never);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let options =
            ReporterOptions::from_json(r#"{"theme": "dark", "renderOnRunCompletely": true}"#)
                .unwrap();
        assert!(options.render_on_run_completely);
        assert!(!options.suppress_error_reporter);
    }

    #[test]
    fn test_only_literal_true_enables_flags() {
        let options = ReporterOptions::from_json(
            r#"{"suppressErrorReporter": "true", "renderOnRunCompletely": 1}"#,
        )
        .unwrap();
        assert!(!options.suppress_error_reporter);
        assert!(!options.render_on_run_completely);
    }

    #[test]
    fn test_bad_color_falls_back_to_auto() {
        let options = ReporterOptions::from_json(r#"{"color": "rainbow"}"#).unwrap();
        assert_eq!(options.color, ColorChoice::Auto);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = ReporterOptions::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("Failed to parse config JSON"));
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nyan.json");
        fs::write(&path, r#"{"suppressErrorReporter": true}"#).unwrap();

        let options = ReporterOptions::load(Some(&path)).unwrap();
        assert!(options.suppress_error_reporter);
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.json");

        let err = ReporterOptions::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_color_choice_resolve() {
        assert!(ColorChoice::Auto.resolve(true));
        assert!(!ColorChoice::Auto.resolve(false));
        assert!(ColorChoice::Always.resolve(false));
        assert!(!ColorChoice::Never.resolve(true));
    }
}
