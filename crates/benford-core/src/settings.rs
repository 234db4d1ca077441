use clap::{CommandFactory, FromArgMatches, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BenfordError, Result};
use crate::models::DEFAULT_DATA_COLUMN;

/// Default upload size cap: 1 MiB.
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Validate delimited data files and compare a numeric column against
/// Benford's first-digit law
#[derive(Parser, Debug, Clone)]
#[command(
    name = "benford-check",
    about = "Validate delimited data files and compare a numeric column against Benford's law",
    version
)]
pub struct Settings {
    /// Files or directories to check
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Header name of the column to analyse
    #[arg(long, default_value = "7_2009")]
    pub column: String,

    /// Input format; `auto` derives it from each file's extension
    #[arg(long, default_value = "auto", value_parser = ["auto", "csv", "txt"])]
    pub format: String,

    /// Maximum accepted file size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    pub max_bytes: u64,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub output: String,

    /// Report data errors without failing the run
    #[arg(long)]
    pub lenient: bool,

    /// Print the rows that survived cleaning
    #[arg(long)]
    pub show_cleaned: bool,

    /// Config file path (defaults to ~/.benford-check/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── FileConfig ─────────────────────────────────────────────────────────────────

/// Operator defaults read from `~/.benford-check/config.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lenient: Option<bool>,
}

impl FileConfig {
    /// Return the default path to the config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".benford-check").join("config.json")
    }

    /// Load the config at `path`.
    ///
    /// A missing file yields `Default`; an unreadable or malformed file is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(BenfordError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content)
            .map_err(|e| BenfordError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write the config to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments and merge them with the config file, CLI winning.
    pub fn load() -> Result<Self> {
        Self::load_impl(std::env::args_os().collect(), &FileConfig::config_path())
    }

    /// Same as [`Settings::load`] with explicit arguments and default config
    /// path, so tests can point at a temporary directory.
    pub fn load_impl(args: Vec<std::ffi::OsString>, default_config: &Path) -> Result<Self> {
        let matches = Settings::command().get_matches_from(args);
        let mut settings =
            Settings::from_arg_matches(&matches).map_err(|e| BenfordError::Config(e.to_string()))?;

        let config = match &settings.config {
            Some(path) if !path.exists() => {
                return Err(BenfordError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => FileConfig::load_from(path)?,
            None => FileConfig::load_from(default_config)?,
        };

        if !is_arg_explicitly_set(&matches, "column") {
            if let Some(v) = config.column {
                settings.column = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "max_bytes") {
            if let Some(v) = config.max_bytes {
                settings.max_bytes = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "output") {
            if let Some(v) = config.output {
                settings.output = v;
            }
        }
        if !settings.lenient {
            settings.lenient = config.lenient.unwrap_or(false);
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings.check()?;
        Ok(settings)
    }

    /// Reject values that can only come from a hand-edited config file.
    fn check(&self) -> Result<()> {
        if self.column.trim().is_empty() {
            return Err(BenfordError::Config("column name must not be empty".into()));
        }
        if self.max_bytes == 0 {
            return Err(BenfordError::Config("max_bytes must be positive".into()));
        }
        if !matches!(self.output.as_str(), "text" | "json") {
            return Err(BenfordError::Config(format!(
                "unknown output format: {}",
                self.output
            )));
        }
        Ok(())
    }

    /// The required column name as raw header bytes.
    pub fn required_column(&self) -> &[u8] {
        self.column.as_bytes()
    }

    /// The dotted extension forced by `--format`, or `None` for `auto`.
    pub fn format_override(&self) -> Option<&'static str> {
        match self.format.as_str() {
            "csv" => Some(".csv"),
            "txt" => Some(".txt"),
            _ => None,
        }
    }

    pub fn is_json_output(&self) -> bool {
        self.output == "json"
    }

    /// `true` when the column was left at the built-in default.
    pub fn uses_default_column(&self) -> bool {
        self.required_column() == DEFAULT_DATA_COLUMN
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
