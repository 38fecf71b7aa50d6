//! Settings, command-line parsing and shared constants
//!
//! Settings are read from an optional JSON file and then overridden by
//! command-line flags. Out-of-range values are repaired here, at the boundary,
//! so the engine only ever sees sizes and delays it supports.

use crate::sequence::Arrangement;
use crate::sorts::{Algorithm, SortOrder};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest sequence with a meaningful step
pub const MIN_ELEMENTS: usize = 2;
/// Largest sequence the UI offers
pub const MAX_ELEMENTS: usize = 100;
/// Size used when none (or an invalid one) is given
pub const DEFAULT_SIZE: usize = 15;
/// Delay between auto-run steps, in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 200;
pub const MAX_DELAY_MS: u64 = 9999;
/// Changes kept for the TUI's changes pane
pub const EVENT_LOG_CAPACITY: usize = 512;

pub const DEFAULT_LOG_FILE: &str = "/tmp/sortty.log";

/// User-facing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of bars
    pub size: usize,
    /// Delay between auto-run steps
    pub delay_ms: u64,
    pub arrangement: Arrangement,
    pub algorithm: Algorithm,
    pub order: SortOrder,
    /// Seed for shuffles and pivot draws; random when absent
    pub seed: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            size: DEFAULT_SIZE,
            delay_ms: DEFAULT_DELAY_MS,
            arrangement: Arrangement::Random,
            algorithm: Algorithm::Bubble,
            order: SortOrder::Ascending,
            seed: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str::<Settings>(text)
            .map(Settings::sanitized)
            .map_err(|e| e.to_string())
    }

    /// Replace out-of-range values with defaults
    pub fn sanitized(mut self) -> Self {
        if !(MIN_ELEMENTS..=MAX_ELEMENTS).contains(&self.size) {
            warn!(
                "Size {} outside {}-{}, using {}",
                self.size, MIN_ELEMENTS, MAX_ELEMENTS, DEFAULT_SIZE
            );
            self.size = DEFAULT_SIZE;
        }
        if self.delay_ms > MAX_DELAY_MS {
            warn!("Delay {}ms too long, clamping to {}ms", self.delay_ms, MAX_DELAY_MS);
            self.delay_ms = MAX_DELAY_MS;
        }
        self
    }
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub settings: Settings,
    /// Run to completion without the TUI and print a summary
    pub headless: bool,
    pub help: bool,
}

/// Parse arguments (without the program name).
///
/// `--config` is applied first wherever it appears, so the other flags always
/// override the file.
pub fn parse_args(args: &[String]) -> Result<CliOptions, ConfigError> {
    let mut settings = Settings::default();
    if let Some(pos) = args.iter().position(|a| a == "--config") {
        let path = args.get(pos + 1).ok_or_else(|| ConfigError::MissingValue {
            flag: "--config".to_string(),
        })?;
        settings = Settings::load(Path::new(path))?;
    }

    let mut options = CliOptions {
        settings,
        headless: false,
        help: false,
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next().ok_or_else(|| ConfigError::MissingValue {
                flag: flag.clone(),
            })
        };
        match flag.as_str() {
            "--config" => {
                value()?;
            }
            "--headless" => options.headless = true,
            "--descending" => options.settings.order = SortOrder::Descending,
            "-h" | "--help" => options.help = true,
            "--size" => options.settings.size = parse_number(flag, value()?)?,
            "--delay" => options.settings.delay_ms = parse_number(flag, value()?)?,
            "--seed" => options.settings.seed = Some(parse_number(flag, value()?)?),
            "--log-file" => options.settings.log_file = PathBuf::from(value()?),
            "--algorithm" => {
                let name = value()?;
                options.settings.algorithm =
                    Algorithm::from_name(name).ok_or_else(|| invalid(flag, name))?;
            }
            "--arrangement" => {
                let name = value()?;
                options.settings.arrangement =
                    Arrangement::from_name(name).ok_or_else(|| invalid(flag, name))?;
            }
            other => return Err(ConfigError::UnknownFlag(other.to_string())),
        }
    }

    options.settings = options.settings.sanitized();
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(flag, value))
}

fn invalid(flag: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

/// Errors reading settings or arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    MissingValue { flag: String },
    InvalidValue { flag: String, value: String },
    UnknownFlag(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "Cannot read settings '{}': {}", path.display(), message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Invalid settings in '{}': {}", path.display(), message)
            }
            ConfigError::MissingValue { flag } => write!(f, "Missing value for {}", flag),
            ConfigError::InvalidValue { flag, value } => {
                write!(f, "Invalid value '{}' for {}", value, flag)
            }
            ConfigError::UnknownFlag(flag) => write!(f, "Unknown option '{}'", flag),
        }
    }
}

impl std::error::Error for ConfigError {}
