//! Configuration for the gauge widget
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/gaugemon/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

use crate::gauge::{GaugeSpec, DEFAULT_DANGER, DEFAULT_PRECISION, DEFAULT_WARNING};

mod serialization;


/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Widget Settings
// ─────────────────────────────────────────────────────────────────────────────

/// The gauge widget's settings, as the dashboard editor would supply
/// them. Thresholds are percentages (0-100) here; they are divided by
/// 100 when compared against the gauge's fill fraction.
#[derive(Debug, Clone)]
pub struct WidgetSettings {
    /// Query expression; empty means "poll nothing" (silent no-op)
    pub expression: String,
    /// Refresh interval in seconds; 0 falls back to 1s in the scheduler
    pub refresh: u64,
    /// Visible time range, e.g. "1h"
    pub range: String,
    /// Gauge maximum (required for a meaningful fill fraction)
    pub max: f64,
    /// Optional units suffix for the label
    pub units: Option<String>,
    /// Warning threshold, percent of max (0-100)
    pub warning: f64,
    /// Danger threshold, percent of max (0-100)
    pub danger: f64,
    /// Decimal digits in the label
    pub precision: usize,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            expression: String::new(),
            refresh: 30,
            range: "1h".to_string(),
            max: 100.0,
            units: None,
            warning: DEFAULT_WARNING * 100.0,
            danger: DEFAULT_DANGER * 100.0,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl WidgetSettings {
    /// Build the render spec for a given scalar. Percent thresholds
    /// become fractions here, once, so the gauge math never sees 0-100.
    pub fn gauge_spec(&self, value: f64) -> GaugeSpec {
        GaugeSpec {
            value,
            max: self.max,
            warning: self.warning / 100.0,
            danger: self.danger / 100.0,
            precision: self.precision,
            units: self.units.clone(),
            thickness: None,
        }
    }
}

/// `[widget]` section as loaded from the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileWidget {
    pub expression: Option<String>,
    pub refresh: Option<u64>,
    pub range: Option<String>,
    pub max: Option<f64>,
    pub units: Option<String>,
    pub warning: Option<f64>,
    pub danger: Option<f64>,
    pub precision: Option<usize>,
}

impl WidgetSettings {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileWidget>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            expression: file.expression.unwrap_or(defaults.expression),
            refresh: file.refresh.unwrap_or(defaults.refresh),
            range: file.range.unwrap_or(defaults.range),
            max: file.max.unwrap_or(defaults.max),
            units: file.units.or(defaults.units),
            warning: file.warning.unwrap_or(defaults.warning),
            danger: file.danger.unwrap_or(defaults.danger),
            precision: file.precision.unwrap_or(defaults.precision),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "never" => Self::Never,
            _ => Self::Daily,
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to TUI buffer or stdout)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "gaugemon".to_string(),
        }
    }
}

/// `[logging]` section as loaded from the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::from_str(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the query server; empty disables polling
    pub server_url: String,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Demo mode: generate a synthetic scalar wave instead of polling
    pub demo_mode: bool,

    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Gauge widget settings
    pub widget: WidgetSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:9090".to_string(),
            enable_tui: true,
            demo_mode: false,
            theme: "dark".to_string(),
            widget: WidgetSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub server_url: Option<String>,
    pub theme: Option<String>,

    /// Optional [widget] section
    pub widget: Option<FileWidget>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/gaugemon/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("gaugemon").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let template = Self::default().to_toml();

        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be parsed is fatal - the
    /// user should fix it rather than debug a silently ignored file.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Failed to parse config file {}:\n  {}", path.display(), e);
                    eprintln!("To reset, delete the file and restart gaugemon.");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("Cannot read config file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::from_sources(file)
    }

    /// Merge file config with environment overrides. Split out of
    /// [`Config::from_env`] so tests can feed a FileConfig directly.
    pub(crate) fn from_sources(file: FileConfig) -> Self {
        let defaults = Self::default();

        // Server URL: env > file > default
        let server_url = std::env::var("GAUGEMON_SERVER")
            .ok()
            .or(file.server_url)
            .unwrap_or(defaults.server_url);

        // TUI toggle: env only (runtime flag)
        let enable_tui = std::env::var("GAUGEMON_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Demo mode: env only (runtime flag)
        let demo_mode = std::env::var("GAUGEMON_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        // Theme: env > file > default
        let theme = std::env::var("GAUGEMON_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let mut widget = WidgetSettings::from_file(file.widget);

        // Expression and refresh get env overrides for quick one-off runs
        if let Ok(expression) = std::env::var("GAUGEMON_EXPR") {
            widget.expression = expression;
        }
        if let Some(refresh) = std::env::var("GAUGEMON_REFRESH")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            widget.refresh = refresh;
        }

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            server_url,
            enable_tui,
            demo_mode,
            theme,
            widget,
            logging,
        }
    }
}
