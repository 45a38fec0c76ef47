// Configuration for the gallery
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/photofall/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

use crate::gallery::DEFAULT_PAGE_SIZE;
use crate::source::picsum::DEFAULT_API_URL;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The listing endpoint rejects limits above this; anything larger would
/// silently change the page arithmetic mid-session.
const MAX_PAGE_SIZE: u32 = 100;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Also write logs to daily-rotated files
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing endpoint base URL
    pub api_url: String,

    /// Entries requested per page
    pub page_size: u32,

    /// Theme name: "Dark", "Light", "Nord"
    pub theme: String,

    /// Demo mode: serve a built-in offline catalog instead of the endpoint
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api_url: Option<String>,
    page_size: Option<u32>,
    theme: Option<String>,
    demo_mode: Option<bool>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/photofall/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("photofall").join("config.toml"))
    }

    /// Create config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# photofall configuration
# Uncomment and modify options as needed

# Theme: Dark, Light, Nord (press 't' in the TUI to cycle)
# theme = "Dark"

# Listing endpoint base URL (default: https://picsum.photos)
# api_url = "https://picsum.photos"

# Entries requested per page, 1-100 (default: 30)
# page_size = 30

# Demo mode: browse a built-in offline catalog (default: false)
# demo_mode = false

# Logging configuration
# [logging]
# level = "info"        # trace, debug, info, warn, error (RUST_LOG env var overrides this)
# file_enabled = false  # Also write logs to daily-rotated files
# file_dir = "./logs"   # Directory for log files
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# photofall configuration

# Theme: Dark, Light, Nord (press 't' in the TUI to cycle)
theme = "{theme}"

# Listing endpoint base URL
api_url = "{api_url}"

# Entries requested per page, 1-100
page_size = {page_size}

# Demo mode: browse a built-in offline catalog
demo_mode = {demo}

# Logging configuration (RUST_LOG env var overrides the level)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
"#,
            theme = self.theme,
            api_url = self.api_url,
            page_size = self.page_size,
            demo = self.demo_mode,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // API URL: env > file > default
        let api_url = std::env::var("PHOTOFALL_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Page size: env > file > default, clamped to what the endpoint accepts
        let page_size = std::env::var("PHOTOFALL_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        // Theme: env > file > default
        let theme = std::env::var("PHOTOFALL_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "Dark".to_string());

        // Demo mode: env > file > default
        let demo_mode = std::env::var("PHOTOFALL_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .ok()
            .or(file.demo_mode)
            .unwrap_or(false);

        // Logging settings: file config only (RUST_LOG env var handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.level),
            file_enabled: file_logging.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
        };

        Self {
            api_url,
            page_size,
            theme,
            demo_mode,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            theme: "Dark".to_string(),
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}
