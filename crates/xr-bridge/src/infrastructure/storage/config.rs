//! TOML-based configuration for the bridge.
//!
//! Reads `BridgeConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\XrBridge\config.toml`
//! - Linux:    `~/.config/xrbridge/config.toml` (or `$XDG_CONFIG_HOME`)
//! - macOS:    `~/Library/Application Support/XrBridge/config.toml`
//!
//! ```toml
//! [input]
//! cursor_speed = 1.5
//! keyboard_source = "previous-frame"
//!
//! [display]
//! screen_width = 2560
//! screen_height = 1440
//!
//! [logging]
//! log_level = "debug"
//! ```
//!
//! Every field has a `#[serde(default = "...")]`, so a missing file, a
//! missing section, and a missing key all fall back to the same defaults.
//! Values are checked by [`BridgeConfig::validate`] after parsing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::translate_input::{KeyboardSource, SessionSettings};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is outside its allowed range.
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level bridge configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pointer and keyboard translation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Pointer sensitivity multiplier.  Must be finite and positive.
    #[serde(default = "default_cursor_speed")]
    pub cursor_speed: f32,
    /// Which button snapshot drives the keyboard bindings.
    #[serde(default)]
    pub keyboard_source: KeyboardSource,
}

/// Size of the simulated desktop the pointer moves over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_cursor_speed() -> f32 {
    1.0
}
fn default_screen_width() -> u32 {
    1920
}
fn default_screen_height() -> u32 {
    1080
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            cursor_speed: default_cursor_speed(),
            keyboard_source: KeyboardSource::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl BridgeConfig {
    /// Checks value ranges that the TOML schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = self.input.cursor_speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "input.cursor_speed",
                reason: format!("must be finite and positive, got {speed}"),
            });
        }
        if self.display.screen_width == 0 || self.display.screen_height == 0 {
            return Err(ConfigError::Invalid {
                field: "display",
                reason: format!(
                    "screen must be non-empty, got {}x{}",
                    self.display.screen_width, self.display.screen_height
                ),
            });
        }
        Ok(())
    }

    /// Session settings derived from the `[input]` section.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            sensitivity: self.input.cursor_speed,
            keyboard_source: self.input.keyboard_source,
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(platform_config_dir()
        .ok_or(ConfigError::NoPlatformConfigDir)?
        .join("config.toml"))
}

/// Loads and validates the config at the default path.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<BridgeConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads and validates `BridgeConfig` from `path`, returning the defaults if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if a value is out of range.
pub fn load_config_from(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<BridgeConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => BridgeConfig::default(),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Writes `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &BridgeConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("XrBridge"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("xrbridge"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("XrBridge")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_config_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("xrbridge_test_{}", Uuid::new_v4()))
            .join("config.toml")
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_config_matches_documented_values() {
        // Arrange / Act
        let cfg = BridgeConfig::default();

        // Assert
        assert_eq!(cfg.input.cursor_speed, 1.0);
        assert_eq!(cfg.input.keyboard_source, KeyboardSource::PreviousFrame);
        assert_eq!(cfg.display.screen_width, 1920);
        assert_eq!(cfg.display.screen_height, 1080);
        assert_eq!(cfg.logging.log_level, "info");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: BridgeConfig = toml::from_str("").expect("empty config must parse");
        assert_eq!(cfg, BridgeConfig::default());
    }

    #[test]
    fn test_partial_input_section_keeps_other_defaults() {
        // Arrange
        let toml_str = r#"
[input]
cursor_speed = 2.5
"#;

        // Act
        let cfg: BridgeConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.input.cursor_speed, 2.5);
        assert_eq!(cfg.input.keyboard_source, KeyboardSource::PreviousFrame);
        assert_eq!(cfg.display.screen_width, 1920);
    }

    #[test]
    fn test_keyboard_source_uses_kebab_case() {
        let cfg: BridgeConfig = toml::from_str("[input]\nkeyboard_source = \"current-frame\"\n")
            .expect("deserialize");
        assert_eq!(cfg.input.keyboard_source, KeyboardSource::CurrentFrame);
    }

    #[test]
    fn test_session_settings_follow_input_section() {
        let mut cfg = BridgeConfig::default();
        cfg.input.cursor_speed = 0.5;

        let settings = cfg.session_settings();

        assert_eq!(settings.sensitivity, 0.5);
        assert_eq!(settings.keyboard_source, KeyboardSource::PreviousFrame);
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn test_validate_rejects_non_positive_cursor_speed() {
        for bad in [0.0, -2.0, f32::NAN, f32::INFINITY] {
            let mut cfg = BridgeConfig::default();
            cfg.input.cursor_speed = bad;
            assert!(
                matches!(
                    cfg.validate(),
                    Err(ConfigError::Invalid { field: "input.cursor_speed", .. })
                ),
                "cursor_speed {bad} must be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_zero_screen_dimension() {
        let mut cfg = BridgeConfig::default();
        cfg.display.screen_height = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "display", .. })
        ));
    }

    // ── File access ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_from_missing_file_returns_defaults() {
        let cfg = load_config_from(&temp_config_path()).expect("missing file is not an error");
        assert_eq!(cfg, BridgeConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip_via_temp_dir() {
        // Arrange
        let path = temp_config_path();
        let mut cfg = BridgeConfig::default();
        cfg.input.cursor_speed = 1.75;
        cfg.display.screen_width = 2560;
        cfg.logging.log_level = "debug".to_string();

        // Act
        save_config_to(&path, &cfg).expect("save");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);

        // Cleanup
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_load_config_from_invalid_toml_returns_parse_error() {
        let path = temp_config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_config_from_out_of_range_value_is_rejected() {
        let path = temp_config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[input]\ncursor_speed = -1.0\n").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        // NoPlatformConfigDir is acceptable in a stripped environment.
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("config.toml"), "got {path:?}");
        }
    }
}
