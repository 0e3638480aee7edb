//! Configuration types for the dashboard.
//!
//! Settings are merged from the system file, the user file and environment
//! variables, in that order. Problems are collected as warnings and shown in
//! the status bar unless `NODESCALE_STRICT_CONFIG` is set.

use serde::{Deserialize, Serialize};

/// Dashboard configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TuiConfig {
    pub display: DisplayConfig,

    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme name ("dark" or "light")
    pub theme: String,

    /// View shown on startup ("clusters" or "schedules")
    pub default_view: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            default_view: "clusters".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// How long a notification stays on screen
    pub toast_seconds: u64,

    /// Tick interval driving toast expiry
    pub tick_millis: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            toast_seconds: 3,
            tick_millis: 250,
        }
    }
}

const MIN_TOAST_SECONDS: u64 = 1;

/// Faster ticks only burn CPU redrawing an unchanged screen
const MIN_TICK_MILLIS: u64 = 50;

const STRICT_HINT: &str = "(NODESCALE_STRICT_CONFIG is set - config errors are fatal)";

#[derive(Clone, Copy)]
enum BehaviorField {
    ToastSeconds,
    TickMillis,
}

impl BehaviorField {
    const fn as_str(self) -> &'static str {
        match self {
            Self::ToastSeconds => "toast_seconds",
            Self::TickMillis => "tick_millis",
        }
    }

    const fn unit(self) -> &'static str {
        match self {
            Self::ToastSeconds => "second(s)",
            Self::TickMillis => "millisecond(s)",
        }
    }
}

/// Check a value against its minimum.
/// Non-strict mode resets it to the default and records a warning.
fn validate_minimum(
    value: &mut u64,
    field: BehaviorField,
    min: u64,
    default: u64,
    strict: bool,
    warnings: &mut Vec<String>,
) -> Result<(), String> {
    if *value < min {
        let msg = format!(
            "behavior.{} must be at least {min} {}, got {value}",
            field.as_str(),
            field.unit()
        );
        if strict {
            return Err(msg);
        }
        warnings.push(format!("{msg} - using default ({default})"));
        *value = default;
    }
    Ok(())
}

impl BehaviorConfig {
    /// Validate behavior values, returning warnings for corrected entries.
    /// In strict mode the first invalid value is an error.
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();
        let defaults = Self::default();

        validate_minimum(
            &mut self.toast_seconds,
            BehaviorField::ToastSeconds,
            MIN_TOAST_SECONDS,
            defaults.toast_seconds,
            strict,
            &mut warnings,
        )?;

        validate_minimum(
            &mut self.tick_millis,
            BehaviorField::TickMillis,
            MIN_TICK_MILLIS,
            defaults.tick_millis,
            strict,
            &mut warnings,
        )?;

        Ok(warnings)
    }
}

impl DisplayConfig {
    /// Unknown names fall back to the defaults with a warning
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();
        let defaults = Self::default();

        if !matches!(self.theme.to_lowercase().as_str(), "dark" | "light") {
            let msg = format!("display.theme must be 'dark' or 'light', got '{}'", self.theme);
            if strict {
                return Err(msg);
            }
            warnings.push(format!("{msg} - using default ({})", defaults.theme));
            self.theme = defaults.theme.clone();
        }

        if !matches!(
            self.default_view.to_lowercase().as_str(),
            "clusters" | "schedules"
        ) {
            let msg = format!(
                "display.default_view must be 'clusters' or 'schedules', got '{}'",
                self.default_view
            );
            if strict {
                return Err(msg);
            }
            warnings.push(format!("{msg} - using default ({})", defaults.default_view));
            self.default_view = defaults.default_view;
        }

        Ok(warnings)
    }
}

impl TuiConfig {
    /// Get the user config file path, respecting XDG_CONFIG_HOME
    ///
    /// Resolution order:
    /// 1. $XDG_CONFIG_HOME/nodescale/config.toml
    /// 2. $HOME/.config/nodescale/config.toml
    /// 3. dirs::config_dir()/nodescale/config.toml
    #[must_use]
    pub fn user_config_path() -> Option<std::path::PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(std::path::PathBuf::from(xdg_config).join("nodescale/config.toml"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Some(std::path::PathBuf::from(home).join(".config/nodescale/config.toml"));
        }

        dirs::config_dir().map(|dir| dir.join("nodescale/config.toml"))
    }

    /// Load configuration from files and environment.
    /// Returns the config and any warnings encountered during loading.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let strict = Self::is_strict_mode();

        Self::load_config_file(&mut config, "/etc/nodescale/config.toml", &mut warnings);

        if let Some(user_path) = Self::user_config_path() {
            Self::load_config_file(&mut config, &user_path.to_string_lossy(), &mut warnings);
        }

        config.apply_env_overrides(&mut warnings);

        match config.validate(strict) {
            Ok(validation_warnings) => warnings.extend(validation_warnings),
            Err(err) => {
                eprintln!("Error: {err}");
                eprintln!("{STRICT_HINT}");
                std::process::exit(1);
            }
        }

        for warning in &warnings {
            tracing::warn!(%warning, "configuration");
        }

        (config, warnings)
    }

    /// Validate every section
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, String> {
        let mut warnings = self.display.validate(strict)?;
        warnings.extend(self.behavior.validate(strict)?);
        Ok(warnings)
    }

    /// Parse a config document without touching the filesystem
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn is_strict_mode() -> bool {
        std::env::var("NODESCALE_STRICT_CONFIG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Missing files are silently skipped; anything else becomes a warning
    fn load_config_file(config: &mut Self, path: &str, warnings: &mut Vec<String>) {
        let strict = Self::is_strict_mode();

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(parsed) => *config = parsed,
                Err(e) => {
                    let msg = format!("Config parse error in '{path}': {e}");
                    if strict {
                        eprintln!("Error: {msg}");
                        eprintln!("{STRICT_HINT}");
                        std::process::exit(1);
                    }
                    warnings.push(msg);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                let msg = format!("Could not read config '{path}': {e}");
                if strict {
                    eprintln!("Error: {msg}");
                    eprintln!("{STRICT_HINT}");
                    std::process::exit(1);
                }
                warnings.push(msg);
            }
        }
    }

    fn apply_env_overrides(&mut self, warnings: &mut Vec<String>) {
        let strict = Self::is_strict_mode();

        if let Ok(val) = std::env::var("NODESCALE_THEME") {
            self.display.theme = val;
        }
        if let Ok(val) = std::env::var("NODESCALE_DEFAULT_VIEW") {
            self.display.default_view = val;
        }

        if let Ok(val) = std::env::var("NODESCALE_TOAST_SECONDS") {
            match val.parse::<u64>() {
                Ok(secs) if secs >= MIN_TOAST_SECONDS => self.behavior.toast_seconds = secs,
                Ok(_) => Self::report_env_error(
                    strict,
                    "NODESCALE_TOAST_SECONDS",
                    &val,
                    &format!("must be at least {MIN_TOAST_SECONDS} second(s)"),
                    warnings,
                ),
                Err(_) => Self::report_env_error(
                    strict,
                    "NODESCALE_TOAST_SECONDS",
                    &val,
                    "expected a positive integer (seconds)",
                    warnings,
                ),
            }
        }
    }

    fn report_env_error(
        strict: bool,
        var_name: &str,
        value: &str,
        reason: &str,
        warnings: &mut Vec<String>,
    ) {
        if strict {
            eprintln!("Error: Invalid value '{value}' for {var_name}: {reason}");
            eprintln!("{STRICT_HINT}");
            std::process::exit(1);
        }
        warnings.push(format!(
            "Invalid value '{value}' for {var_name}, {reason} - using default"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TuiConfig::default();
        assert_eq!(config.display.theme, "dark");
        assert_eq!(config.display.default_view, "clusters");
        assert_eq!(config.behavior.toast_seconds, 3);
        assert_eq!(config.behavior.tick_millis, 250);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TuiConfig::from_toml(
            r#"
            [display]
            theme = "light"
            "#,
        )
        .unwrap();
        assert_eq!(config.display.theme, "light");
        assert_eq!(config.display.default_view, "clusters");
        assert_eq!(config.behavior.toast_seconds, 3);
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(TuiConfig::from_toml("[display\ntheme = 1").is_err());
    }

    #[test]
    fn test_validate_valid_values() {
        let mut config = TuiConfig::default();
        let warnings = config.validate(false).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_validate_zero_toast_seconds_corrected() {
        let mut config = BehaviorConfig {
            toast_seconds: 0,
            tick_millis: 250,
        };
        let warnings = config.validate(false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("toast_seconds"));
        assert!(warnings[0].contains("at least 1"));
        assert_eq!(config.toast_seconds, BehaviorConfig::default().toast_seconds);
    }

    #[test]
    fn test_validate_fast_tick_corrected() {
        let mut config = BehaviorConfig {
            toast_seconds: 3,
            tick_millis: 10,
        };
        let warnings = config.validate(false).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("tick_millis"));
        assert_eq!(config.tick_millis, 250);
    }

    #[test]
    fn test_validate_unknown_theme_and_view() {
        let mut config = DisplayConfig {
            theme: "solarized".to_string(),
            default_view: "jobs".to_string(),
        };
        let warnings = config.validate(false).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.default_view, "clusters");
    }

    #[test]
    fn test_validate_strict_mode_error() {
        let mut config = TuiConfig::default();
        config.behavior.toast_seconds = 0;
        let err = config.validate(true).unwrap_err();
        assert!(err.contains("toast_seconds"));
    }
}
