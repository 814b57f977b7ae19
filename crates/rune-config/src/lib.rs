//! Rune date-picker configuration system
//!
//! This crate provides centralized configuration for the date picker,
//! loading settings from `rune.toml` with environment variable overrides.

mod error;

pub use error::ConfigError;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RuneConfig {
    /// Date picker behaviour and formatting
    pub date_picker: DatePickerConfig,
}

/// Where the calendar popover sits relative to the field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Top,
    TopStart,
    TopEnd,
    Bottom,
    #[default]
    BottomStart,
    BottomEnd,
    Left,
    Right,
}

/// Date picker configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatePickerConfig {
    /// chrono strftime pattern used to parse typed text and render the value
    pub input_format: String,
    /// Locale name used for rendering (e.g. "en_US", "fr_FR")
    pub locale: String,
    /// Earliest selectable date (inclusive)
    pub min_date: Option<NaiveDate>,
    /// Latest selectable date (inclusive)
    pub max_date: Option<NaiveDate>,
    /// Initial value for uncontrolled pickers
    pub default_value: Option<NaiveDate>,
    /// Close the popover when focus or a pointer leaves the widget
    pub close_on_blur: bool,
    /// Close the popover after a date is picked in the calendar
    pub close_on_select: bool,
    /// Allow typing into the text field
    pub allow_input: bool,
    /// Start with the popover open
    pub default_open: bool,
    /// Show a clear control
    pub clearable: bool,
    /// Regex of characters stripped from typed text
    pub pattern: String,
    /// Popover placement
    pub placement: Placement,
    /// Popover open/close animation duration in seconds
    pub duration: f32,
    /// Placeholder shown in an empty field
    pub placeholder: Option<String>,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            input_format: "%Y/%m/%d".to_string(),
            locale: "en_US".to_string(),
            min_date: None,
            max_date: None,
            default_value: None,
            close_on_blur: true,
            close_on_select: true,
            allow_input: true,
            default_open: false,
            clearable: true,
            pattern: r"[^0-9\-/]".to_string(),
            placement: Placement::BottomStart,
            duration: 0.2,
            placeholder: None,
        }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Unparseable dates are ignored.
    pub fn merge_with_env(&mut self) {
        let picker = &mut self.date_picker;

        if let Ok(format) = std::env::var("DATE_PICKER_FORMAT") {
            picker.input_format = format;
        }
        if let Ok(locale) = std::env::var("DATE_PICKER_LOCALE") {
            picker.locale = locale;
        }
        if let Ok(val) = std::env::var("DATE_PICKER_MIN") {
            if let Ok(date) = val.parse::<NaiveDate>() {
                picker.min_date = Some(date);
            }
        }
        if let Ok(val) = std::env::var("DATE_PICKER_MAX") {
            if let Ok(date) = val.parse::<NaiveDate>() {
                picker.max_date = Some(date);
            }
        }
        if let Ok(val) = std::env::var("DATE_PICKER_CLOSE_ON_BLUR") {
            picker.close_on_blur = env_flag(&val);
        }
        if let Ok(val) = std::env::var("DATE_PICKER_CLOSE_ON_SELECT") {
            picker.close_on_select = env_flag(&val);
        }
        if let Ok(val) = std::env::var("DATE_PICKER_ALLOW_INPUT") {
            picker.allow_input = env_flag(&val);
        }
        if let Ok(val) = std::env::var("DATE_PICKER_DEFAULT_OPEN") {
            picker.default_open = env_flag(&val);
        }
        if let Ok(pattern) = std::env::var("DATE_PICKER_PATTERN") {
            picker.pattern = pattern;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
