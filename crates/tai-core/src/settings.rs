//! Session settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub keys: KeySettings,
    pub classic: ClassicSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeySettings {
    hyphen: String,
    khin: String,
}

impl KeySettings {
    pub fn hyphen_key(&self) -> char {
        // validated single ASCII char
        self.hyphen.chars().next().unwrap_or('-')
    }

    pub fn khin_key(&self) -> char {
        self.khin.chars().next().unwrap_or('0')
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassicSettings {
    terminators: String,
}

impl ClassicSettings {
    /// Whether `ch` ends a word in Classic mode.
    pub fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(ch)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    check_single_ascii("keys.hyphen", &s.keys.hyphen)?;
    check_single_ascii("keys.khin", &s.keys.khin)?;

    if s.classic.terminators.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "classic.terminators".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if !s.classic.terminators.is_ascii() {
        return Err(SettingsError::InvalidValue {
            field: "classic.terminators".to_string(),
            reason: "must be ASCII".to_string(),
        });
    }

    Ok(())
}

fn check_single_ascii(field: &str, value: &str) -> Result<(), SettingsError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(()),
        _ => Err(SettingsError::InvalidValue {
            field: field.to_string(),
            reason: "must be exactly one ASCII character".to_string(),
        }),
    }
}
