use thiserror::Error;

/// Everything that can go wrong while turning external configuration into a
/// running countdown. All variants are fatal at construction time.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unknown timezone '{name}'")]
    InvalidTimezone { name: String },

    #[error("invalid countdown target '{value}': {reason}")]
    InvalidTarget { value: String, reason: String },

    #[error("'{value}' does not exist in {timezone} (skipped by a DST transition)")]
    NonexistentLocalTime { value: String, timezone: String },

    #[error("tick interval must be at least 1ms")]
    InvalidTickInterval,

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
