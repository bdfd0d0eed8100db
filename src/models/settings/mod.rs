// Countdown settings model
// Loaded from countdown.toml and environment overrides (see services::settings)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::error::{ConfigurationError, Result};

pub const DEFAULT_TARGET: &str = "2024-12-10T00:00:00";
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::InvalidValue {
                key: "output".into(),
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownSettings {
    /// Civil date-time of the event, without offset.
    pub target: String,
    /// IANA zone the target is expressed in.
    pub timezone: String,
    pub tick_interval_ms: u64,
    pub output: OutputFormat,
    pub notify_on_expire: bool,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            output: OutputFormat::Text,
            notify_on_expire: true,
        }
    }
}

impl CountdownSettings {
    pub fn tick_interval(&self) -> Result<Duration> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigurationError::InvalidTickInterval);
        }
        Ok(Duration::from_millis(self.tick_interval_ms))
    }
}
