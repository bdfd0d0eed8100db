use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;

use crate::models::settings::{CountdownSettings, OutputFormat};
use crate::utils::error::{ConfigurationError, Result};

pub const SETTINGS_FILE_NAME: &str = "countdown.toml";

pub const ENV_TARGET: &str = "COUNTDOWN_DATE";
pub const ENV_TIMEZONE: &str = "COUNTDOWN_TIMEZONE";
pub const ENV_TICK_MS: &str = "COUNTDOWN_TICK_MS";
pub const ENV_OUTPUT: &str = "COUNTDOWN_OUTPUT";
pub const ENV_NOTIFY: &str = "COUNTDOWN_NOTIFY";

/// Platform config location for `countdown.toml`, if one can be resolved.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "CelebrationCountdown", "Countdown")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
}

/// Builds [`CountdownSettings`] from defaults, an optional TOML file and the
/// environment, in increasing order of precedence.
///
/// A path passed to [`SettingsService::new`] must exist. Only the platform
/// default location may be absent.
pub struct SettingsService {
    path: Option<PathBuf>,
    required: bool,
}

impl SettingsService {
    pub fn new(path: Option<PathBuf>) -> Self {
        let required = path.is_some();
        Self { path, required }
    }

    pub fn at_default_location() -> Self {
        let path = default_settings_path();
        if path.is_none() {
            log::warn!("Unable to resolve config directory; using defaults and environment only");
        }
        Self::optional(path)
    }

    fn optional(path: Option<PathBuf>) -> Self {
        Self {
            path,
            required: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load settings using the process environment.
    pub fn load(&self) -> Result<CountdownSettings> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Load settings reading variables through `env`. Unset or blank
    /// variables keep the file or default value.
    pub fn load_with_env<F>(&self, env: F) -> Result<CountdownSettings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match self.path.as_deref() {
            Some(path) if path.exists() || self.required => read_settings_file(path)?,
            Some(path) => {
                log::debug!("No settings file at {}; using defaults", path.display());
                CountdownSettings::default()
            }
            None => CountdownSettings::default(),
        };

        apply_env_overrides(&mut settings, env)?;
        Ok(settings)
    }

    /// Write `settings` to the configured path, creating parent directories.
    pub fn save(&self, settings: &CountdownSettings) -> anyhow::Result<PathBuf> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No settings path configured"))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(settings).context("failed to serialize settings")?;
        fs::write(&path, data)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        Ok(path)
    }
}

fn read_settings_file(path: &Path) -> Result<CountdownSettings> {
    let data = fs::read_to_string(path)?;
    let settings = toml::from_str(&data)?;
    log::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

fn apply_env_overrides<F>(settings: &mut CountdownSettings, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    if let Some(target) = read(ENV_TARGET) {
        settings.target = target.trim().to_string();
    }
    if let Some(timezone) = read(ENV_TIMEZONE) {
        settings.timezone = timezone.trim().to_string();
    }
    if let Some(tick) = read(ENV_TICK_MS) {
        settings.tick_interval_ms =
            tick.trim()
                .parse()
                .map_err(|_| ConfigurationError::InvalidValue {
                    key: ENV_TICK_MS.into(),
                    value: tick.clone(),
                })?;
    }
    if let Some(output) = read(ENV_OUTPUT) {
        settings.output = output.parse::<OutputFormat>()?;
    }
    if let Some(notify) = read(ENV_NOTIFY) {
        settings.notify_on_expire = parse_flag(ENV_NOTIFY, &notify)?;
    }

    Ok(())
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigurationError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
