mod service;

pub use service::{
    default_settings_path, SettingsService, ENV_NOTIFY, ENV_OUTPUT, ENV_TARGET, ENV_TICK_MS,
    ENV_TIMEZONE, SETTINGS_FILE_NAME,
};
