// Module exports for models

pub mod countdown;
pub mod device;
pub mod playback;
pub mod settings;
