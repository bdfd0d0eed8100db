// Service module exports

pub mod clock;
pub mod countdown;
pub mod device;
pub mod interaction;
pub mod notification;
pub mod playback;
pub mod settings;
