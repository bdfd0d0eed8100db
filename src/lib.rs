// Celebration Countdown Library
// Exports all modules for testing and reuse

pub mod models;
pub mod services;
pub mod utils;

pub use models::countdown::{CountdownSnapshot, CountdownState, RemainingDuration};
pub use services::clock::{Clock, FixedClock, ManualClock, SystemClock, TargetInstant};
pub use services::countdown::{
    decompose, CountdownHandle, CountdownSession, CountdownTicker, ExpireCallback,
    FormattedDuration,
};
pub use utils::error::ConfigurationError;
