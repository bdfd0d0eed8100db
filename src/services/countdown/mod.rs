mod display;
mod duration;
mod session;
mod ticker;

pub use display::FormattedDuration;
pub use duration::{decompose, remaining_between};
pub use session::{CountdownSession, ExpireCallback};
pub use ticker::{CountdownHandle, CountdownTicker};
