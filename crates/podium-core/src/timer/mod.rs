mod countdown;
mod prep;

pub use countdown::{Countdown, OVERTIME_EPSILON_MS};
pub use prep::PrepTimer;
