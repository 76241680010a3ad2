//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key codes and names to directions)
//! - Time/ticks (the cancellable repeating tick)

pub mod input;
pub mod time;

pub use input::{InputState, Key};
pub use time::{Clock, Interval, ManualClock, ThreadClock, TickFlow};
