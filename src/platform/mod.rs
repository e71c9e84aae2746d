//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (millisecond tick sources, timers, frame pacing)
//! - Input events (key down/up to per-tick intent)

pub mod input;
pub mod time;

pub use input::{InputState, Key, KeyEvent};
pub use time::{FpsCounter, FrameLimiter, ManualClock, SystemClock, TickSource, Timer, frame_delay};
