//! Platform abstraction layer
//!
//! Windowing, device polling and frame pacing belong to the host. The core
//! sees them through:
//! - `input`: the discrete event set and event sources
//! - `time`: a millisecond clock

pub mod input;
pub mod time;

pub use input::{EventSource, InputEvent, Key, ScriptedInput};
pub use time::{Clock, ManualClock, SystemClock};
