//! Platform abstraction layer
//!
//! Handles the host-dependent parts of the game loop:
//! - Time and frame pacing

pub mod time;

pub use time::{Clock, FramePacer, SystemClock};
