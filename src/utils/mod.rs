//! Utility Module
//!
//! - [`Timer`]: wall-clock frame timing for the window loop

pub mod time;

pub use time::Timer;
