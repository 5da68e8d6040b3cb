//! HD44780 LCD module.
//!
//! Drives HD44780-compatible character displays over a write-only 4-bit bus. The controller is never
//! read back, so every command is followed by a fixed worst-case delay instead of busy-flag polling.
//!
//! See [driver::Hd44780] for the display driver, [driver::SignalInterface] for what it needs from the
//! hardware, and [mock::RecordingSignal] for testing without a display attached.

pub mod driver;
mod flags;
pub mod mock;

pub use flags::*;
