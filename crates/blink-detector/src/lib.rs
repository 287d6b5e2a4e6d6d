//! Blink Detector
//!
//! Debounced blink confirmation over a per-frame EAR stream:
//! Open -> Closing(n) -> back to Open, emitting one event per closure cycle.
//!
//! Each session owns its own detector instance; there is no shared state
//! between sessions.

mod config;
mod machine;

pub use config::{BlinkConfig, BlinkConfigError};
pub use machine::{BlinkDetector, BlinkEvent, BlinkState};
