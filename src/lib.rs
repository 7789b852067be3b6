//! Ringface watchface library.
//!
//! Display state, event dispatch and rendering for the Ringface watchface.
//! Everything here is hardware independent and runs on the host; the
//! firmware binary (`main.rs`, feature `embedded`) wires it to the PineTime.
//!
//! # Testing
//!
//! ```bash
//! cargo test
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]

pub mod battery;
pub mod clock;
pub mod config;
pub mod event;
pub mod haptics;
pub mod state;
pub mod text;
pub mod ui;

pub use event::{dispatch, Event, Redraw};
pub use haptics::{HapticQueue, Haptics, Pulse};
pub use state::{populate, BatteryInfo, DisplayState, Startup};
pub use ui::{Variant, WatchFace};
