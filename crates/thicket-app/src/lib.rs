//! THICKET frame driver.
//!
//! Moves a `Session` onto its own thread, paces frames against a
//! monotonic clock and exposes command and snapshot access to the
//! outside world.

pub mod control;
pub mod game_loop;
pub mod state;

pub use thicket_core as core;
