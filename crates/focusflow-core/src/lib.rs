//! # Focusflow Core Library
//!
//! Core logic for Focusflow, an interval timer that alternates between a
//! focus and a break session and coordinates ambient audio around the
//! transitions. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a wall-clock-based state machine that derives
//!   remaining time from an absolute deadline; the caller invokes `tick()`
//!   periodically and irregular scheduling accumulates zero drift
//! - **Audio Engine**: procedural synthesis (noise bed, completion chime)
//!   and file-backed ambient playback over rodio, with fade-out and a
//!   strict one-bed-at-a-time rule
//! - **Controller**: the command surface wiring timer transitions to audio
//!   side effects
//!
//! Everything is in-memory; a restart loses all timer state by design.

pub mod audio;
pub mod controller;
pub mod error;
pub mod events;
pub mod format;
pub mod scheduler;
pub mod timer;

pub use audio::{AmbientSource, AmbientTarget, AudioEngine, SoundCatalog, SoundEffect};
pub use controller::Controller;
pub use error::{AudioError, CoreError};
pub use events::Event;
pub use timer::{now_ms, SessionKind, SessionTimer, Snapshot, TimerEngine};
