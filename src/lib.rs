//! Workout Timer - a tick-driven stopwatch, countdown and interval timer
//!
//! The `workout` module holds the deterministic timer state machine. The
//! remaining modules host it: shared state, a one-second tick source, an
//! effect dispatcher for audio cues and history, and an HTTP API.

pub mod config;
pub mod workout;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use workout::{TimerError, TimerEvent, TimerMode, TimerSnapshot, WorkoutOptions, WorkoutTimer};
pub use utils::signals::shutdown_signal;
