//! Workout timer core
//!
//! A deterministic stopwatch / countdown / interval state machine. It owns
//! no clock and performs no I/O; hosts feed it ticks and act on the events
//! it returns.

pub mod error;
pub mod events;
pub mod mode;
pub mod timer;

// Re-export main types
pub use error::TimerError;
pub use events::{dispatch_events, EventSink, Phase, PhaseTransition, SessionSummary, TimerEvent};
pub use mode::{ModeConfig, TimerConfig, TimerMode, WorkoutOptions, DEFAULT_CALORIE_RATE_PER_MINUTE};
pub use timer::{TimerSnapshot, WorkoutTimer};
