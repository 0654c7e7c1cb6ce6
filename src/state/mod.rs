//! State management module
//!
//! This module contains the shared application state wrapped around the
//! workout timer, plus the in-memory workout history.

pub mod app_state;
pub mod history;

// Re-export main types
pub use app_state::{AppState, StateError};
pub use history::{HistoryTotals, WorkoutHistory, WorkoutRecord};
