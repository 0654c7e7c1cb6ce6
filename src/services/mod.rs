//! External collaborators module
//!
//! This module contains the side-effect services the timer's events are
//! handed to, such as audio cue playback.

pub mod sound;

// Re-export main types
pub use sound::{Cue, SoundPlayer};
