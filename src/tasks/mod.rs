//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod effect_dispatcher;
pub mod tick_source;

// Re-export main functions
pub use effect_dispatcher::{effect_dispatcher_task, EffectDispatcher};
pub use tick_source::tick_source_task;
