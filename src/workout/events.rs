//! Events emitted by the timer and the sink that consumes them

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::TimerMode;

/// A phase inside an interval round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

/// A work/rest boundary crossed during an interval session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Round the timer is in after the transition
    pub round: u32,
}

/// What a finished session amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: TimerMode,
    pub duration_secs: u64,
    pub calories_burned: u64,
    /// Only reported for interval sessions
    pub rounds_completed: Option<u32>,
}

/// Effects the host performs after applying a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimerEvent {
    PhaseComplete(PhaseTransition),
    SessionComplete(SessionSummary),
}

impl TimerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::PhaseComplete(_) => "phase-complete",
            TimerEvent::SessionComplete(_) => "session-complete",
        }
    }
}

/// Receiver of timer effects (audio cues, history persistence, ...).
///
/// Errors are reported to the dispatcher only; the timer never sees them.
pub trait EventSink {
    fn on_phase_complete(&self, transition: &PhaseTransition) -> Result<(), String>;

    fn on_session_complete(&self, summary: &SessionSummary) -> Result<(), String>;
}

/// Deliver `events` to `sink` in order, returning how many deliveries failed
pub fn dispatch_events<S>(events: &[TimerEvent], sink: &S) -> usize
where
    S: EventSink + ?Sized,
{
    let mut failures = 0;

    for event in events {
        let result = match event {
            TimerEvent::PhaseComplete(transition) => sink.on_phase_complete(transition),
            TimerEvent::SessionComplete(summary) => sink.on_session_complete(summary),
        };

        if let Err(e) = result {
            warn!("Failed to handle {} event: {}", event.name(), e);
            failures += 1;
        }
    }

    failures
}
