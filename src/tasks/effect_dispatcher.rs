//! Effect dispatcher background task
//!
//! Consumes the timer's events after each state update and hands them to
//! the audio and history collaborators. Nothing here can reach back into
//! the timer.

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::{
    services::{Cue, SoundPlayer},
    state::AppState,
    workout::{dispatch_events, EventSink, PhaseTransition, SessionSummary, TimerEvent},
};

/// Event sink playing cues and saving completed sessions
#[derive(Debug, Clone)]
pub struct EffectDispatcher {
    state: Arc<AppState>,
    sound: Arc<SoundPlayer>,
}

impl EffectDispatcher {
    pub fn new(state: Arc<AppState>, sound: Arc<SoundPlayer>) -> Self {
        Self { state, sound }
    }

    /// Fire-and-forget playback; failures are only logged
    fn play(&self, cue: Cue) {
        let sound = Arc::clone(&self.sound);
        tokio::spawn(async move {
            if let Err(e) = sound.play(cue).await {
                warn!("Audio cue {} failed: {}", cue, e);
            }
        });
    }
}

impl EventSink for EffectDispatcher {
    fn on_phase_complete(&self, transition: &PhaseTransition) -> Result<(), String> {
        info!(
            "Phase complete: {:?} -> {:?} (round {})",
            transition.from, transition.to, transition.round
        );
        self.play(Cue::PhaseChange);
        Ok(())
    }

    fn on_session_complete(&self, summary: &SessionSummary) -> Result<(), String> {
        self.play(Cue::SessionComplete);

        let record = self.state.record_session(*summary).map_err(|e| e.to_string())?;
        info!(
            "Session complete: mode={}, duration={}s, calories={}, saved as {}",
            summary.mode, summary.duration_secs, summary.calories_burned, record.id
        );
        Ok(())
    }
}

/// Background task dispatching every published timer event
pub async fn effect_dispatcher_task(
    dispatcher: EffectDispatcher,
    mut events: broadcast::Receiver<TimerEvent>,
) {
    info!("Starting effect dispatcher task");

    loop {
        match events.recv().await {
            Ok(event) => {
                dispatch_events(&[event], &dispatcher);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Effect dispatcher lagged, {} events skipped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, stopping effect dispatcher");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::workout::{TimerMode, WorkoutOptions};

    #[tokio::test]
    async fn completed_sessions_land_in_history() {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), 6.0, 10));
        let dispatcher = EffectDispatcher::new(Arc::clone(&state), Arc::new(SoundPlayer::silent()));
        let handle = tokio::spawn(effect_dispatcher_task(dispatcher, state.subscribe_events()));

        state
            .configure(TimerMode::Interval, WorkoutOptions::interval(2, 1, 2, 6.0))
            .unwrap();
        state.start().unwrap();
        for _ in 0..6 {
            state.tick().unwrap();
        }

        let history = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let history = state.get_history().unwrap();
                if !history.is_empty() {
                    return history;
                }
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].summary.mode, TimerMode::Interval);
        assert_eq!(history[0].summary.duration_secs, 6);
        assert_eq!(history[0].summary.rounds_completed, Some(2));

        handle.abort();
    }

    #[tokio::test]
    async fn phase_events_are_not_saved() {
        let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), 6.0, 10));
        let dispatcher = EffectDispatcher::new(Arc::clone(&state), Arc::new(SoundPlayer::silent()));

        let transition = PhaseTransition {
            from: crate::workout::Phase::Work,
            to: crate::workout::Phase::Rest,
            round: 1,
        };
        assert_eq!(dispatch_events(&[TimerEvent::PhaseComplete(transition)], &dispatcher), 0);
        assert!(state.get_history().unwrap().is_empty());
    }
}
