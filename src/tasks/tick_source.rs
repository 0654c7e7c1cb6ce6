//! Periodic tick source driving the workout timer

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that delivers one tick to the timer every `period`.
///
/// Ticks are sequential: a late pulse delays the following ones instead of
/// bursting to catch up.
pub async fn tick_source_task(state: Arc<AppState>, period: Duration) {
    info!("Starting tick source task ({}ms period)", period.as_millis());

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick of a tokio interval fires immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        match state.tick() {
            Ok(snapshot) if snapshot.is_active => {
                debug!(
                    "Tick: mode={}, seconds={}, round={}/{}, resting={}",
                    snapshot.mode,
                    snapshot.seconds,
                    snapshot.current_round,
                    snapshot.total_rounds,
                    snapshot.is_resting
                );
            }
            Ok(_) => {
                // Timer idle or just completed, nothing to report
            }
            Err(e) => {
                error!("Failed to advance workout timer: {}", e);
            }
        }
    }
}
