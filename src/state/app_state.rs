//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::workout::{
    SessionSummary, TimerConfig, TimerError, TimerEvent, TimerMode, TimerSnapshot, WorkoutOptions,
    WorkoutTimer,
};
use super::{HistoryTotals, WorkoutHistory, WorkoutRecord};

/// Failures surfaced by `AppState` operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to lock {0} state")]
    Lock(&'static str),
    #[error(transparent)]
    Timer(#[from] TimerError),
}

/// Shared state owning the workout timer and its history
#[derive(Debug)]
pub struct AppState {
    /// The single workout timer driven by the tick source
    pub timer: Arc<Mutex<WorkoutTimer>>,
    /// Completed sessions
    pub history: Arc<Mutex<WorkoutHistory>>,
    /// Calories per minute used when a configuration omits one
    pub default_calorie_rate: f64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Timer effects for the dispatcher
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Latest timer snapshot
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState holding an idle stopwatch
    pub fn new(port: u16, host: String, default_calorie_rate: f64, history_limit: usize) -> Self {
        let timer = WorkoutTimer::new(TimerConfig::stopwatch(default_calorie_rate));
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());

        Self {
            timer: Arc::new(Mutex::new(timer)),
            history: Arc::new(Mutex::new(WorkoutHistory::new(history_limit))),
            default_calorie_rate,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply an operation to the timer, then publish its snapshot and events
    fn apply<F>(&self, operation: F) -> Result<TimerSnapshot, StateError>
    where
        F: FnOnce(&mut WorkoutTimer) -> Result<Vec<TimerEvent>, TimerError>,
    {
        let mut timer = self.timer.lock().map_err(|_| StateError::Lock("timer"))?;

        let events = operation(&mut *timer)?;
        let snapshot = timer.snapshot();
        drop(timer); // Release the lock before notifying anyone

        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });

        for event in events {
            debug!("Publishing {} event", event.name());
            if let Err(e) = self.event_tx.send(event) {
                warn!("Failed to send timer event: {}", e);
            }
        }

        Ok(snapshot)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Select a mode, discarding whatever session was running
    pub fn configure(&self, mode: TimerMode, options: WorkoutOptions) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.apply(|timer| timer.configure(mode, &options).map(|_| Vec::new()))?;
        info!("Timer configured: mode={}, options={:?}", mode, options);
        self.record_action("configure");
        Ok(snapshot)
    }

    pub fn start(&self) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.apply(|timer| {
            timer.start();
            Ok(Vec::new())
        })?;
        info!("Timer started: mode={}, seconds={}", snapshot.mode, snapshot.seconds);
        self.record_action("start");
        Ok(snapshot)
    }

    pub fn pause(&self) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.apply(|timer| {
            timer.pause();
            Ok(Vec::new())
        })?;
        info!("Timer paused at {}s", snapshot.seconds);
        self.record_action("pause");
        Ok(snapshot)
    }

    pub fn reset(&self) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.apply(|timer| {
            timer.reset();
            Ok(Vec::new())
        })?;
        info!("Timer reset");
        self.record_action("reset");
        Ok(snapshot)
    }

    /// Manually complete a stopwatch session
    pub fn finish(&self) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.apply(|timer| Ok(timer.finish()))?;
        info!("Finish requested, completed={}", snapshot.completed);
        self.record_action("finish");
        Ok(snapshot)
    }

    /// Advance the timer by one second; a no-op unless it is running
    pub fn tick(&self) -> Result<TimerSnapshot, StateError> {
        self.apply(|timer| Ok(timer.tick()))
    }

    /// Get current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, StateError> {
        self.timer
            .lock()
            .map(|timer| timer.snapshot())
            .map_err(|_| StateError::Lock("timer"))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    pub fn watch_snapshot(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Save a completed session to history
    pub fn record_session(&self, summary: SessionSummary) -> Result<WorkoutRecord, StateError> {
        let mut history = self.history.lock().map_err(|_| StateError::Lock("history"))?;
        Ok(history.record(summary))
    }

    /// Get history records, newest first
    pub fn get_history(&self) -> Result<Vec<WorkoutRecord>, StateError> {
        self.history
            .lock()
            .map(|history| history.records())
            .map_err(|_| StateError::Lock("history"))
    }

    pub fn get_history_totals(&self) -> Result<HistoryTotals, StateError> {
        self.history
            .lock()
            .map(|history| history.totals())
            .map_err(|_| StateError::Lock("history"))
    }

    pub fn clear_history(&self) -> Result<usize, StateError> {
        let removed = self
            .history
            .lock()
            .map(|mut history| history.clear())
            .map_err(|_| StateError::Lock("history"))?;
        info!("Cleared {} history records", removed);
        self.record_action("clear-history");
        Ok(removed)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
