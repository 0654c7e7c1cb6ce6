//! The workout timer state machine
//!
//! `WorkoutTimer` is advanced only by `tick()`, one call per second, from a
//! source it knows nothing about. Transitions never perform side effects:
//! `tick()` and `finish()` return the events the host should act on.

use serde::{Deserialize, Serialize};

use super::{
    ModeConfig, Phase, PhaseTransition, SessionSummary, TimerConfig, TimerError, TimerEvent,
    TimerMode, WorkoutOptions,
};

/// Progress of the running session; each variant owns its mode's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Stopwatch {
        elapsed: u32,
    },
    Countdown {
        duration: u32,
        remaining: u32,
    },
    Interval {
        work: u32,
        rest: u32,
        rounds: u32,
        remaining: u32,
        round: u32,
        resting: bool,
    },
}

impl Session {
    /// Counters before the first `start()`
    fn fresh(mode: &ModeConfig) -> Self {
        match *mode {
            ModeConfig::Stopwatch => Session::Stopwatch { elapsed: 0 },
            ModeConfig::Countdown { duration_sec } => Session::Countdown {
                duration: duration_sec,
                remaining: 0,
            },
            ModeConfig::Interval { work_sec, rest_sec, rounds } => Session::Interval {
                work: work_sec,
                rest: rest_sec,
                rounds,
                remaining: 0,
                round: 1,
                resting: false,
            },
        }
    }

    /// Counters at the moment a fresh session is started
    fn loaded(self) -> Self {
        match self {
            Session::Stopwatch { .. } => Session::Stopwatch { elapsed: 0 },
            Session::Countdown { duration, .. } => Session::Countdown {
                duration,
                remaining: duration,
            },
            Session::Interval { work, rest, rounds, .. } => Session::Interval {
                work,
                rest,
                rounds,
                remaining: work,
                round: 1,
                resting: false,
            },
        }
    }

    fn seconds(&self) -> u32 {
        match *self {
            Session::Stopwatch { elapsed } => elapsed,
            Session::Countdown { remaining, .. } | Session::Interval { remaining, .. } => remaining,
        }
    }

    /// Seconds of actual exercise performed so far
    fn seconds_of_activity(&self) -> u64 {
        match *self {
            Session::Stopwatch { elapsed } => u64::from(elapsed),
            Session::Countdown { duration, remaining } => u64::from(duration.saturating_sub(remaining)),
            Session::Interval {
                work,
                rest,
                remaining,
                round,
                resting,
                ..
            } => {
                let finished_rounds = u64::from(round - 1) * (u64::from(work) + u64::from(rest));
                let in_round = if resting {
                    u64::from(work) + u64::from(rest.saturating_sub(remaining))
                } else {
                    u64::from(work.saturating_sub(remaining))
                };
                finished_rounds + in_round
            }
        }
    }
}

/// Read-only view of the timer handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    /// Elapsed seconds for the stopwatch, remaining seconds otherwise
    pub seconds: u32,
    pub is_active: bool,
    pub current_round: u32,
    pub total_rounds: u32,
    pub is_resting: bool,
    pub completed: bool,
    pub calories_burned: u64,
}

/// Single source of truth for one timed workout session
#[derive(Debug, Clone)]
pub struct WorkoutTimer {
    config: TimerConfig,
    session: Session,
    active: bool,
    started: bool,
    completed: bool,
}

impl WorkoutTimer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            session: Session::fresh(&config.mode),
            config,
            active: false,
            started: false,
            completed: false,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Select a mode and its options, discarding the current session.
    ///
    /// On error the previous configuration and session stay in place.
    pub fn configure(&mut self, mode: TimerMode, options: &WorkoutOptions) -> Result<(), TimerError> {
        let config = TimerConfig::from_options(mode, options)?;
        *self = Self::new(config);
        Ok(())
    }

    /// Begin a fresh session or resume a paused one
    pub fn start(&mut self) {
        if self.active || self.completed {
            return;
        }

        if !self.started {
            self.session = self.session.loaded();
            self.started = true;
        }
        self.active = true;
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Return to the initial state of the current configuration
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Advance the session by exactly one second
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if !self.active {
            return Vec::new();
        }

        let mut events = Vec::new();

        match self.session {
            Session::Stopwatch { elapsed } => {
                self.session = Session::Stopwatch {
                    elapsed: elapsed.saturating_add(1),
                };
            }
            Session::Countdown { duration, remaining } => {
                if remaining <= 1 {
                    self.session = Session::Countdown { duration, remaining: 0 };
                    events.push(self.complete());
                } else {
                    self.session = Session::Countdown {
                        duration,
                        remaining: remaining - 1,
                    };
                }
            }
            Session::Interval {
                work,
                rest,
                rounds,
                remaining,
                round,
                resting,
            } => {
                let next = |remaining, round, resting| Session::Interval {
                    work,
                    rest,
                    rounds,
                    remaining,
                    round,
                    resting,
                };

                if remaining > 1 {
                    self.session = next(remaining - 1, round, resting);
                } else if !resting {
                    self.session = next(rest, round, true);
                    events.push(TimerEvent::PhaseComplete(PhaseTransition {
                        from: Phase::Work,
                        to: Phase::Rest,
                        round,
                    }));
                } else if round >= rounds {
                    self.session = next(0, round, true);
                    events.push(self.complete());
                } else {
                    self.session = next(work, round + 1, false);
                    events.push(TimerEvent::PhaseComplete(PhaseTransition {
                        from: Phase::Rest,
                        to: Phase::Work,
                        round: round + 1,
                    }));
                }
            }
        }

        events
    }

    /// End a running stopwatch session by hand.
    ///
    /// Countdown and interval sessions only complete through `tick()`, so
    /// this does nothing for them.
    pub fn finish(&mut self) -> Vec<TimerEvent> {
        match self.session {
            Session::Stopwatch { .. } if self.started && !self.completed => vec![self.complete()],
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let (current_round, is_resting) = match self.session {
            Session::Interval { round, resting, .. } => (round, resting),
            _ => (1, false),
        };

        TimerSnapshot {
            mode: self.config.mode.mode(),
            seconds: self.session.seconds(),
            is_active: self.active,
            current_round,
            total_rounds: self.config.mode.rounds(),
            is_resting,
            completed: self.completed,
            calories_burned: self.calories_burned(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        let rounds_completed = match self.session {
            Session::Interval { round, .. } if self.completed => Some(round),
            Session::Interval { round, .. } => Some(round - 1),
            _ => None,
        };

        SessionSummary {
            mode: self.config.mode.mode(),
            duration_secs: self.seconds_of_activity(),
            calories_burned: self.calories_burned(),
            rounds_completed,
        }
    }

    fn seconds_of_activity(&self) -> u64 {
        if self.started {
            self.session.seconds_of_activity()
        } else {
            0
        }
    }

    fn calories_burned(&self) -> u64 {
        let minutes = self.seconds_of_activity() as f64 / 60.0;
        (minutes * self.config.calorie_rate_per_minute).round() as u64
    }

    fn complete(&mut self) -> TimerEvent {
        self.active = false;
        self.completed = true;
        TimerEvent::SessionComplete(self.summary())
    }
}

impl Default for WorkoutTimer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
