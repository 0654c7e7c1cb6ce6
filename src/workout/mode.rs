//! Timer modes and their validated configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TimerError;

/// Calories per minute used when nothing else is configured
pub const DEFAULT_CALORIE_RATE_PER_MINUTE: f64 = 8.0;

/// The three mutually exclusive ways a session can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Stopwatch,
    Countdown,
    Interval,
}

impl TimerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Stopwatch => "stopwatch",
            TimerMode::Countdown => "countdown",
            TimerMode::Interval => "interval",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated options supplied alongside a mode selection.
///
/// Only the fields relevant to the selected mode are read; the rest are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutOptions {
    pub duration_sec: Option<u32>,
    pub work_sec: Option<u32>,
    pub rest_sec: Option<u32>,
    pub rounds: Option<u32>,
    pub calorie_rate_per_minute: f64,
}

impl WorkoutOptions {
    pub fn new(calorie_rate_per_minute: f64) -> Self {
        Self {
            duration_sec: None,
            work_sec: None,
            rest_sec: None,
            rounds: None,
            calorie_rate_per_minute,
        }
    }

    pub fn countdown(duration_sec: u32, calorie_rate_per_minute: f64) -> Self {
        Self {
            duration_sec: Some(duration_sec),
            ..Self::new(calorie_rate_per_minute)
        }
    }

    pub fn interval(work_sec: u32, rest_sec: u32, rounds: u32, calorie_rate_per_minute: f64) -> Self {
        Self {
            work_sec: Some(work_sec),
            rest_sec: Some(rest_sec),
            rounds: Some(rounds),
            ..Self::new(calorie_rate_per_minute)
        }
    }
}

impl Default for WorkoutOptions {
    fn default() -> Self {
        Self::new(DEFAULT_CALORIE_RATE_PER_MINUTE)
    }
}

/// Per-mode configuration, carrying only the fields its mode needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeConfig {
    Stopwatch,
    Countdown { duration_sec: u32 },
    Interval { work_sec: u32, rest_sec: u32, rounds: u32 },
}

impl ModeConfig {
    pub fn mode(&self) -> TimerMode {
        match self {
            ModeConfig::Stopwatch => TimerMode::Stopwatch,
            ModeConfig::Countdown { .. } => TimerMode::Countdown,
            ModeConfig::Interval { .. } => TimerMode::Interval,
        }
    }

    /// Configured length of a full run, `None` for the open-ended stopwatch
    pub fn total_secs(&self) -> Option<u64> {
        match *self {
            ModeConfig::Stopwatch => None,
            ModeConfig::Countdown { duration_sec } => Some(u64::from(duration_sec)),
            ModeConfig::Interval { work_sec, rest_sec, rounds } => {
                Some(u64::from(rounds) * (u64::from(work_sec) + u64::from(rest_sec)))
            }
        }
    }

    pub fn rounds(&self) -> u32 {
        match *self {
            ModeConfig::Interval { rounds, .. } => rounds,
            _ => 1,
        }
    }
}

/// A complete, validated timer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerConfig {
    pub mode: ModeConfig,
    pub calorie_rate_per_minute: f64,
}

impl TimerConfig {
    pub fn stopwatch(calorie_rate_per_minute: f64) -> Self {
        Self {
            mode: ModeConfig::Stopwatch,
            calorie_rate_per_minute,
        }
    }

    /// Validate raw options for `mode`
    pub fn from_options(mode: TimerMode, options: &WorkoutOptions) -> Result<Self, TimerError> {
        let rate = options.calorie_rate_per_minute;
        if !rate.is_finite() || rate < 0.0 {
            return Err(TimerError::invalid(format!(
                "calorie_rate_per_minute must be a non-negative number, got {}",
                rate
            )));
        }

        let mode = match mode {
            TimerMode::Stopwatch => ModeConfig::Stopwatch,
            TimerMode::Countdown => ModeConfig::Countdown {
                duration_sec: require_positive("duration_sec", options.duration_sec)?,
            },
            TimerMode::Interval => ModeConfig::Interval {
                work_sec: require_positive("work_sec", options.work_sec)?,
                rest_sec: require_positive("rest_sec", options.rest_sec)?,
                rounds: require_positive("rounds", options.rounds)?,
            },
        };

        Ok(Self {
            mode,
            calorie_rate_per_minute: rate,
        })
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::stopwatch(DEFAULT_CALORIE_RATE_PER_MINUTE)
    }
}

fn require_positive(field: &str, value: Option<u32>) -> Result<u32, TimerError> {
    match value {
        Some(0) => Err(TimerError::invalid(format!("{} must be greater than zero", field))),
        Some(value) => Ok(value),
        None => Err(TimerError::invalid(format!("{} is required", field))),
    }
}
