//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{HistoryTotals, StateError, WorkoutRecord},
    workout::{TimerError, TimerMode, TimerSnapshot, WorkoutOptions},
};

/// Body of POST /timer/configure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigureRequest {
    pub mode: TimerMode,
    pub duration_sec: Option<i64>,
    pub work_sec: Option<i64>,
    pub rest_sec: Option<i64>,
    pub rounds: Option<i64>,
    pub calorie_rate_per_minute: Option<f64>,
}

impl ConfigureRequest {
    /// Convert to timer options, falling back to `default_rate` for calories
    pub fn options(&self, default_rate: f64) -> Result<WorkoutOptions, TimerError> {
        Ok(WorkoutOptions {
            duration_sec: seconds_field("duration_sec", self.duration_sec)?,
            work_sec: seconds_field("work_sec", self.work_sec)?,
            rest_sec: seconds_field("rest_sec", self.rest_sec)?,
            rounds: seconds_field("rounds", self.rounds)?,
            calorie_rate_per_minute: self.calorie_rate_per_minute.unwrap_or(default_rate),
        })
    }
}

fn seconds_field(field: &str, value: Option<i64>) -> Result<Option<u32>, TimerError> {
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| {
                TimerError::InvalidConfiguration(format!("{} must be between 0 and {}, got {}", field, u32::MAX, v))
            })
        })
        .transpose()
}

/// API response structure for timer operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a response whose status reflects the timer
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        let status = if timer.completed {
            "completed"
        } else if timer.is_active {
            "running"
        } else {
            "idle"
        };

        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Error body returned for failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// An error response with its HTTP status
#[derive(Debug)]
pub struct ApiError {
    pub code: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(code: StatusCode, message: String) -> Self {
        Self {
            code,
            body: ErrorBody {
                status: "error".to_string(),
                message,
                timestamp: Utc::now(),
            },
        }
    }
}

impl From<TimerError> for ApiError {
    fn from(e: TimerError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, e.to_string())
    }
}

impl From<StateError> for ApiError {
    fn from(e: StateError) -> Self {
        let message = e.to_string();
        match e {
            StateError::Timer(_) => Self::new(StatusCode::BAD_REQUEST, message),
            StateError::Lock(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}

/// Workout history listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub records: Vec<WorkoutRecord>,
    pub totals: HistoryTotals,
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub history: HistoryTotals,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
