//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, response::Json};
use tracing::{error, info, warn};

use crate::state::{AppState, StateError};
use crate::workout::TimerSnapshot;
use super::responses::{
    ApiError, ApiResponse, ConfigureRequest, HealthResponse, HistoryResponse, StatusResponse,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Turn the outcome of a timer operation into a response
fn respond(action: &str, result: Result<TimerSnapshot, StateError>, message: &str) -> ApiResult<ApiResponse> {
    match result {
        Ok(snapshot) => Ok(Json(ApiResponse::new(message.to_string(), snapshot))),
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(e.into())
        }
    }
}

/// Handle GET /timer - Return the current timer snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> ApiResult<TimerSnapshot> {
    match state.get_snapshot() {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            Err(e.into())
        }
    }
}

/// Handle POST /timer/configure - Select a mode and its options
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigureRequest>,
) -> ApiResult<ApiResponse> {
    let options = match request.options(state.default_calorie_rate) {
        Ok(options) => options,
        Err(e) => {
            warn!("Rejected timer configuration: {}", e);
            return Err(e.into());
        }
    };

    match state.configure(request.mode, options) {
        Ok(snapshot) => Ok(Json(ApiResponse::new(
            format!("Timer configured for {} mode", request.mode),
            snapshot,
        ))),
        Err(StateError::Timer(e)) => {
            warn!("Rejected timer configuration: {}", e);
            Err(e.into())
        }
        Err(e) => {
            error!("Failed to configure timer: {}", e);
            Err(e.into())
        }
    }
}

/// Handle POST /timer/start - Begin or resume the session
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    respond("start", state.start(), "Timer started")
}

/// Handle POST /timer/pause - Freeze the session
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    respond("pause", state.pause(), "Timer paused")
}

/// Handle POST /timer/reset - Discard the session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    respond("reset", state.reset(), "Timer reset")
}

/// Handle POST /timer/finish - Complete a running stopwatch
pub async fn finish_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    let result = state.finish();
    let message = match &result {
        Ok(snapshot) if snapshot.completed => "Session finished",
        _ => "Nothing to finish",
    };
    respond("finish", result, message)
}

/// Handle GET /history - List completed sessions, newest first
pub async fn history_handler(State(state): State<Arc<AppState>>) -> ApiResult<HistoryResponse> {
    let records = state.get_history().map_err(|e| {
        error!("Failed to read history: {}", e);
        ApiError::from(e)
    })?;
    let totals = state.get_history_totals().map_err(|e| {
        error!("Failed to read history totals: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(HistoryResponse { records, totals }))
}

/// Handle DELETE /history - Forget all completed sessions
pub async fn clear_history_handler(State(state): State<Arc<AppState>>) -> ApiResult<HistoryResponse> {
    match state.clear_history() {
        Ok(removed) => {
            info!("History cleared via API ({} records)", removed);
            Ok(Json(HistoryResponse {
                records: Vec::new(),
                totals: Default::default(),
            }))
        }
        Err(e) => {
            error!("Failed to clear history: {}", e);
            Err(e.into())
        }
    }
}

/// Handle GET /status - Return timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let timer = match state.get_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(e.into());
        }
    };

    let history = match state.get_history_totals() {
        Ok(h) => h,
        Err(e) => {
            error!("Failed to get history totals: {}", e);
            return Err(e.into());
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        history,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
