//! Workout Timer - HTTP host for a tick-driven workout timer
//!
//! This is the main entry point for the workout-timer server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use workout_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::SoundPlayer,
    tasks::{effect_dispatcher_task, tick_source_task, EffectDispatcher},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("workout_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting workout-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, tick={}ms, calorie_rate={}/min, history_limit={}",
        config.host, config.port, config.tick_ms, config.calorie_rate, config.history_limit
    );

    if !config.calorie_rate.is_finite() || config.calorie_rate < 0.0 {
        anyhow::bail!("--calorie-rate must be a non-negative number, got {}", config.calorie_rate);
    }

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.calorie_rate,
        config.history_limit,
    ));

    // Subscribe before anything can tick so no event is missed
    let sound = Arc::new(SoundPlayer::new(config.sound_command.clone()));
    let dispatcher = EffectDispatcher::new(Arc::clone(&state), sound);
    tokio::spawn(effect_dispatcher_task(dispatcher, state.subscribe_events()));

    // Start the tick source background task
    let tick_state = Arc::clone(&state);
    let period = config.tick_period();
    tokio::spawn(async move {
        tick_source_task(tick_state, period).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timer           - Current timer snapshot");
    info!("  POST   /timer/configure - Select mode and options");
    info!("  POST   /timer/start     - Start or resume");
    info!("  POST   /timer/pause     - Pause");
    info!("  POST   /timer/reset     - Reset the session");
    info!("  POST   /timer/finish    - Finish a stopwatch session");
    info!("  GET    /history         - Completed sessions");
    info!("  DELETE /history         - Clear history");
    info!("  GET    /status          - Timer and server status");
    info!("  GET    /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
