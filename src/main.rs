//! Exam Timer - A state-managed HTTP server running independent countdown timers
//!
//! This is the main entry point for the exam-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::watch};
use tracing::info;

use exam_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::tick_driver_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("exam_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting exam-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, preset={:?}, timers={}, tick={}ms",
          config.host, config.port, config.preset, config.timers, config.tick_ms);

    let registry = config.registry()?;
    for view in registry.snapshot(registry.now()) {
        info!("  Timer {}: {} ({}, {})", view.index, view.name, view.display, view.tone);
    }

    // Create application state
    let state = Arc::new(AppState::new(
        registry,
        Arc::new(config.synthesizer()),
        config.port,
        config.host.clone(),
    ));

    // Start the tick driver background task
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let driver = tokio::spawn(tick_driver_task(
        Arc::clone(&state),
        config.tick_period(),
        shutdown_rx,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timers                 - List timers");
    info!("  GET  /timers/:index          - Show one timer");
    info!("  PUT  /timers/:index          - Configure a timer");
    info!("  POST /timers/:index/start    - Start a timer");
    info!("  POST /timers/:index/stop     - Stop a timer");
    info!("  POST /timers/:index/reset    - Reset a timer");
    info!("  GET  /timers/:index/tone.wav - Test a timer's sound");
    info!("  POST /all/start|stop|reset   - Control every timer");
    info!("  PUT  /timer-count            - Set the number of timers");
    info!("  GET  /tones                  - Tone palette");
    info!("  GET  /notifications          - Finished timers");
    info!("  GET  /status                 - Server status");
    info!("  GET  /health                 - Health check");

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

    // Timers are left as they are; only the driver stops
    let _ = shutdown_tx.send(true);
    if let Err(e) = driver.await {
        tracing::error!("Tick driver failed: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
