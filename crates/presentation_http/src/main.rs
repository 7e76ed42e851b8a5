//! MeterRoute HTTP Server
//!
//! Main entry point: loads configuration, wires the adapters into a planner
//! session and serves the API and the map page.

use std::{sync::Arc, time::Duration};

use application::{GeocodingPort, PlannerSession, RoutingPort};
use axum::http::{HeaderValue, Method};
use infrastructure::{
    AppConfig, DEFAULT_LOG_FILTER, DisabledRoutingAdapter, LogFormat, NominatimGeocodingAdapter,
    OrsRoutingAdapter, init_logging,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the format can be honoured
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let log_format: LogFormat = config.server.log_format.parse()?;
    init_logging(log_format, DEFAULT_LOG_FILTER)?;

    info!("🗺️ MeterRoute v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    config.log_summary();

    // Initialize adapters
    let geocoding: Arc<dyn GeocodingPort> = Arc::new(
        NominatimGeocodingAdapter::new(&config.geocoding.to_nominatim_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize geocoding: {e}"))?,
    );

    let routing: Arc<dyn RoutingPort> = match config
        .routing
        .validate()
        .and_then(|()| {
            OrsRoutingAdapter::new(&config.routing.to_ors_config()).map_err(|e| e.to_string())
        }) {
        Ok(adapter) => Arc::new(adapter),
        Err(reason) => {
            warn!(%reason, "Route calculation disabled");
            Arc::new(DisabledRoutingAdapter::new(reason))
        },
    };

    let state = AppState {
        planner: Arc::new(PlannerSession::new(
            geocoding,
            routing,
            config.planner.to_settings(),
        )),
        map: Arc::new(config.map.clone()),
    };

    // Build router
    let mut app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ))
        .layer(TraceLayer::new_for_http());

    if config.server.cors_enabled {
        let cors_layer = if config.server.allowed_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .server
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers(Any)
        };
        app = app.layer(cors_layer);
    }

    // Start server
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
