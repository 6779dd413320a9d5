pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod tree;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::db::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
}

/// Run the server
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.database.idle_timeout_secs))
        .connect(&config.database.url)
        .await?;

    tracing::info!(
        "Database pool: max={}, min={} connections",
        config.database.max_connections,
        config.database.min_connections
    );

    db::MIGRATOR.run(&pool).await?;
    tracing::info!("Migrations completed successfully");

    let state = AppState {
        db: Database::new(pool),
        config: Arc::new(config),
    };
    let config = state.config.clone();

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("forum-threads listening on {}", addr);
    tracing::info!(
        "Max body size: {} bytes, max posts per batch: {}",
        config.server.max_body_size,
        config.posts.max_posts_per_batch
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Build the full application router around the API routes
pub fn router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.security.cors_origins);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Ready check (includes DB connectivity)
        .route("/ready", get({
            let db = state.db.clone();
            move || ready_check(db.clone())
        }))
        .nest("/api", api::router())
        // Middleware layers (order matters - applied bottom to top)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Readiness check - verifies database connectivity
async fn ready_check(db: Database) -> Result<&'static str, &'static str> {
    match sqlx::query("SELECT 1").execute(db.pool()).await {
        Ok(_) => Ok("ready"),
        Err(_) => Err("database unavailable"),
    }
}

/// Build CORS layer from configuration
fn build_cors_layer(origins: &str) -> CorsLayer {
    if origins == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;

        let origins: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
