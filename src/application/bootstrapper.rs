//! Application bootstrapper
//!
//! Handles all initialization and setup for the Launchpad backend.

use std::sync::Arc;

use axum::{http::HeaderValue, middleware as axum_middleware, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{storage::StorageBackend, CONFIG};
use crate::db;
use crate::endpoints;
use crate::middleware::security_headers;
use crate::services::{scheduler, seed_demo_data};
use crate::state::AppState;
use crate::storage::{DatabaseStorage, MemoryStorage, Storage};

/// Bootstrap and run the application
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Launchpad backend v{}", env!("CARGO_PKG_VERSION"));

    let state = init_services().await?;

    // Start periodic tasks (orphan sweep, metrics sampler)
    scheduler::start_scheduler(state.storage.clone(), &CONFIG.scheduler);

    let app = create_app(state, &CONFIG.server.allowed_origins);

    serve(app).await
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("launchpad={},tower_http=info", CONFIG.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_ansi(false))
        .init();
}

/// Initialize storage and the application state
async fn init_services() -> anyhow::Result<AppState> {
    let backend = CONFIG
        .storage
        .backend()
        .map_err(|e| anyhow::anyhow!("LAUNCHPAD_STORAGE: {}", e))?;
    let storage = init_storage(backend).await?;

    if CONFIG.storage.seed_demo {
        seed_demo_data(storage.as_ref()).await?;
    }

    Ok(AppState::new(storage))
}

/// Open the configured store (runs migrations for the database backend)
pub async fn init_storage(backend: StorageBackend) -> anyhow::Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage; data is lost on restart");
            Arc::new(MemoryStorage::new())
        }
        StorageBackend::Database => {
            let conn = db::connect().await?;
            tracing::info!("Database connection established");
            Arc::new(DatabaseStorage::new(conn))
        }
    };
    Ok(storage)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Create the main application router
pub fn create_app(state: AppState, allowed_origins: &[String]) -> Router {
    endpoints::create_router(state)
        .layer(axum_middleware::from_fn(security_headers))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}

/// Start the HTTP server
async fn serve(app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(CONFIG.server.bind_address()).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
