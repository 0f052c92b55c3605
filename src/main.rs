//! Machine Health ML Prediction Service
//!
//! Serves predictive-maintenance inferences for industrial machines: given
//! live sensor telemetry it produces a health score, a risk tier, a ranked
//! feature-attribution explanation and a per-failure-mode breakdown.
//!
//! # Architecture
//!
//! ```text
//! raw telemetry ──► normalizer ──► feature vector builder ──► classifier
//!                                      (schema-driven)         (ONNX)
//!                                                                │
//!             ┌───────────────┬────────────────────┬─────────────┘
//!             ▼               ▼                    ▼
//!        risk scorer   attribution engine   failure-mode decomposer
//!             │               │                    │
//!             └───────────────┴──► responsibility mapper
//!                                        │
//!                                        ▼
//!                               response assembler
//! ```

mod config;
mod constants;
mod error;
mod handlers;
mod logic;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::predictor::PredictionEngine;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "machine_health_ml=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Machine Health ML service starting ({})...", config.environment);
    tracing::info!("Model directory: {}", config.model_dir.display());

    // Load the model, schema and importance artifacts once; refuse to serve
    // without them
    let engine = PredictionEngine::from_artifacts(&config.model_dir)
        .expect("Failed to load model artifacts");
    tracing::info!("Model loaded. Features: {}", engine.schema().len());

    // Build application state
    let state = AppState {
        engine: Arc::new(engine),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<PredictionEngine>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
