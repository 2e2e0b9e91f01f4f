//! # NARS HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Cycle, concept count, buffered tasks, pending operations
//! - `POST /input` - Submit Narsese sentences (all-or-nothing)
//! - `POST /step` - Run reasoning cycles
//! - `GET /outputs` - Drain answers and executed operations
//! - `POST /concept` - Beliefs and desires of one concept
//! - `GET /snapshot` - Every stored belief and desire
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `NARS_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `NARS_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `NARS_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::{ApiKey, get_api_key_from_env, keys_match};
pub use middleware::{GlobalRateLimiter, create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    ConceptRequest, ConceptResponse, HealthResponse, InputRequest, InputResponse,
    MAX_CYCLES_PER_REQUEST, MAX_SENTENCES_PER_REQUEST, OutputsResponse, SentenceJson,
    StatusResponse, StepRequest, StepResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use nars_core::{Engine, NarsError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (2 MB).
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the engine.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<Engine>>,
}

impl AppState {
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}

// =============================================================================
// SECURITY CONFIGURATION
// =============================================================================

/// Security settings applied by [`build_router`].
#[derive(Debug, Clone, Default)]
pub struct SecurityConfig {
    /// Required API key. `None` disables authentication.
    pub api_key: Option<String>,
    /// Requests per second. Zero disables rate limiting.
    pub rate_limit: u32,
    /// Raw `NARS_CORS_ORIGINS` value.
    pub cors_origins: Option<String>,
}

impl SecurityConfig {
    /// Read `NARS_API_KEY`, `NARS_RATE_LIMIT` and `NARS_CORS_ORIGINS`.
    pub fn from_env() -> Self {
        Self {
            api_key: get_api_key_from_env(),
            rate_limit: get_rate_limit_from_env(),
            cors_origins: std::env::var("NARS_CORS_ORIGINS").ok(),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from a `NARS_CORS_ORIGINS` value.
///
/// - `"*"` allows every origin
/// - unset, or no valid origin in the list, allows localhost only
/// - otherwise the comma-separated origins are allowed
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (NARS_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(list) => {
            let allowed: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in NARS_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                restricted_cors(allowed)
            }
        }
        None => {
            tracing::info!("CORS: No NARS_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

fn build_localhost_cors() -> CorsLayer {
    let origins = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();
    restricted_cors(origins)
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the router with security settings read from the environment.
pub fn create_router(state: AppState) -> Router {
    build_router(state, &SecurityConfig::from_env())
}

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing
/// 2. CORS
/// 3. Body limit
/// 4. Rate limiting (if enabled)
/// 5. Authentication (if configured)
pub fn build_router(state: AppState, security: &SecurityConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/input", post(handlers::input_handler))
        .route("/step", post(handlers::step_handler))
        .route("/outputs", get(handlers::outputs_handler))
        .route("/concept", post(handlers::concept_handler))
        .route("/snapshot", get(handlers::snapshot_handler));

    match security.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => {
            tracing::info!("API key authentication enabled");
            router = router.layer(axum_middleware::from_fn_with_state(
                Arc::new(key.to_string()),
                auth::api_key_auth_middleware,
            ));
        }
        None => tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set NARS_API_KEY to enable authentication."
        ),
    }

    match create_rate_limiter(security.rate_limit) {
        Some(limiter) => {
            tracing::info!("Rate limiting enabled: {} requests/second", security.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(security.cors_origins.as_deref()))
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Serve `state` on `addr` until Ctrl+C.
///
/// The caller keeps its own clone of `state` to inspect the engine afterwards.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), NarsError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| NarsError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("NARS HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await
        .map_err(|e| NarsError::IoError(format!("Server error: {}", e)))
}
