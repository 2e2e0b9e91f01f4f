//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        ConceptRequest, ConceptResponse, HealthResponse, InputRequest, InputResponse,
        MAX_CYCLES_PER_REQUEST, OutputsResponse, StatusResponse, StepRequest, StepResponse,
    },
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use nars_core::{IdSequence, parse_sentence, parse_term};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STATUS HANDLER
// =============================================================================

/// Get engine status.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.read().await;

    let response = StatusResponse {
        cycle: engine.cycle(),
        concepts: engine.memory().len(),
        buffered: engine.buffered(),
        pending_operations: engine.pending_operations(),
    };

    (StatusCode::OK, Json(response))
}

// =============================================================================
// INPUT HANDLER
// =============================================================================

/// Submit Narsese sentences.
///
/// Every sentence is parsed before any is submitted, so one syntax error
/// rejects the whole request.
pub async fn input_handler(
    State(state): State<AppState>,
    Json(request): Json<InputRequest>,
) -> impl IntoResponse {
    if let Err(e) = request.validate() {
        return (StatusCode::BAD_REQUEST, Json(InputResponse::error(e.to_string())));
    }

    let mut scratch = IdSequence::new();
    for text in &request.sentences {
        if let Err(e) = parse_sentence(text, &mut scratch, 0) {
            return (StatusCode::BAD_REQUEST, Json(InputResponse::error(e.to_string())));
        }
    }

    let mut engine = state.engine.write().await;
    let mut ids = Vec::with_capacity(request.sentences.len());
    for text in &request.sentences {
        match engine.submit(text) {
            Ok(id) => ids.push(id.0),
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(InputResponse::error(format!("Submit failed: {}", e))),
                );
            }
        }
    }

    (StatusCode::OK, Json(InputResponse::success(ids)))
}

// =============================================================================
// STEP HANDLER
// =============================================================================

/// Run reasoning cycles.
pub async fn step_handler(
    State(state): State<AppState>,
    Json(request): Json<StepRequest>,
) -> impl IntoResponse {
    let mut engine = state.engine.write().await;

    if request.cycles > MAX_CYCLES_PER_REQUEST {
        return (
            StatusCode::BAD_REQUEST,
            Json(StepResponse {
                success: false,
                cycle: engine.cycle(),
                error: Some(format!(
                    "{} cycles exceed the limit of {} per request",
                    request.cycles, MAX_CYCLES_PER_REQUEST
                )),
            }),
        );
    }

    engine.run_cycles(request.cycles);
    (
        StatusCode::OK,
        Json(StepResponse {
            success: true,
            cycle: engine.cycle(),
            error: None,
        }),
    )
}

// =============================================================================
// OUTPUTS HANDLER
// =============================================================================

/// Drain answers and executed operations produced since the last call.
pub async fn outputs_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut engine = state.engine.write().await;
    Json(OutputsResponse {
        events: engine.drain_events(),
    })
}

// =============================================================================
// CONCEPT HANDLER
// =============================================================================

/// Look up the beliefs and desires of one concept.
pub async fn concept_handler(
    State(state): State<AppState>,
    Json(request): Json<ConceptRequest>,
) -> impl IntoResponse {
    let term = match parse_term(&request.term) {
        Ok(t) => t,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ConceptResponse::error(e.to_string())),
            );
        }
    };

    let engine = state.engine.read().await;
    match engine.memory().concept(&term) {
        Some(concept) => (
            StatusCode::OK,
            Json(ConceptResponse::with_concept(concept, engine.cycle())),
        ),
        None => (StatusCode::OK, Json(ConceptResponse::not_found())),
    }
}

// =============================================================================
// SNAPSHOT HANDLER
// =============================================================================

/// Every stored belief and desire, as JSON.
pub async fn snapshot_handler(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.read().await;
    Json(engine.snapshot())
}
