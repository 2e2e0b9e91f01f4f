//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use nars_core::{Concept, EngineEvent, NarsError, Sentence, primitives::MAX_SENTENCE_LENGTH};
use serde::{Deserialize, Serialize};

/// Maximum number of cycles a single `/step` request may run.
pub const MAX_CYCLES_PER_REQUEST: u64 = 10_000;

/// Maximum number of sentences a single `/input` request may carry.
pub const MAX_SENTENCES_PER_REQUEST: usize = 1_000;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STATUS RESPONSE
// =============================================================================

/// Engine status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub cycle: u64,
    pub concepts: usize,
    pub buffered: usize,
    pub pending_operations: usize,
}

// =============================================================================
// INPUT REQUEST/RESPONSE
// =============================================================================

/// Narsese input request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequest {
    pub sentences: Vec<String>,
}

impl InputRequest {
    /// Check request limits before any sentence is parsed.
    pub fn validate(&self) -> Result<(), NarsError> {
        if self.sentences.len() > MAX_SENTENCES_PER_REQUEST {
            return Err(NarsError::Syntax(format!(
                "{} sentences exceed the limit of {} per request",
                self.sentences.len(),
                MAX_SENTENCES_PER_REQUEST
            )));
        }
        if let Some(long) = self
            .sentences
            .iter()
            .find(|s| s.len() > MAX_SENTENCE_LENGTH)
        {
            return Err(NarsError::Syntax(format!(
                "sentence of {} bytes exceeds maximum {} bytes",
                long.len(),
                MAX_SENTENCE_LENGTH
            )));
        }
        Ok(())
    }
}

/// Narsese input response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputResponse {
    pub success: bool,
    pub accepted: usize,
    #[serde(default)]
    pub ids: Vec<u64>,
    pub error: Option<String>,
}

impl InputResponse {
    pub fn success(ids: Vec<u64>) -> Self {
        Self {
            success: true,
            accepted: ids.len(),
            ids,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            accepted: 0,
            ids: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// STEP REQUEST/RESPONSE
// =============================================================================

/// Run-cycles request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRequest {
    #[serde(default = "default_cycles")]
    pub cycles: u64,
}

fn default_cycles() -> u64 {
    1
}

/// Run-cycles response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponse {
    pub success: bool,
    pub cycle: u64,
    pub error: Option<String>,
}

// =============================================================================
// OUTPUTS RESPONSE
// =============================================================================

/// Drained engine events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputsResponse {
    pub events: Vec<EngineEvent>,
}

// =============================================================================
// CONCEPT REQUEST/RESPONSE
// =============================================================================

/// Concept lookup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptRequest {
    pub term: String,
}

/// A stored sentence, rendered relative to the current cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceJson {
    pub sentence: String,
    pub frequency: Option<f64>,
    pub confidence: Option<f64>,
    pub occurrence_time: Option<u64>,
}

impl SentenceJson {
    pub fn from_sentence(sentence: &Sentence, cycle: u64) -> Self {
        let value = sentence.value();
        Self {
            sentence: sentence.render_at(cycle),
            frequency: value.map(|v| v.frequency()),
            confidence: value.map(|v| v.confidence()),
            occurrence_time: sentence.occurrence_time(),
        }
    }
}

/// Concept lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptResponse {
    pub success: bool,
    pub found: bool,
    pub term: Option<String>,
    #[serde(default)]
    pub beliefs: Vec<SentenceJson>,
    #[serde(default)]
    pub desires: Vec<SentenceJson>,
    pub error: Option<String>,
}

impl ConceptResponse {
    pub fn not_found() -> Self {
        Self {
            success: true,
            found: false,
            term: None,
            beliefs: vec![],
            desires: vec![],
            error: None,
        }
    }

    pub fn with_concept(concept: &Concept, cycle: u64) -> Self {
        Self {
            success: true,
            found: true,
            term: Some(concept.term().to_string()),
            beliefs: concept
                .beliefs()
                .iter()
                .map(|s| SentenceJson::from_sentence(s, cycle))
                .collect(),
            desires: concept
                .desires()
                .iter()
                .map(|s| SentenceJson::from_sentence(s, cycle))
                .collect(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            found: false,
            term: None,
            beliefs: vec![],
            desires: vec![],
            error: Some(msg.into()),
        }
    }
}
