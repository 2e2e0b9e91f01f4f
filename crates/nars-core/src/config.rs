//! # Engine Configuration
//!
//! `NarsConfig` is the immutable settings struct an `Engine` is built with.
//! It is plain serde data: the app layer reads it from TOML, tests build it
//! with struct-update syntax over `NarsConfig::default()`.

use crate::NarsError;
use serde::{Deserialize, Serialize};

/// Tunable parameters of one reasoning engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarsConfig {
    /// Evidential horizon.
    pub k: f64,
    /// Decision rule threshold: a goal is pursued iff its desirability exceeds this.
    pub decision_threshold: f64,
    /// Expectation at or above which a sentence counts as positive.
    pub positive_threshold: f64,
    /// Expectation below which a sentence counts as negative.
    pub negative_threshold: f64,
    /// Number of priority buckets per bag.
    pub bag_granularity: usize,
    /// Capacity of the concept bag.
    pub memory_concept_capacity: usize,
    /// Capacity of each per-concept link bag.
    pub concept_link_capacity: usize,
    /// Capacity of each belief and desire table.
    pub table_capacity: usize,
    /// Capacity of the global input buffer.
    pub global_buffer_capacity: usize,
    /// Capacity of the temporal event buffer.
    pub event_buffer_capacity: usize,
    /// Per-cycle confidence decay when projecting events.
    pub projection_decay_event: f64,
    /// Per-cycle confidence decay when projecting goals.
    pub projection_decay_desire: f64,
    /// AND-multiplier applied to a considered concept's priority.
    pub priority_decay_value: f64,
    /// OR-multiplier applied to an activated concept's priority.
    pub priority_strengthen_value: f64,
    /// Attempts at finding a semantically related concept.
    pub related_concept_attempts: usize,
    /// Background Consider steps per cycle. Zero disables them.
    pub consider_per_cycle: usize,
    /// Feed input events pairwise through the temporal rules.
    pub temporal_chaining: bool,
    /// RNG seed. `None` seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for NarsConfig {
    fn default() -> Self {
        Self {
            k: 1.0,
            decision_threshold: 0.6,
            positive_threshold: 0.51,
            negative_threshold: 0.5,
            bag_granularity: 100,
            memory_concept_capacity: 1000,
            concept_link_capacity: 100,
            table_capacity: 5,
            global_buffer_capacity: 1000,
            event_buffer_capacity: 15,
            projection_decay_event: 0.95,
            projection_decay_desire: 0.95,
            priority_decay_value: 0.29,
            priority_strengthen_value: 0.99,
            related_concept_attempts: 3,
            consider_per_cycle: 1,
            temporal_chaining: false,
            seed: None,
        }
    }
}

impl NarsConfig {
    /// Default settings with a fixed RNG seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check every field is inside its valid range.
    pub fn validate(&self) -> Result<(), NarsError> {
        if !(self.k > 0.0 && self.k.is_finite()) {
            return Err(NarsError::InvalidConfig(format!(
                "k must be positive, got {}",
                self.k
            )));
        }

        let unit_fields = [
            ("decision_threshold", self.decision_threshold),
            ("positive_threshold", self.positive_threshold),
            ("negative_threshold", self.negative_threshold),
            ("projection_decay_event", self.projection_decay_event),
            ("projection_decay_desire", self.projection_decay_desire),
            ("priority_decay_value", self.priority_decay_value),
            ("priority_strengthen_value", self.priority_strengthen_value),
        ];
        for (name, value) in unit_fields {
            if !(value > 0.0 && value < 1.0) {
                return Err(NarsError::InvalidConfig(format!(
                    "{} must be in (0, 1), got {}",
                    name, value
                )));
            }
        }

        let capacity_fields = [
            ("bag_granularity", self.bag_granularity),
            ("memory_concept_capacity", self.memory_concept_capacity),
            ("concept_link_capacity", self.concept_link_capacity),
            ("table_capacity", self.table_capacity),
            ("global_buffer_capacity", self.global_buffer_capacity),
            ("event_buffer_capacity", self.event_buffer_capacity),
            ("related_concept_attempts", self.related_concept_attempts),
        ];
        for (name, value) in capacity_fields {
            if value == 0 {
                return Err(NarsError::InvalidConfig(format!(
                    "{} must be non-zero",
                    name
                )));
            }
        }

        Ok(())
    }
}
