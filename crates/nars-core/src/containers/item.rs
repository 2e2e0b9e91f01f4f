//! # Items and Budgets
//!
//! An `Item` wraps a value stored in a bag with its lookup key and budget.
//! Budgets are only ever changed through the owning container, which keeps
//! each item in the bucket its budget maps to.

use crate::primitives::{BUDGET_CEILING, BUDGET_FLOOR, DEFAULT_ITEM_PRIORITY, DEFAULT_ITEM_QUALITY};
use serde::{Deserialize, Serialize};

/// Priority and quality of an item, each clamped to
/// `[BUDGET_FLOOR, BUDGET_CEILING]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    priority: f64,
    quality: f64,
}

impl Budget {
    #[must_use]
    pub fn new(priority: f64, quality: f64) -> Self {
        Self {
            priority: clamp(priority),
            quality: clamp(quality),
        }
    }

    #[must_use]
    pub const fn priority(&self) -> f64 {
        self.priority
    }

    #[must_use]
    pub const fn quality(&self) -> f64 {
        self.quality
    }

    pub(crate) fn set_priority(&mut self, priority: f64) {
        self.priority = clamp(priority);
    }

    pub(crate) fn set_quality(&mut self, quality: f64) {
        self.quality = clamp(quality);
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_PRIORITY, DEFAULT_ITEM_QUALITY)
    }
}

fn clamp(value: f64) -> f64 {
    if value.is_nan() {
        BUDGET_FLOOR
    } else {
        value.clamp(BUDGET_FLOOR, BUDGET_CEILING)
    }
}

/// A keyed, budgeted value inside a bag.
#[derive(Debug, Clone)]
pub struct Item<T> {
    key: String,
    value: T,
    budget: Budget,
}

impl<T> Item<T> {
    pub(crate) fn new(key: String, value: T, budget: Budget) -> Self {
        Self { key, value, budget }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    #[must_use]
    pub const fn budget(&self) -> Budget {
        self.budget
    }

    pub(crate) fn budget_mut(&mut self) -> &mut Budget {
        &mut self.budget
    }

    pub(crate) fn into_parts(self) -> (String, T) {
        (self.key, self.value)
    }
}
