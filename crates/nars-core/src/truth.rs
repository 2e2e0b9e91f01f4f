//! # Truth Calculus
//!
//! Evidential values and the closed-form truth functions of the logic.
//!
//! Every function here is pure. Those that convert between (frequency,
//! confidence) and evidence counts take the evidential horizon `k` explicitly.
//!
//! ## Evidence Duality
//!
//! ```text
//! w  = k * c / (1 - c)      total evidence
//! w+ = k * f * c / (1 - c)  positive evidence
//! f  = w+ / w
//! c  = w / (w + k)
//! ```

use crate::NarsError;
use crate::primitives::{DEFAULT_CONFIDENCE, DEFAULT_FREQUENCY, MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::syntax::{TRUTH_VALUE_MARKER, VALUE_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// EVIDENTIAL VALUE
// =============================================================================

/// A truth value (judgments) or desire value (goals).
///
/// Frequency is in `[0, 1]`. Confidence is clamped into
/// `[MIN_CONFIDENCE, MAX_CONFIDENCE]` so evidence weights stay finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvidentialValue {
    frequency: f64,
    confidence: f64,
}

impl EvidentialValue {
    /// Build a value, clamping both components into range.
    #[must_use]
    pub fn new(frequency: f64, confidence: f64) -> Self {
        Self {
            frequency: frequency.clamp(0.0, 1.0),
            confidence: clamp_confidence(confidence),
        }
    }

    /// Build a value from user input. Frequency outside `[0, 1]` is an error.
    pub fn checked(frequency: f64, confidence: f64) -> Result<Self, NarsError> {
        if !(0.0..=1.0).contains(&frequency) {
            return Err(NarsError::syntax(format!(
                "frequency {} must be in [0,1]",
                frequency
            )));
        }
        if confidence.is_nan() {
            return Err(NarsError::syntax("confidence is not a number"));
        }
        Ok(Self::new(frequency, confidence))
    }

    #[must_use]
    pub const fn frequency(&self) -> f64 {
        self.frequency
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Same frequency, different confidence.
    #[must_use]
    pub fn with_confidence(self, confidence: f64) -> Self {
        Self::new(self.frequency, confidence)
    }

    /// `c * (f - 0.5) + 0.5`
    #[must_use]
    pub fn expectation(&self) -> f64 {
        expectation(self.frequency, self.confidence)
    }
}

impl Default for EvidentialValue {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY, DEFAULT_CONFIDENCE)
    }
}

impl fmt::Display for EvidentialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}{}{:.2}{}",
            TRUTH_VALUE_MARKER, self.frequency, VALUE_SEPARATOR, self.confidence, TRUTH_VALUE_MARKER
        )
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence >= 1.0 {
        MAX_CONFIDENCE
    } else if confidence <= 0.0 {
        MIN_CONFIDENCE
    } else {
        confidence
    }
}

// =============================================================================
// EXTENDED BOOLEAN OPERATORS
// =============================================================================

/// Product of all arguments.
#[must_use]
pub fn and(values: &[f64]) -> f64 {
    values.iter().product()
}

/// `1 - Π(1 - x)`
#[must_use]
pub fn or(values: &[f64]) -> f64 {
    1.0 - values.iter().map(|x| 1.0 - x).product::<f64>()
}

/// Geometric mean: `(Πx)^(1/n)`.
#[must_use]
pub fn and_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 1.0;
    }
    and(values).powf(1.0 / values.len() as f64)
}

/// `1 - x`
#[must_use]
pub fn not(value: f64) -> f64 {
    1.0 - value
}

// =============================================================================
// EVIDENCE CONVERSION
// =============================================================================

/// `(w+, w)` for a frequency/confidence pair.
#[must_use]
pub fn evidence_from_value(frequency: f64, confidence: f64, k: f64) -> (f64, f64) {
    let w = k * confidence / (1.0 - confidence);
    (frequency * w, w)
}

/// `c = w / (w + k)`
#[must_use]
pub fn confidence_from_evidence(w: f64, k: f64) -> f64 {
    w / (w + k)
}

/// Convert evidence counts back into a value.
///
/// With no evidence at all (`w+ = w = 0`) the frequency is 1.
#[must_use]
pub fn value_from_evidence(positive: f64, total: f64, k: f64) -> EvidentialValue {
    let frequency = if positive == 0.0 && total == 0.0 {
        if positive == total { 1.0 } else { 0.0 }
    } else {
        positive / total
    };
    EvidentialValue::new(frequency, confidence_from_evidence(total, k))
}

// =============================================================================
// TRUTH FUNCTIONS
// =============================================================================

/// The two-premise truth functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruthFunction {
    Revision,
    Deduction,
    Analogy,
    Resemblance,
    Abduction,
    Induction,
    Exemplification,
    Comparison,
    Intersection,
    Union,
    Difference,
}

impl TruthFunction {
    /// Apply to the premise values `(f1, c1)` and `(f2, c2)`.
    #[must_use]
    pub fn apply(self, a: EvidentialValue, b: EvidentialValue, k: f64) -> EvidentialValue {
        let (f1, c1, f2, c2) = (a.frequency, a.confidence, b.frequency, b.confidence);
        match self {
            Self::Revision => {
                let (wp1, w1) = evidence_from_value(f1, c1, k);
                let (wp2, w2) = evidence_from_value(f2, c2, k);
                value_from_evidence(wp1 + wp2, w1 + w2, k)
            }
            Self::Deduction => EvidentialValue::new(and(&[f1, f2]), and(&[f1, f2, c1, c2])),
            Self::Analogy => EvidentialValue::new(and(&[f1, f2]), and(&[f2, c1, c2])),
            Self::Resemblance => {
                EvidentialValue::new(and(&[f1, f2]), and(&[or(&[f1, f2]), c1, c2]))
            }
            Self::Abduction => {
                value_from_evidence(and(&[f1, f2, c1, c2]), and(&[f1, c1, c2]), k)
            }
            Self::Induction => {
                value_from_evidence(and(&[f1, f2, c1, c2]), and(&[f2, c1, c2]), k)
            }
            Self::Exemplification => {
                let w = and(&[f1, f2, c1, c2]);
                value_from_evidence(w, w, k)
            }
            Self::Comparison => value_from_evidence(
                and(&[f1, f2, c1, c2]),
                and(&[or(&[f1, f2]), c1, c2]),
                k,
            ),
            Self::Intersection => {
                EvidentialValue::new(and_average(&[f1, f2]), and_average(&[c1, c2]))
            }
            Self::Union => EvidentialValue::new(or(&[f1, f2]), and_average(&[c1, c2])),
            Self::Difference => EvidentialValue::new(and(&[f1, not(f2)]), and(&[c1, c2])),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Revision => "Revision",
            Self::Deduction => "Deduction",
            Self::Analogy => "Analogy",
            Self::Resemblance => "Resemblance",
            Self::Abduction => "Abduction",
            Self::Induction => "Induction",
            Self::Exemplification => "Exemplification",
            Self::Comparison => "Comparison",
            Self::Intersection => "Intersection",
            Self::Union => "Union",
            Self::Difference => "Difference",
        }
    }
}

/// `(1 - f, c)`
#[must_use]
pub fn negation(value: EvidentialValue) -> EvidentialValue {
    EvidentialValue::new(not(value.frequency), value.confidence)
}

/// `(1, f*c / (f*c + k))`
#[must_use]
pub fn conversion(value: EvidentialValue, k: f64) -> EvidentialValue {
    let fc = value.frequency * value.confidence;
    EvidentialValue::new(1.0, fc / (fc + k))
}

/// `(f, AND(f, c))`
#[must_use]
pub fn contraposition(value: EvidentialValue) -> EvidentialValue {
    EvidentialValue::new(
        value.frequency,
        and(&[value.frequency, value.confidence]),
    )
}

/// Decay confidence by `decay^|from - to|`. Frequency is unchanged.
#[must_use]
pub fn projection(value: EvidentialValue, from: u64, to: u64, decay: f64) -> EvidentialValue {
    if from == to {
        return value;
    }
    let interval = from.abs_diff(to);
    let exponent = i32::try_from(interval).unwrap_or(i32::MAX);
    value.with_confidence(value.confidence * decay.powi(exponent))
}

/// Convert a temporal confidence to an eternal one: `c / (k + c)`.
#[must_use]
pub fn eternalization(value: EvidentialValue, k: f64) -> EvidentialValue {
    value.with_confidence(value.confidence / (k + value.confidence))
}

/// `c * (f - 0.5) + 0.5`
#[must_use]
pub fn expectation(frequency: f64, confidence: f64) -> f64 {
    confidence * (frequency - 0.5) + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    const K: f64 = 1.0;
    const EPS: f64 = 1e-9;

    fn v(f: f64, c: f64) -> EvidentialValue {
        EvidentialValue::new(f, c)
    }

    #[test]
    fn confidence_is_clamped_inward() {
        assert_eq!(v(1.0, 1.0).confidence(), MAX_CONFIDENCE);
        assert_eq!(v(1.0, 0.0).confidence(), MIN_CONFIDENCE);
        assert_eq!(v(1.0, -3.0).confidence(), MIN_CONFIDENCE);
        assert_eq!(EvidentialValue::default(), v(1.0, 0.9));
    }

    #[test]
    fn checked_rejects_bad_frequency() {
        assert!(EvidentialValue::checked(1.2, 0.9).is_err());
        assert!(EvidentialValue::checked(-0.1, 0.9).is_err());
        assert!(EvidentialValue::checked(0.5, 0.9).is_ok());
    }

    #[test]
    fn boolean_operators() {
        assert!((and(&[0.5, 0.5]) - 0.25).abs() < EPS);
        assert!((or(&[0.5, 0.5]) - 0.75).abs() < EPS);
        assert!((and_average(&[0.25, 1.0]) - 0.5).abs() < EPS);
        assert!((not(0.3) - 0.7).abs() < EPS);
    }

    #[test]
    fn deduction_matches_closed_form() {
        let r = TruthFunction::Deduction.apply(v(0.9, 0.9), v(0.9, 0.9), K);
        assert!((r.frequency() - 0.81).abs() < EPS);
        assert!((r.confidence() - 0.6561).abs() < EPS);
    }

    #[test]
    fn revision_of_identical_evidence_raises_confidence() {
        let r = TruthFunction::Revision.apply(v(0.7, 0.6), v(0.7, 0.6), K);
        assert!((r.frequency() - 0.7).abs() < EPS);
        // 2c / (1 + c)
        assert!((r.confidence() - 0.75).abs() < EPS);
    }

    #[test]
    fn revision_of_opposite_evidence_averages_frequency() {
        let r = TruthFunction::Revision.apply(v(1.0, 0.9), v(0.0, 0.9), K);
        assert!((r.frequency() - 0.5).abs() < EPS);
        assert!(r.confidence() > 0.9);
    }

    #[test]
    fn zero_evidence_yields_full_frequency() {
        let r = value_from_evidence(0.0, 0.0, K);
        assert_eq!(r.frequency(), 1.0);
        assert_eq!(r.confidence(), MIN_CONFIDENCE);
    }

    #[test]
    fn abduction_and_induction_are_mirrored() {
        let a = TruthFunction::Abduction.apply(v(0.8, 0.9), v(0.6, 0.9), K);
        let i = TruthFunction::Induction.apply(v(0.6, 0.9), v(0.8, 0.9), K);
        assert!((a.frequency() - i.frequency()).abs() < EPS);
        assert!((a.confidence() - i.confidence()).abs() < EPS);
        // f = f2 for abduction
        assert!((a.frequency() - 0.6).abs() < EPS);
    }

    #[test]
    fn weak_functions_stay_below_half_confidence() {
        for function in [
            TruthFunction::Abduction,
            TruthFunction::Induction,
            TruthFunction::Exemplification,
            TruthFunction::Comparison,
        ] {
            let r = function.apply(v(1.0, 0.9), v(1.0, 0.9), K);
            assert!(r.confidence() < 0.5, "{} too confident", function.name());
        }
    }

    #[test]
    fn set_functions() {
        let i = TruthFunction::Intersection.apply(v(0.25, 0.81), v(1.0, 1.0 - 1e-12), K);
        assert!((i.frequency() - 0.5).abs() < EPS);
        let u = TruthFunction::Union.apply(v(0.5, 0.9), v(0.5, 0.9), K);
        assert!((u.frequency() - 0.75).abs() < EPS);
        let d = TruthFunction::Difference.apply(v(1.0, 0.9), v(0.25, 0.9), K);
        assert!((d.frequency() - 0.75).abs() < EPS);
        assert!((d.confidence() - 0.81).abs() < EPS);
    }

    #[test]
    fn one_premise_functions() {
        let n = negation(v(0.2, 0.9));
        assert!((n.frequency() - 0.8).abs() < EPS);
        let c = conversion(v(1.0, 0.9), K);
        assert_eq!(c.frequency(), 1.0);
        assert!((c.confidence() - 0.9 / 1.9).abs() < EPS);
        let cp = contraposition(v(0.5, 0.8));
        assert!((cp.confidence() - 0.4).abs() < EPS);
    }

    #[test]
    fn projection_decays_by_distance() {
        let base = v(1.0, 0.9);
        assert_eq!(projection(base, 5, 5, 0.95), base);
        let p = projection(base, 3, 5, 0.5);
        assert!((p.confidence() - 0.225).abs() < EPS);
        assert_eq!(projection(base, 5, 3, 0.5), p);
    }

    #[test]
    fn eternalization_lowers_confidence() {
        let e = eternalization(v(1.0, 0.9), K);
        assert!((e.confidence() - 0.9 / 1.9).abs() < EPS);
    }

    #[test]
    fn expectation_bounds() {
        assert!((expectation(1.0, 0.0001) - 0.5).abs() < 1e-3);
        assert!((expectation(0.0, 0.0001) - 0.5).abs() < 1e-3);
        assert!((v(1.0, 0.9).expectation() - 0.95).abs() < EPS);
    }

    #[test]
    fn display_renders_two_decimals() {
        assert_eq!(v(1.0, 0.9).to_string(), "%1.00;0.90%");
    }
}
