//! The `Detector` trait: one independent classifier per risk category.

use sentinel_core::ConfidenceLabel;

/// Confidence score reported for a category when nothing was detected.
pub const BASE_CONFIDENCE: u8 = 10;

/// Errors raised by a detector implementation.
///
/// A failing detector never aborts an inspection; the engine records the
/// fault and treats the category as not detected.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    /// The detector could not evaluate the input.
    #[error("detector '{category}' failed: {reason}")]
    Evaluation {
        category: &'static str,
        reason: String,
    },
}

/// The raw outcome of evaluating one detector against one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub detected: bool,
    /// Numeric confidence score in [0, 100].
    pub confidence_value: u8,
}

impl Signal {
    /// Nothing detected; base confidence.
    pub fn clear() -> Self {
        Self {
            detected: false,
            confidence_value: BASE_CONFIDENCE,
        }
    }

    /// Category detected with the given score.
    pub fn flagged(confidence_value: u8) -> Self {
        Self {
            detected: true,
            confidence_value,
        }
    }
}

/// An independent content classifier for one risk category.
///
/// Implementations must be pure and deterministic: the same input always
/// yields the same signal, with no shared mutable state and no I/O.
/// Empty and very large inputs evaluate to a clear signal rather than an
/// error; genuinely unevaluable input may return [`DetectorError`],
/// which the engine downgrades to not-detected.
pub trait Detector: Send + Sync {
    /// Category label, e.g. "Data Leakage". Unique within a registry.
    fn category(&self) -> &'static str;

    /// Human-readable description of what the category covers.
    fn description(&self) -> &'static str;

    /// Qualitative confidence label, static per category.
    fn confidence_label(&self) -> ConfidenceLabel;

    /// Evaluate the text and report whether the category applies.
    fn evaluate(&self, text: &str) -> Result<Signal, DetectorError>;
}
