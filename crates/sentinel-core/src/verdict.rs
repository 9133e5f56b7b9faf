//! Detector verdicts: the per-category output of one inspection.

use serde::{Deserialize, Serialize};

/// Qualitative confidence label attached to a risk category.
///
/// Static per category, not derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    Confident,
    Likely,
    Unlikely,
}

/// One detector's output for one inspected text.
///
/// An inspection yields exactly one verdict per registered category,
/// including categories where nothing was detected. The wire format uses
/// the field names the dashboard and SDK clients already consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Category label, e.g. "Prompt Attack".
    #[serde(rename = "type")]
    pub category: String,
    /// Human-readable explanation of the category.
    pub description: String,
    pub confidence: ConfidenceLabel,
    pub detected: bool,
    /// Numeric confidence score in [0, 100].
    #[serde(rename = "confidenceValue")]
    pub confidence_value: u8,
}
