//! The inspection engine: total, deterministic verdicts over a registry.

use sentinel_core::Verdict;
use tracing::warn;

use crate::detector::Signal;
use crate::registry::DetectorRegistry;

/// Runs the detector set over submitted text.
///
/// `inspect` is a pure function of the registry and the input: no I/O,
/// no randomness, no shared state. Detector faults are downgraded to a
/// clear signal so the output always covers every registered category.
pub struct InspectionEngine {
    registry: DetectorRegistry,
}

impl InspectionEngine {
    pub fn new(registry: DetectorRegistry) -> Self {
        Self { registry }
    }

    /// One verdict per registered category, in registration order.
    pub fn inspect(&self, text: &str) -> Vec<Verdict> {
        self.registry
            .iter()
            .map(|detector| {
                let signal = match detector.evaluate(text) {
                    Ok(signal) => signal,
                    Err(err) => {
                        warn!(category = detector.category(), %err, "detector fault, treating as not detected");
                        Signal::clear()
                    }
                };

                Verdict {
                    category: detector.category().to_string(),
                    description: detector.description().to_string(),
                    confidence: detector.confidence_label(),
                    detected: signal.detected,
                    confidence_value: signal.confidence_value.min(100),
                }
            })
            .collect()
    }

    /// Category labels registered with this engine, in inspection order.
    pub fn categories(&self) -> Vec<&'static str> {
        self.registry.categories()
    }
}

impl Default for InspectionEngine {
    fn default() -> Self {
        Self::new(DetectorRegistry::reference_set())
    }
}

/// Labels of the categories an inspection flagged, in verdict order.
pub fn detected_categories(verdicts: &[Verdict]) -> Vec<String> {
    verdicts
        .iter()
        .filter(|v| v.detected)
        .map(|v| v.category.clone())
        .collect()
}
