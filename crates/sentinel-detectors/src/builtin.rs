//! Built-in reference detectors.
//!
//! These are demo-grade literal-trigger predicates standing in for a
//! real classification backend. Each one is a pure substring check with
//! a fixed score, so inspection results are fully reproducible.

use sentinel_core::ConfidenceLabel;

use crate::detector::{Detector, DetectorError, Signal};

/// Flags manipulative instructions intended to override model behavior.
pub struct PromptAttackDetector;

impl PromptAttackDetector {
    const TRIGGER: &'static str = "developer instructions";
    const SCORE: u8 = 90;
}

impl Detector for PromptAttackDetector {
    fn category(&self) -> &'static str {
        "Prompt Attack"
    }

    fn description(&self) -> &'static str {
        "Manipulative instructions intended to override the model's \
         intended behavior, including prompt injections and jailbreak \
         attempts."
    }

    fn confidence_label(&self) -> ConfidenceLabel {
        ConfidenceLabel::Confident
    }

    fn evaluate(&self, text: &str) -> Result<Signal, DetectorError> {
        if text.contains(Self::TRIGGER) {
            Ok(Signal::flagged(Self::SCORE))
        } else {
            Ok(Signal::clear())
        }
    }
}

/// Flags leakage of sensitive data such as PII and payment card numbers.
pub struct DataLeakageDetector;

impl DataLeakageDetector {
    const TRIGGER: &'static str = "374245455400128";
    const SCORE: u8 = 95;
}

impl Detector for DataLeakageDetector {
    fn category(&self) -> &'static str {
        "Data Leakage"
    }

    fn description(&self) -> &'static str {
        "Leakage of sensitive data including Personally Identifiable \
         Information (PII), such as names, email addresses, and credit \
         card numbers."
    }

    fn confidence_label(&self) -> ConfidenceLabel {
        ConfidenceLabel::Unlikely
    }

    fn evaluate(&self, text: &str) -> Result<Signal, DetectorError> {
        if text.contains(Self::TRIGGER) {
            Ok(Signal::flagged(Self::SCORE))
        } else {
            Ok(Signal::clear())
        }
    }
}

/// Flags harmful or inappropriate material.
pub struct ContentViolationDetector;

impl ContentViolationDetector {
    const TRIGGER: &'static str = "mushrooms";
    const SCORE: u8 = 85;
}

impl Detector for ContentViolationDetector {
    fn category(&self) -> &'static str {
        "Content Violation"
    }

    fn description(&self) -> &'static str {
        "Harmful or inappropriate material, such as hate speech, \
         explicit language, or violence."
    }

    fn confidence_label(&self) -> ConfidenceLabel {
        ConfidenceLabel::Unlikely
    }

    fn evaluate(&self, text: &str) -> Result<Signal, DetectorError> {
        if text.contains(Self::TRIGGER) {
            Ok(Signal::flagged(Self::SCORE))
        } else {
            Ok(Signal::clear())
        }
    }
}

/// Flags links outside the popular-domain set or a custom allowlist.
///
/// The reference heuristics carry no link trigger, so this detector
/// always reports a clear signal; it exists so the category appears in
/// every inspection and can grow a real predicate without touching the
/// engine.
pub struct UnknownLinksDetector;

impl Detector for UnknownLinksDetector {
    fn category(&self) -> &'static str {
        "Unknown Links"
    }

    fn description(&self) -> &'static str {
        "Potential malicious link as the URL is not among the top 1 \
         million most popular domains or included in a custom allowlist."
    }

    fn confidence_label(&self) -> ConfidenceLabel {
        ConfidenceLabel::Unlikely
    }

    fn evaluate(&self, _text: &str) -> Result<Signal, DetectorError> {
        Ok(Signal::clear())
    }
}
