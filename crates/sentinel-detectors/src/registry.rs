//! Ordered registry of detectors.

use crate::builtin::{
    ContentViolationDetector, DataLeakageDetector, PromptAttackDetector, UnknownLinksDetector,
};
use crate::detector::Detector;

/// A fixed, ordered collection of independent detectors.
///
/// Registration order is inspection order: every inspection yields one
/// verdict per detector in the order they were registered. The set is
/// closed for a given build; categories are added by registering new
/// detectors, never by branching on category names elsewhere.
pub struct DetectorRegistry {
    detectors: Vec<Box<dyn Detector>>,
}

impl DetectorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// The reference detector set, in its canonical order.
    pub fn reference_set() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PromptAttackDetector));
        registry.register(Box::new(DataLeakageDetector));
        registry.register(Box::new(ContentViolationDetector));
        registry.register(Box::new(UnknownLinksDetector));
        registry
    }

    /// Append a detector. Order of registration is preserved.
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Category labels in registration order.
    pub fn categories(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.category()).collect()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn Detector> {
        self.detectors.iter().map(AsRef::as_ref)
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::reference_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_set_order() {
        let registry = DetectorRegistry::reference_set();
        assert_eq!(
            registry.categories(),
            vec![
                "Prompt Attack",
                "Data Leakage",
                "Content Violation",
                "Unknown Links"
            ]
        );
    }

    #[test]
    fn test_registration_appends() {
        let mut registry = DetectorRegistry::new();
        assert!(registry.is_empty());
        registry.register(Box::new(UnknownLinksDetector));
        registry.register(Box::new(PromptAttackDetector));
        assert_eq!(
            registry.categories(),
            vec!["Unknown Links", "Prompt Attack"]
        );
    }
}
