//! Placeholder defect classification.
//!
//! Uploaded lots are classified by a fresh random draw every time a wafer is
//! looked at. The demonstration lots use a fixed per-lot pattern instead, so
//! the grid is stable before anything is uploaded.

use crate::config::{
    EDGE_RING_THRESHOLD, EDGE_RING_YIELD, FALLBACK_LOTS, NO_PATTERN_THRESHOLD, NO_PATTERN_YIELD,
    QUICK_YIELD_MAX, QUICK_YIELD_MIN, SCRATCH_YIELD,
};
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DefectType {
    Scratch,
    #[serde(rename = "Edge-Ring")]
    EdgeRing,
    #[serde(rename = "No Pattern")]
    NoPattern,
}

impl DefectType {
    /// Yield estimate used by the wafer grid.
    pub fn base_yield(self) -> u8 {
        match self {
            DefectType::Scratch => SCRATCH_YIELD,
            DefectType::EdgeRing => EDGE_RING_YIELD,
            DefectType::NoPattern => NO_PATTERN_YIELD,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DefectType::Scratch => "Scratch",
            DefectType::EdgeRing => "Edge-Ring",
            DefectType::NoPattern => "No Pattern",
        }
    }

    fn from_draw(p: f64) -> Self {
        if p < EDGE_RING_THRESHOLD {
            DefectType::EdgeRing
        } else if p < NO_PATTERN_THRESHOLD {
            DefectType::NoPattern
        } else {
            DefectType::Scratch
        }
    }
}

impl fmt::Display for DefectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub defect_type: DefectType,
    pub yield_percent: u8,
}

impl From<DefectType> for Classification {
    fn from(defect_type: DefectType) -> Self {
        Self {
            defect_type,
            yield_percent: defect_type.base_yield(),
        }
    }
}

pub trait DefectClassifier {
    /// Classify wafer `wafer_number` (1-based) of `lot_id`.
    fn classify(&mut self, lot_id: &str, wafer_number: usize) -> Classification;
}

/// Classifier for uploaded lots. Every call is an independent draw.
pub struct RandomDefectClassifier<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> RandomDefectClassifier<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DefectClassifier for RandomDefectClassifier<'_, R> {
    fn classify(&mut self, _lot_id: &str, _wafer_number: usize) -> Classification {
        DefectType::from_draw(self.rng.random::<f64>()).into()
    }
}

/// Deterministic classifier for the demonstration lots.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDefectClassifier;

impl PatternDefectClassifier {
    /// Label and defective-wafer list for a lot; unknown lots borrow the first
    /// demonstration lot's pattern.
    pub fn pattern(lot_id: &str) -> (&'static str, &'static [u32]) {
        let (label, pattern) = FALLBACK_LOTS
            .iter()
            .find(|(id, _)| *id == lot_id)
            .unwrap_or(&FALLBACK_LOTS[0]);
        (*label, pattern.as_slice())
    }
}

impl DefectClassifier for PatternDefectClassifier {
    fn classify(&mut self, lot_id: &str, wafer_number: usize) -> Classification {
        let (_, pattern) = Self::pattern(lot_id);
        let position = pattern
            .iter()
            .position(|&defective| defective as usize == wafer_number);

        // Listed wafers alternate Edge-Ring / No Pattern in list order.
        let defect_type = match position {
            Some(pos) if pos % 2 == 0 => DefectType::EdgeRing,
            Some(_) => DefectType::NoPattern,
            None => DefectType::Scratch,
        };
        defect_type.into()
    }
}

/// Coarse yield used when a wafer is picked straight from the sidebar list.
/// Ignores the defect type entirely, so it disagrees with the grid estimate.
pub fn quick_yield<R: Rng>(rng: &mut R) -> u8 {
    rng.random_range(QUICK_YIELD_MIN..QUICK_YIELD_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn draw_thresholds() {
        assert_eq!(DefectType::from_draw(0.0), DefectType::EdgeRing);
        assert_eq!(DefectType::from_draw(0.1999), DefectType::EdgeRing);
        assert_eq!(DefectType::from_draw(0.2), DefectType::NoPattern);
        assert_eq!(DefectType::from_draw(0.3999), DefectType::NoPattern);
        assert_eq!(DefectType::from_draw(0.4), DefectType::Scratch);
        assert_eq!(DefectType::from_draw(0.9999), DefectType::Scratch);
    }

    #[test]
    fn yield_table() {
        assert_eq!(DefectType::Scratch.base_yield(), 85);
        assert_eq!(DefectType::EdgeRing.base_yield(), 65);
        assert_eq!(DefectType::NoPattern.base_yield(), 75);
    }

    #[test]
    fn d101_pattern_alternates_in_list_order() {
        let mut classifier = PatternDefectClassifier;
        let types: Vec<DefectType> = [1, 5, 8, 12, 15]
            .into_iter()
            .map(|n| classifier.classify("D101", n).defect_type)
            .collect();
        assert_eq!(
            types,
            vec![
                DefectType::EdgeRing,
                DefectType::NoPattern,
                DefectType::EdgeRing,
                DefectType::NoPattern,
                DefectType::EdgeRing,
            ]
        );
        assert_eq!(classifier.classify("D101", 2).defect_type, DefectType::Scratch);
        assert_eq!(classifier.classify("D101", 25).defect_type, DefectType::Scratch);
    }

    #[test]
    fn each_fallback_lot_has_its_own_pattern() {
        let mut classifier = PatternDefectClassifier;
        assert_eq!(classifier.classify("D100", 2).defect_type, DefectType::EdgeRing);
        assert_eq!(classifier.classify("D100", 6).defect_type, DefectType::NoPattern);
        assert_eq!(classifier.classify("D100", 1).defect_type, DefectType::Scratch);
        assert_eq!(classifier.classify("D099", 3).defect_type, DefectType::EdgeRing);
        assert_eq!(classifier.classify("D099", 7).defect_type, DefectType::NoPattern);
    }

    #[test]
    fn unknown_lot_uses_first_fallback_pattern() {
        assert_eq!(PatternDefectClassifier::pattern("D555").0, "D101");
        let mut classifier = PatternDefectClassifier;
        assert_eq!(classifier.classify("D555", 5), classifier.classify("D101", 5));
    }

    #[test]
    fn pattern_classification_carries_table_yield() {
        let mut classifier = PatternDefectClassifier;
        assert_eq!(classifier.classify("D101", 1).yield_percent, 65);
        assert_eq!(classifier.classify("D101", 5).yield_percent, 75);
        assert_eq!(classifier.classify("D101", 3).yield_percent, 85);
    }

    #[test]
    fn random_classifier_is_reproducible_per_seed() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut classifier = RandomDefectClassifier::new(&mut rng);
            (1..=25)
                .map(|n| classifier.classify("D100", n))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(7), draw(7));
    }

    #[test]
    fn random_classifier_redraws_on_every_call() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut classifier = RandomDefectClassifier::new(&mut rng);
        let seen: HashSet<DefectType> = (0..500)
            .map(|_| classifier.classify("D100", 1).defect_type)
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn quick_yield_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let y = quick_yield(&mut rng);
            assert!((70..100).contains(&y), "yield {}", y);
        }
    }
}
