use crate::models::{AiClassification, VerificationStatus, WasteType};
use rand::Rng;

/// Photo classifier seam. The store runs it over every submitted report so
/// tests can inject fixed cleanliness scores instead of depending on the
/// mock's randomness.
pub trait Classifier: Send {
    fn classify(&self, waste_tags: &[WasteType]) -> AiClassification;
}

/// Stand-in for a real vision model: plausible random cleanliness scores and
/// a confidence in the high range.
pub struct MockClassifier;

impl Classifier for MockClassifier {
    fn classify(&self, waste_tags: &[WasteType]) -> AiClassification {
        let mut rng = rand::thread_rng();

        AiClassification {
            confidence: rng.gen_range(0.78..0.98),
            detected_waste: waste_tags.iter().copied().take(3).collect(),
            cleanliness_before: rng.gen_range(20..60),
            cleanliness_after: rng.gen_range(65..95),
            verification_status: if rng.gen_bool(0.9) {
                VerificationStatus::Pass
            } else {
                VerificationStatus::Review
            },
        }
    }
}

/// Deterministic classifier for tests and replays.
pub struct FixedClassifier {
    pub cleanliness_before: u32,
    pub cleanliness_after: u32,
    pub confidence: f64,
}

impl FixedClassifier {
    pub fn new(cleanliness_before: u32, cleanliness_after: u32) -> Self {
        Self {
            cleanliness_before,
            cleanliness_after,
            confidence: 0.9,
        }
    }
}

impl Classifier for FixedClassifier {
    fn classify(&self, waste_tags: &[WasteType]) -> AiClassification {
        AiClassification {
            confidence: self.confidence,
            detected_waste: waste_tags.iter().copied().take(3).collect(),
            cleanliness_before: self.cleanliness_before,
            cleanliness_after: self.cleanliness_after,
            verification_status: VerificationStatus::Pass,
        }
    }
}
