//! Prediction pipeline — classifier output to a labeled, recommended result.
//!
//! Applies the confidence threshold and resolves recommendations, enforcing
//! the invariant that low-confidence predictions always surface as `Unknown`
//! with the `Unknown` guidance, whatever the raw arg-max label was.

use image::RgbImage;

use crate::classify::labels::ClassIndexTable;
use crate::classify::{Classifier, ClassifierError};
use crate::config::CONFIDENCE_THRESHOLD;
use crate::recommend::{RecommendationRecord, RecommendationTable, UNKNOWN_LABEL};

/// Per-request prediction outcome.
#[derive(Debug, Clone)]
pub struct PredictionResult {
    pub label: String,
    pub confidence: f32,
    pub recommendation: RecommendationRecord,
}

/// Classifier plus the two lookup tables, wired once at startup.
pub struct Predictor {
    classifier: Box<dyn Classifier>,
    labels: ClassIndexTable,
    recommendations: RecommendationTable,
}

impl Predictor {
    pub fn new(
        classifier: Box<dyn Classifier>,
        labels: ClassIndexTable,
        recommendations: RecommendationTable,
    ) -> Self {
        Self {
            classifier,
            labels,
            recommendations,
        }
    }

    /// One forward pass, then label resolution and recommendation lookup.
    pub fn predict(&self, image: &RgbImage) -> Result<PredictionResult, ClassifierError> {
        let raw = self.classifier.predict(image)?;

        let mut label = self
            .labels
            .name(raw.class_index)
            .unwrap_or(UNKNOWN_LABEL)
            .to_string();

        if raw.confidence < CONFIDENCE_THRESHOLD {
            label = UNKNOWN_LABEL.to_string();
        }

        let recommendation = self.recommendations.resolve(&label);

        tracing::debug!(
            label,
            confidence = raw.confidence,
            class_index = raw.class_index,
            "prediction resolved"
        );

        Ok(PredictionResult {
            label,
            confidence: raw.confidence,
            recommendation,
        })
    }
}
