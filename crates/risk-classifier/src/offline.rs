//! Deterministic classifier for offline runs and pipeline tests.

use async_trait::async_trait;

use assessment_core::{AssessmentResult, FeatureVector, RiskClassifier};

/// Returns a preconfigured class per input position, falling back to a fixed
/// class when the sequence runs out. Deterministic and side-effect-free.
#[derive(Debug, Clone)]
pub struct StaticClassifier {
    classes: Vec<i32>,
    fallback: i32,
}

impl StaticClassifier {
    /// Classify everything as the same class.
    pub fn constant(class: i32) -> Self {
        Self {
            classes: Vec::new(),
            fallback: class,
        }
    }

    /// Classify the i-th input as `classes[i]`, `fallback` beyond that.
    pub fn from_sequence(classes: Vec<i32>, fallback: i32) -> Self {
        Self { classes, fallback }
    }
}

#[async_trait]
impl RiskClassifier for StaticClassifier {
    async fn predict(&self, vectors: &[FeatureVector]) -> AssessmentResult<Vec<i32>> {
        for vector in vectors {
            vector.validate()?;
        }
        Ok((0..vectors.len())
            .map(|i| self.classes.get(i).copied().unwrap_or(self.fallback))
            .collect())
    }
}
