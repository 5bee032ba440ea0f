use async_trait::async_trait;

use crate::{AssessmentResult, FeatureVector};

/// Seam over the pretrained insolvency model.
///
/// Implementations must return one class code per input vector in the same
/// order, without reordering or carrying state across calls. Class codes are
/// expected in {0, 1, 2}; out-of-range codes are handled downstream by the
/// presenter's default-to-worst-case policy.
#[async_trait]
pub trait RiskClassifier: Send + Sync {
    async fn predict(&self, vectors: &[FeatureVector]) -> AssessmentResult<Vec<i32>>;
}
