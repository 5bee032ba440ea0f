//! HTTP adapter over the pretrained insolvency model service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use assessment_core::{AssessmentError, AssessmentResult, FeatureVector, RiskClassifier};

use crate::ClassifierConfig;

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    classes: Vec<i32>,
}

/// Remote model client. The request timeout bounds the inference call so a
/// hung model surfaces as `ClassifierUnavailable` instead of stalling the
/// pass.
#[derive(Clone)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteClassifier {
    pub fn new(config: ClassifierConfig) -> AssessmentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssessmentError::ClassifierUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Check service health.
    pub async fn health(&self) -> bool {
        match self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl RiskClassifier for RemoteClassifier {
    async fn predict(&self, vectors: &[FeatureVector]) -> AssessmentResult<Vec<i32>> {
        for vector in vectors {
            vector.validate()?;
        }
        if vectors.is_empty() {
            return Ok(Vec::new());
        }

        let request = PredictRequest {
            instances: vectors.iter().map(|v| v.as_ref().to_vec()).collect(),
        };
        tracing::debug!(batch = vectors.len(), "requesting classification");

        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AssessmentError::ClassifierUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AssessmentError::ClassifierUnavailable(format!(
                "status: {}",
                response.status()
            )));
        }

        let result = response
            .json::<PredictResponse>()
            .await
            .map_err(|e| AssessmentError::ClassifierUnavailable(e.to_string()))?;

        if result.classes.len() != vectors.len() {
            return Err(AssessmentError::ClassifierUnavailable(format!(
                "model returned {} classes for {} inputs",
                result.classes.len(),
                vectors.len()
            )));
        }

        Ok(result.classes)
    }
}
