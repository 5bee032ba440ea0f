//! One pipeline pass per user interaction: snapshot the selection, rank every
//! touched sector, classify every selected company, and hand the presentation
//! layer plain data.
//!
//! A failing company never aborts the pass. Lookup and projection failures are
//! recorded per company; a classifier failure is fatal for the affected
//! predictions only (no retry, inference is deterministic) while rankings
//! remain valid partial results.

use std::sync::Arc;

use chrono::Utc;

use assessment_core::{
    AssessmentReport, AssessmentResult, AssessmentStage, CompanyDataset, CompanyFailure,
    CompanyMetrics, FeatureVector, RiskClassifier, SelectionSet,
};
use peer_ranker::PeerRanker;

pub struct AssessmentOrchestrator {
    ranker: PeerRanker,
    classifier: Arc<dyn RiskClassifier>,
}

impl AssessmentOrchestrator {
    pub fn new(classifier: Arc<dyn RiskClassifier>) -> Self {
        Self {
            ranker: PeerRanker::new(),
            classifier,
        }
    }

    pub fn with_ranker(mut self, ranker: PeerRanker) -> Self {
        self.ranker = ranker;
        self
    }

    /// Run one synchronous recomputation pass over the immutable dataset.
    ///
    /// Output ordering equals selection order throughout. An empty selection
    /// is a normal state and yields an empty report.
    pub async fn assess(
        &self,
        dataset: &CompanyDataset,
        selection: &SelectionSet,
    ) -> AssessmentResult<AssessmentReport> {
        // Snapshot: later selection edits supersede this pass, they never
        // mutate it.
        let selection = selection.clone();

        if selection.is_empty() {
            tracing::info!("no companies selected");
            return Ok(AssessmentReport::empty());
        }
        tracing::info!(selected = selection.len(), "starting assessment pass");

        let mut metrics = Vec::new();
        let mut failures = Vec::new();
        let mut pending: Vec<(String, FeatureVector)> = Vec::new();

        for company_name in selection.iter() {
            let record = match dataset.lookup(company_name) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(company = company_name, %err, "lookup failed");
                    failures.push(CompanyFailure {
                        company_name: company_name.to_string(),
                        stage: AssessmentStage::Lookup,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            metrics.push(CompanyMetrics {
                company_name: record.company_name.clone(),
                market_cap: record.market_cap,
                total_revenue: record.total_revenue,
                debt: record.debt,
                net_profit_pct: record.net_profit_pct,
            });

            match FeatureVector::from_record(record) {
                Ok(vector) => pending.push((record.company_name.clone(), vector)),
                Err(err) => {
                    tracing::warn!(company = company_name, %err, "feature projection failed");
                    failures.push(CompanyFailure {
                        company_name: company_name.to_string(),
                        stage: AssessmentStage::Features,
                        message: err.to_string(),
                    });
                }
            }
        }

        let rankings = self.ranker.rank_all(dataset, &selection)?;

        let mut predictions = Vec::new();
        if !pending.is_empty() {
            let vectors: Vec<FeatureVector> = pending.iter().map(|(_, v)| *v).collect();
            match self.classifier.predict(&vectors).await {
                Ok(classes) if classes.len() == vectors.len() => {
                    for ((company_name, _), class) in pending.iter().zip(classes) {
                        tracing::debug!(company = company_name.as_str(), class, "classified");
                        predictions.push(risk_presenter::prediction_for(company_name, class));
                    }
                }
                Ok(classes) => {
                    tracing::warn!(
                        expected = vectors.len(),
                        got = classes.len(),
                        "classifier broke the one-class-per-input contract"
                    );
                    self.fail_pending(&pending, "classifier returned wrong cardinality", &mut failures);
                }
                Err(err) => {
                    tracing::warn!(%err, "classifier unavailable");
                    self.fail_pending(&pending, &err.to_string(), &mut failures);
                }
            }
        }

        Ok(AssessmentReport {
            generated_at: Utc::now(),
            metrics,
            rankings,
            predictions,
            failures,
        })
    }

    fn fail_pending(
        &self,
        pending: &[(String, FeatureVector)],
        message: &str,
        failures: &mut Vec<CompanyFailure>,
    ) {
        for (company_name, _) in pending {
            failures.push(CompanyFailure {
                company_name: company_name.clone(),
                stage: AssessmentStage::Classify,
                message: message.to_string(),
            });
        }
    }
}
