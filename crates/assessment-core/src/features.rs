//! Fixed-order feature projection for the pretrained insolvency classifier.
//!
//! The classifier was trained on exactly these seven columns in exactly this
//! order. Reordering does not fail, it silently mispredicts, so the order is
//! treated as a versioned contract with `FEATURE_NAMES` as the single source
//! of truth.

use serde::{Deserialize, Serialize};

use crate::error::{AssessmentError, AssessmentResult};
use crate::types::CompanyRecord;

pub const FEATURE_COUNT: usize = 7;

/// Pinned feature order, matching the training data columns.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "watchlist_encoded",
    "suspension_encoded",
    "price_cf_risk_score",
    "debt_risk_score",
    "debt_equity_risk_score",
    "mkt_cap_risk_score",
    "tot_rev_risk_score",
];

/// Ordered model input for one company.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Project a company record into the pinned feature order.
    ///
    /// Fails with `MissingField` on the first absent field.
    pub fn from_record(record: &CompanyRecord) -> AssessmentResult<Self> {
        let fields = [
            record.watchlist_encoded,
            record.suspension_encoded,
            record.price_cf_risk_score,
            record.debt_risk_score,
            record.debt_equity_risk_score,
            record.mkt_cap_risk_score,
            record.tot_rev_risk_score,
        ];

        let mut values = [0.0; FEATURE_COUNT];
        for (i, field) in fields.iter().enumerate() {
            values[i] = field.ok_or(AssessmentError::MissingField {
                company: record.company_name.clone(),
                field: FEATURE_NAMES[i],
            })?;
        }
        Ok(Self(values))
    }

    /// Build from a raw slice, validating length and finiteness.
    pub fn from_slice(values: &[f64]) -> AssessmentResult<Self> {
        if values.len() != FEATURE_COUNT {
            return Err(AssessmentError::InvalidFeatureVector(format!(
                "expected {} features, got {}",
                FEATURE_COUNT,
                values.len()
            )));
        }
        let mut fixed = [0.0; FEATURE_COUNT];
        for (i, &v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(AssessmentError::InvalidFeatureVector(format!(
                    "feature '{}' is not a finite number: {}",
                    FEATURE_NAMES[i], v
                )));
            }
            fixed[i] = v;
        }
        Ok(Self(fixed))
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Re-check finiteness before handing the vector to a model.
    pub fn validate(&self) -> AssessmentResult<()> {
        for (i, v) in self.0.iter().enumerate() {
            if !v.is_finite() {
                return Err(AssessmentError::InvalidFeatureVector(format!(
                    "feature '{}' is not a finite number: {}",
                    FEATURE_NAMES[i], v
                )));
            }
        }
        Ok(())
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_features() -> CompanyRecord {
        CompanyRecord {
            company_name: "Acme Marine".to_string(),
            ticker: "ACM".to_string(),
            sector: "Industrials".to_string(),
            market_cap: 250.0,
            total_revenue: 180.0,
            net_profit_pct: 4.2,
            debt: 90.0,
            watchlist_encoded: Some(0.0),
            suspension_encoded: Some(0.0),
            price_cf_risk_score: Some(1.0),
            debt_risk_score: Some(2.0),
            debt_equity_risk_score: Some(1.0),
            mkt_cap_risk_score: Some(0.0),
            tot_rev_risk_score: Some(1.0),
        }
    }

    #[test]
    fn projects_in_pinned_order() {
        let record = record_with_features();
        let vector = FeatureVector::from_record(&record).unwrap();
        assert_eq!(vector.values(), &[0.0, 0.0, 1.0, 2.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn missing_field_names_company_and_field() {
        let mut record = record_with_features();
        record.debt_equity_risk_score = None;
        let err = FeatureVector::from_record(&record).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::MissingField {
                company: "Acme Marine".to_string(),
                field: "debt_equity_risk_score",
            }
        );
    }

    #[test]
    fn rejects_wrong_length() {
        let err = FeatureVector::from_slice(&[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidFeatureVector(_)));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err =
            FeatureVector::from_slice(&[0.0, f64::NAN, 2.0, 0.0, 1.0, 2.0, 0.0]).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidFeatureVector(_)));
    }
}
