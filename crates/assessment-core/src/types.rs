use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{AssessmentError, AssessmentResult};

/// One row of the screener export. Field renames pin the original CSV headers.
///
/// The seven encoded/risk-score fields feed the classifier and are optional at
/// the record level; absence surfaces as `MissingField` at projection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(rename = "Company")]
    pub company_name: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Mkt Cap ($M)")]
    pub market_cap: f64,
    #[serde(rename = "Tot. Rev ($M)")]
    pub total_revenue: f64,
    #[serde(rename = "Net Profit %")]
    pub net_profit_pct: f64,
    #[serde(rename = "Debt ($M)")]
    pub debt: f64,
    #[serde(rename = "Watchlist Status_Encoded")]
    pub watchlist_encoded: Option<f64>,
    #[serde(rename = "Suspension Status_Encoded")]
    pub suspension_encoded: Option<f64>,
    #[serde(rename = "Price/CF_Risk_Score")]
    pub price_cf_risk_score: Option<f64>,
    #[serde(rename = "Debt ($M)_Risk_Score")]
    pub debt_risk_score: Option<f64>,
    #[serde(rename = "Debt/Equity_Risk_Score")]
    pub debt_equity_risk_score: Option<f64>,
    #[serde(rename = "Mkt Cap ($M)_Risk_Score")]
    pub mkt_cap_risk_score: Option<f64>,
    #[serde(rename = "Tot. Rev ($M)_Risk_Score")]
    pub tot_rev_risk_score: Option<f64>,
}

/// Immutable session dataset with a company-name index.
///
/// Loaded once at session start and borrowed read-only by every pipeline pass.
#[derive(Debug, Clone)]
pub struct CompanyDataset {
    records: Vec<CompanyRecord>,
    by_name: HashMap<String, usize>,
}

impl CompanyDataset {
    /// Build the dataset, rejecting duplicate company names.
    pub fn new(records: Vec<CompanyRecord>) -> AssessmentResult<Self> {
        let mut by_name = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_name.insert(record.company_name.clone(), idx).is_some() {
                return Err(AssessmentError::DuplicateCompany(
                    record.company_name.clone(),
                ));
            }
        }
        Ok(Self { records, by_name })
    }

    pub fn get(&self, company_name: &str) -> Option<&CompanyRecord> {
        self.by_name.get(company_name).map(|&idx| &self.records[idx])
    }

    /// Indexed lookup that surfaces a referential failure for stale selections.
    pub fn lookup(&self, company_name: &str) -> AssessmentResult<&CompanyRecord> {
        self.get(company_name)
            .ok_or_else(|| AssessmentError::CompanyNotFound(company_name.to_string()))
    }

    /// All records in a sector, in dataset order.
    pub fn sector_records(&self, sector: &str) -> Vec<&CompanyRecord> {
        self.records.iter().filter(|r| r.sector == sector).collect()
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// User-selected company names: insertion-ordered, deduplicated, may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionSet {
    companies: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_iter<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name.into());
        }
        set
    }

    /// Insert preserving first-seen order; duplicates are ignored.
    pub fn insert(&mut self, company_name: String) {
        if !self.companies.iter().any(|c| *c == company_name) {
            self.companies.push(company_name);
        }
    }

    pub fn contains(&self, company_name: &str) -> bool {
        self.companies.iter().any(|c| c == company_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.companies.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

/// One row of a sector ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPeer {
    pub company_name: String,
    pub total_revenue: f64,
    pub net_profit_pct: f64,
    /// Dense rank by descending total revenue; ties share a rank.
    pub rank: usize,
}

/// Ranking output for one sector: forced members plus top-N peers, deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerRankingResult {
    pub sector: String,
    pub peers: Vec<RankedPeer>,
}

/// Raw-metrics table row for one selected company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyMetrics {
    pub company_name: String,
    pub market_cap: f64,
    pub total_revenue: f64,
    pub debt: f64,
    pub net_profit_pct: f64,
}

/// Human-readable risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low Risk",
            RiskLabel::Medium => "Medium Risk",
            RiskLabel::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier verdict for one company.
///
/// `proportions` is one-hot over (low, medium, high) and is the semantic input
/// to the downstream donut chart; the hot slot tracks `predicted_class`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    pub company_name: String,
    pub predicted_class: i32,
    pub label: RiskLabel,
    pub proportions: [u8; 3],
}

/// Pipeline stage where a per-company failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentStage {
    Lookup,
    Features,
    Classify,
}

impl AssessmentStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStage::Lookup => "lookup",
            AssessmentStage::Features => "features",
            AssessmentStage::Classify => "classify",
        }
    }
}

/// Per-company failure surfaced to the presentation boundary.
///
/// One company failing must not abort the rest of the pass, so failures are
/// collected alongside the partial results instead of propagated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFailure {
    pub company_name: String,
    pub stage: AssessmentStage,
    pub message: String,
}

/// Everything one pipeline pass hands to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Utc>,
    /// Raw metrics per selected company, in selection order.
    pub metrics: Vec<CompanyMetrics>,
    /// One ranking per distinct sector of the selection, first-seen order.
    pub rankings: Vec<PeerRankingResult>,
    /// Risk predictions in selection order (failed companies omitted).
    pub predictions: Vec<RiskPrediction>,
    pub failures: Vec<CompanyFailure>,
}

impl AssessmentReport {
    pub fn empty() -> Self {
        Self {
            generated_at: Utc::now(),
            metrics: Vec::new(),
            rankings: Vec::new(),
            predictions: Vec::new(),
            failures: Vec::new(),
        }
    }
}
