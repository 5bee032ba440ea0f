//! Sector peer ranking.
//!
//! For each sector touched by the user's selection, produces a deduplicated
//! top-N revenue ranking that always includes the selected companies, however
//! small they are.

use std::collections::HashSet;

use assessment_core::{
    AssessmentError, AssessmentResult, CompanyDataset, CompanyRecord, PeerRankingResult,
    RankedPeer, SelectionSet,
};

pub const DEFAULT_TOP_N: usize = 5;

pub struct PeerRanker {
    top_n: usize,
}

impl Default for PeerRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerRanker {
    pub fn new() -> Self {
        Self { top_n: DEFAULT_TOP_N }
    }

    pub fn with_top_n(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Rank one sector's peers against the selected companies in that sector.
    ///
    /// Forced members (selected companies belonging to the sector) always
    /// appear in the output; the remaining slots go to the top-N candidates by
    /// total revenue. The union is deduplicated by company name and carries a
    /// dense rank by descending revenue.
    pub fn rank_sector(
        &self,
        dataset: &CompanyDataset,
        sector: &str,
        selection: &SelectionSet,
    ) -> AssessmentResult<PeerRankingResult> {
        let sector_records = dataset.sector_records(sector);
        if sector_records.is_empty() {
            return Err(AssessmentError::UnknownSector(sector.to_string()));
        }

        let (forced, mut candidates): (Vec<&CompanyRecord>, Vec<&CompanyRecord>) =
            sector_records
                .into_iter()
                .partition(|r| selection.contains(&r.company_name));

        // Revenue descending; exact ties broken by name for reproducibility.
        candidates.sort_by(|a, b| {
            b.total_revenue
                .partial_cmp(&a.total_revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.company_name.cmp(&b.company_name))
        });
        candidates.truncate(self.top_n);

        let mut seen: HashSet<&str> = HashSet::new();
        let mut combined: Vec<&CompanyRecord> = Vec::new();
        for &record in forced.iter().chain(candidates.iter()) {
            if seen.insert(record.company_name.as_str()) {
                combined.push(record);
            }
        }

        // Dense rank over the distinct revenues of the combined set.
        let mut revenues: Vec<f64> = combined.iter().map(|r| r.total_revenue).collect();
        revenues.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        revenues.dedup();

        let mut peers: Vec<RankedPeer> = combined
            .into_iter()
            .map(|r| RankedPeer {
                company_name: r.company_name.clone(),
                total_revenue: r.total_revenue,
                net_profit_pct: r.net_profit_pct,
                rank: 1 + revenues
                    .iter()
                    .position(|&rev| rev == r.total_revenue)
                    .unwrap_or(revenues.len()),
            })
            .collect();

        peers.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| a.company_name.cmp(&b.company_name))
        });

        Ok(PeerRankingResult {
            sector: sector.to_string(),
            peers,
        })
    }

    /// Rank every sector touched by the selection, one result per sector in
    /// first-seen selection order. Unknown companies are skipped, not fatal.
    pub fn rank_all(
        &self,
        dataset: &CompanyDataset,
        selection: &SelectionSet,
    ) -> AssessmentResult<Vec<PeerRankingResult>> {
        let mut processed: HashSet<String> = HashSet::new();
        let mut results = Vec::new();

        for company_name in selection.iter() {
            let record = match dataset.get(company_name) {
                Some(record) => record,
                None => {
                    tracing::warn!(company = company_name, "selected company not in dataset");
                    continue;
                }
            };

            if !processed.insert(record.sector.clone()) {
                continue;
            }
            results.push(self.rank_sector(dataset, &record.sector, selection)?);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, sector: &str, revenue: f64) -> CompanyRecord {
        CompanyRecord {
            company_name: name.to_string(),
            ticker: name.to_string(),
            sector: sector.to_string(),
            market_cap: revenue * 2.0,
            total_revenue: revenue,
            net_profit_pct: 5.0,
            debt: 10.0,
            watchlist_encoded: Some(0.0),
            suspension_encoded: Some(0.0),
            price_cf_risk_score: Some(1.0),
            debt_risk_score: Some(1.0),
            debt_equity_risk_score: Some(1.0),
            mkt_cap_risk_score: Some(1.0),
            tot_rev_risk_score: Some(1.0),
        }
    }

    fn finance_dataset() -> CompanyDataset {
        CompanyDataset::new(vec![
            record("A", "Finance", 100.0),
            record("B", "Finance", 90.0),
            record("C", "Finance", 80.0),
            record("D", "Finance", 70.0),
            record("E", "Finance", 60.0),
            record("F", "Finance", 50.0),
        ])
        .unwrap()
    }

    fn names_and_ranks(result: &PeerRankingResult) -> Vec<(&str, usize)> {
        result
            .peers
            .iter()
            .map(|p| (p.company_name.as_str(), p.rank))
            .collect()
    }

    #[test]
    fn small_selected_company_forced_in_beyond_top_5() {
        let dataset = finance_dataset();
        let selection = SelectionSet::from_iter(["F"]);

        let result = PeerRanker::new()
            .rank_sector(&dataset, "Finance", &selection)
            .unwrap();

        assert_eq!(
            names_and_ranks(&result),
            vec![("A", 1), ("B", 2), ("C", 3), ("D", 4), ("E", 5), ("F", 6)]
        );
    }

    #[test]
    fn selected_company_in_natural_top_5_not_duplicated() {
        let dataset = finance_dataset();
        let selection = SelectionSet::from_iter(["A"]);

        let result = PeerRanker::new()
            .rank_sector(&dataset, "Finance", &selection)
            .unwrap();

        assert_eq!(result.peers.len(), 5);
        assert_eq!(
            result
                .peers
                .iter()
                .filter(|p| p.company_name == "A")
                .count(),
            1
        );
        assert_eq!(result.peers[0].company_name, "A");
        assert_eq!(result.peers[0].rank, 1);
    }

    #[test]
    fn sector_smaller_than_top_n_includes_everyone() {
        let dataset = CompanyDataset::new(vec![
            record("X", "Utilities", 40.0),
            record("Y", "Utilities", 30.0),
        ])
        .unwrap();
        let selection = SelectionSet::from_iter(["Y"]);

        let result = PeerRanker::new()
            .rank_sector(&dataset, "Utilities", &selection)
            .unwrap();

        assert_eq!(names_and_ranks(&result), vec![("X", 1), ("Y", 2)]);
    }

    #[test]
    fn revenue_ties_share_dense_rank() {
        let dataset = CompanyDataset::new(vec![
            record("P", "Energy", 100.0),
            record("Q", "Energy", 100.0),
            record("R", "Energy", 80.0),
        ])
        .unwrap();
        let selection = SelectionSet::from_iter(["R"]);

        let result = PeerRanker::new()
            .rank_sector(&dataset, "Energy", &selection)
            .unwrap();

        // Tied companies share rank 1, ordered by name; next distinct revenue
        // continues at rank 2.
        assert_eq!(names_and_ranks(&result), vec![("P", 1), ("Q", 1), ("R", 2)]);
    }

    #[test]
    fn rank_is_monotonic_in_revenue() {
        let dataset = finance_dataset();
        let selection = SelectionSet::from_iter(["F", "C"]);

        let result = PeerRanker::new()
            .rank_sector(&dataset, "Finance", &selection)
            .unwrap();

        for pair in result.peers.windows(2) {
            assert!(pair[0].rank <= pair[1].rank);
            assert!(pair[0].total_revenue >= pair[1].total_revenue);
        }
    }

    #[test]
    fn result_size_bounded_by_forced_plus_top_n() {
        let dataset = finance_dataset();
        let selection = SelectionSet::from_iter(["E", "F"]);

        let result = PeerRanker::with_top_n(3)
            .rank_sector(&dataset, "Finance", &selection)
            .unwrap();

        assert!(result.peers.len() <= 2 + 3);
        let mut names: Vec<&str> = result.peers.iter().map(|p| p.company_name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), result.peers.len());
        assert!(result.peers.iter().any(|p| p.company_name == "E"));
        assert!(result.peers.iter().any(|p| p.company_name == "F"));
    }

    #[test]
    fn unknown_sector_is_an_error() {
        let dataset = finance_dataset();
        let selection = SelectionSet::from_iter(["A"]);

        let err = PeerRanker::new()
            .rank_sector(&dataset, "Shipping", &selection)
            .unwrap_err();
        assert_eq!(err, AssessmentError::UnknownSector("Shipping".to_string()));
    }

    #[test]
    fn rank_all_emits_one_result_per_sector_in_selection_order() {
        let dataset = CompanyDataset::new(vec![
            record("A", "Finance", 100.0),
            record("B", "Finance", 90.0),
            record("X", "Utilities", 40.0),
        ])
        .unwrap();
        let selection = SelectionSet::from_iter(["X", "A", "B"]);

        let results = PeerRanker::new().rank_all(&dataset, &selection).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].sector, "Utilities");
        assert_eq!(results[1].sector, "Finance");
    }

    #[test]
    fn rank_all_skips_unknown_companies() {
        let dataset = finance_dataset();
        let selection = SelectionSet::from_iter(["Nonexistent Corp", "F"]);

        let results = PeerRanker::new().rank_all(&dataset, &selection).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sector, "Finance");
    }

    #[test]
    fn empty_selection_yields_no_results() {
        let dataset = finance_dataset();
        let selection = SelectionSet::new();

        let results = PeerRanker::new().rank_all(&dataset, &selection).unwrap();
        assert!(results.is_empty());
    }
}
