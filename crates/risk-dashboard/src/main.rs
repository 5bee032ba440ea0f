//! risk-dashboard: run one assessment pass over a screener CSV export.
//!
//! Loads the dataset once, snapshots the selection from argv, and prints the
//! three presentation outputs: raw metrics, per-sector peer rankings, and
//! per-company risk predictions.
//!
//! Usage:
//!   cargo run -p risk-dashboard -- --data screener.csv --select "Company A" "Company B"
//!   cargo run -p risk-dashboard -- --data screener.csv --top-n 10 --select "Company A"
//!   INSOLVENCY_MODEL_URL=http://localhost:8005 cargo run -p risk-dashboard -- ...

use std::sync::Arc;

use assessment_core::SelectionSet;
use assessment_orchestrator::AssessmentOrchestrator;
use peer_ranker::PeerRanker;
use risk_classifier::{ClassifierConfig, RemoteClassifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "risk_dashboard=info,assessment_orchestrator=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let data_path = args
        .iter()
        .position(|a| a == "--data")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.to_string())
        .unwrap_or_else(|| "screener.csv".to_string());

    let top_n: Option<usize> = args
        .iter()
        .position(|a| a == "--top-n")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok());

    // Everything after --select (up to the next flag) is a company name.
    let selected: Vec<String> = match args.iter().position(|a| a == "--select") {
        Some(i) => args[i + 1..]
            .iter()
            .take_while(|a| !a.starts_with("--"))
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let dataset = screener_data::load_dataset(&data_path)?;
    let selection = SelectionSet::from_iter(selected);
    tracing::info!(
        companies = dataset.len(),
        selected = selection.len(),
        "running assessment pass"
    );

    let mut config = ClassifierConfig::default();
    if let Some(url) = args
        .iter()
        .position(|a| a == "--model-url")
        .and_then(|i| args.get(i + 1))
    {
        config.base_url = url.to_string();
    }
    let classifier = RemoteClassifier::new(config)?;

    let mut orchestrator = AssessmentOrchestrator::new(Arc::new(classifier));
    if let Some(n) = top_n {
        orchestrator = orchestrator.with_ranker(PeerRanker::with_top_n(n));
    }

    let report = orchestrator.assess(&dataset, &selection).await?;

    if report.metrics.is_empty() && report.failures.is_empty() {
        println!("No companies selected.");
        return Ok(());
    }

    println!("Basic Financial Information");
    println!(
        "{:<4}{:<32}{:>14}{:>14}{:>12}{:>14}",
        "#", "Company", "Mkt Cap ($M)", "Tot. Rev ($M)", "Debt ($M)", "Net Profit %"
    );
    for (i, m) in report.metrics.iter().enumerate() {
        println!(
            "{:<4}{:<32}{:>14.2}{:>14.2}{:>12.2}{:>14.2}",
            i + 1,
            m.company_name,
            m.market_cap,
            m.total_revenue,
            m.debt,
            m.net_profit_pct
        );
    }

    for ranking in &report.rankings {
        println!();
        println!(
            "Top Ranking by {} (Based on Total Revenue $Millions)",
            ranking.sector
        );
        println!(
            "{:<6}{:<32}{:>14}{:>14}",
            "Rank", "Company", "Tot. Rev ($M)", "Net Profit %"
        );
        for peer in &ranking.peers {
            println!(
                "{:<6}{:<32}{:>14.2}{:>14.2}",
                peer.rank, peer.company_name, peer.total_revenue, peer.net_profit_pct
            );
        }
    }

    if !report.predictions.is_empty() {
        println!();
        println!("Insolvency Risk");
        for p in &report.predictions {
            println!(
                "{}: {} (low/medium/high = {}/{}/{})",
                p.company_name, p.label, p.proportions[0], p.proportions[1], p.proportions[2]
            );
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("Failures");
        for f in &report.failures {
            println!("{} [{}]: {}", f.company_name, f.stage.as_str(), f.message);
        }
    }

    Ok(())
}
