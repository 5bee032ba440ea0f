//! Maps classifier output to a risk label and the one-hot proportions the
//! donut chart consumes.

use assessment_core::{RiskLabel, RiskPrediction};

/// Chart palette for the (low, medium, high) slots.
pub const DONUT_COLORS: [&str; 3] = ["green", "yellow", "red"];

/// Map a class code to its label and one-hot (low, medium, high) proportions.
///
/// Anything outside {0, 1} maps to High Risk. That default-to-worst-case
/// policy matches the model's established behavior; codes outside the
/// documented {0, 1, 2} range are logged as anomalies since they usually mean
/// an upstream model problem rather than a genuinely high-risk company.
pub fn present(predicted_class: i32) -> (RiskLabel, [u8; 3]) {
    if !(0..=2).contains(&predicted_class) {
        tracing::warn!(
            predicted_class,
            "class code outside documented range, defaulting to High Risk"
        );
    }
    match predicted_class {
        0 => (RiskLabel::Low, [1, 0, 0]),
        1 => (RiskLabel::Medium, [0, 1, 0]),
        _ => (RiskLabel::High, [0, 0, 1]),
    }
}

/// Assemble the full prediction record for one company.
pub fn prediction_for(company_name: &str, predicted_class: i32) -> RiskPrediction {
    let (label, proportions) = present(predicted_class);
    RiskPrediction {
        company_name: company_name.to_string(),
        predicted_class,
        label,
        proportions,
    }
}
