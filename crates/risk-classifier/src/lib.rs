pub mod offline;
pub mod remote;

pub use offline::StaticClassifier;
pub use remote::RemoteClassifier;

use std::time::Duration;

/// Configuration for the insolvency model service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("INSOLVENCY_MODEL_URL")
                .unwrap_or_else(|_| "http://localhost:8005".to_string()),
            timeout: Duration::from_secs(10),
        }
    }
}
