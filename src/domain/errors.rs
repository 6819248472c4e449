use thiserror::Error;

/// Everything that can abort a rebalancing run.
///
/// Errors are propagated with `?` up to the process boundary in `main`,
/// which logs them and decides the exit code. No deep call path terminates
/// the process itself.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Connectivity check failed: {0}")]
    Connectivity(String),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Could not find portfolio '{name}'. Known portfolios: {available:?}")]
    PortfolioNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Portfolio name '{name}' matches {count} portfolio groups, refusing to pick one")]
    PortfolioAmbiguous { name: String, count: usize },
}
