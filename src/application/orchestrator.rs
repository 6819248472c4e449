use tracing::{debug, info};

use crate::config::{RunMode, Settings};
use crate::domain::entities::portfolio::PortfolioGroup;
use crate::domain::errors::AppError;
use crate::infrastructure::passiv_client::PassivClient;

/// Drives the rebalancing workflow end to end: connectivity probe, portfolio
/// resolution, trade fetch, order submission. Strictly sequential; the first
/// failure aborts the run and propagates to the process boundary.
pub struct Rebalancer {
    settings: Settings,
    client: PassivClient,
}

impl Rebalancer {
    pub fn new(settings: Settings, client: PassivClient) -> Self {
        Self { settings, client }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        info!("Starting rebalancing run in {} mode", self.settings.run_mode);

        debug!("Testing the API...");
        self.client.ping().await?;

        if self.settings.run_mode == RunMode::Check {
            info!("API connectivity check passed, nothing else to do");
            return Ok(());
        }

        let portfolio_id = self.resolve_portfolio_id().await?;
        debug!("Resolved portfolio id {}", portfolio_id);

        let portfolio = self.client.portfolio_info(&portfolio_id).await?;
        let batch = &portfolio.calculated_trades;

        if batch.trades.is_empty() {
            info!("There are currently no trades possible to allocate your money.");
            return Ok(());
        }

        info!(
            "There are {} trades possible to allocate your money.",
            batch.trades.len()
        );
        for trade in &batch.trades {
            info!(
                "{} {} {}. Total: {} {}",
                trade.action,
                trade.units,
                trade.universal_symbol.symbol,
                trade.universal_symbol.currency.code,
                trade.price
            );
        }

        if self.settings.run_mode == RunMode::DryRun {
            info!("Dry run: leaving calculated trade {} unsubmitted", batch.id);
            return Ok(());
        }

        info!("Executing calculated trade {} to rebalance portfolio...", batch.id);
        let executions = self.client.place_orders(&portfolio_id, &batch.id).await?;
        for execution in &executions {
            info!(
                "{} {}: {}x{} ({} {}). Commission: {}",
                execution.state(),
                execution.action(),
                execution.filled_units(),
                execution.symbol(),
                execution.price(),
                execution.currency_code(),
                execution.commission()
            );
        }

        info!("Rebalancing run finished");
        Ok(())
    }

    /// Resolves the configured portfolio name to its group id. Zero or
    /// multiple matches are explicit errors; an id is never guessed.
    async fn resolve_portfolio_id(&self) -> Result<String, AppError> {
        let name = self.settings.portfolio_name.as_deref().ok_or_else(|| {
            AppError::Config("PORTFOLIO_NAME is required for this run mode".to_string())
        })?;
        let groups = self.client.portfolio_groups().await?;
        find_portfolio_id(&groups, name)
    }
}

/// Exact, case-sensitive name match over the fetched portfolio groups.
pub fn find_portfolio_id(groups: &[PortfolioGroup], name: &str) -> Result<String, AppError> {
    let mut matches = groups.iter().filter(|group| group.name == name);
    match (matches.next(), matches.next()) {
        (Some(group), None) => Ok(group.id.clone()),
        (Some(_), Some(_)) => Err(AppError::PortfolioAmbiguous {
            name: name.to_string(),
            count: groups.iter().filter(|group| group.name == name).count(),
        }),
        (None, _) => Err(AppError::PortfolioNotFound {
            name: name.to_string(),
            available: groups.iter().map(|group| group.name.clone()).collect(),
        }),
    }
}
