use std::process;

use tracing::{error, info};

use passiv_rebalance::application::orchestrator::Rebalancer;
use passiv_rebalance::config::Settings;
use passiv_rebalance::infrastructure::passiv_client::PassivClient;
use passiv_rebalance::logging;

/// The only place in the crate that decides the process exit code. Every
/// failure below bubbles up here as a `Result`.
#[tokio::main]
async fn main() {
    // A .env file is optional; real environment variables take precedence.
    let _ = dotenvy::dotenv();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is configured from the settings, so a config error can
            // only go to stderr.
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(settings.log_level, &settings.log_file) {
        eprintln!("Failed to open log file '{}': {e}", settings.log_file);
        process::exit(1);
    }

    info!("Starting passiv-rebalance");

    let client = PassivClient::new(settings.base_url.clone(), settings.api_key.clone());
    let rebalancer = Rebalancer::new(settings, client);

    if let Err(e) = rebalancer.run().await {
        error!("Run aborted: {e}");
        process::exit(1);
    }
}
