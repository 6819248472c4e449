use std::env;
use std::fmt;

use tracing::Level;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::errors::AppError;

/// Default path for the append-only log sink.
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Which part of the workflow to run.
///
/// A single flag replaces the two near-duplicate variants of the original
/// workflow (connectivity check vs. full execution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Connectivity probe only; no portfolio is touched.
    Check,
    /// Resolve the portfolio and log the calculated trades, never submit.
    DryRun,
    /// Full workflow including order placement.
    Execute,
}

impl RunMode {
    fn parse(raw: &str) -> Result<RunMode, AppError> {
        match raw.to_lowercase().as_str() {
            "check" => Ok(RunMode::Check),
            "dry-run" | "dry_run" | "dryrun" => Ok(RunMode::DryRun),
            "execute" => Ok(RunMode::Execute),
            other => Err(AppError::Config(format!(
                "Unknown RUN_MODE '{}' (expected check, dry-run or execute)",
                other
            ))),
        }
    }

    /// Whether this mode needs a portfolio name to be configured.
    pub fn needs_portfolio(&self) -> bool {
        !matches!(self, RunMode::Check)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Check => write!(f, "check"),
            RunMode::DryRun => write!(f, "dry-run"),
            RunMode::Execute => write!(f, "execute"),
        }
    }
}

/// Process configuration, loaded once at startup and immutable afterwards.
///
/// Validation happens here, before any network call: a missing or malformed
/// required setting is fatal and the client is never even constructed.
pub struct Settings {
    /// Passiv API token. Wiped from memory on drop, never logged.
    pub api_key: Zeroizing<String>,
    pub base_url: Url,
    /// Required unless `run_mode` is [`RunMode::Check`].
    pub portfolio_name: Option<String>,
    pub run_mode: RunMode,
    pub log_level: Level,
    pub log_file: String,
}

impl Settings {
    /// Read and validate settings from the process environment.
    pub fn from_env() -> Result<Settings, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings, AppError> {
        let run_mode = match lookup("RUN_MODE") {
            Some(raw) => RunMode::parse(&raw)?,
            None => RunMode::Execute,
        };

        let api_key = lookup("PASSIV_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "Passiv API key not found. Put PASSIV_API_KEY=<apikey> in the environment \
                     or a .env file in the working directory"
                        .to_string(),
                )
            })?;

        let raw_url = lookup("PASSIV_API_URL")
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                AppError::Config("PASSIV_API_URL is not set".to_string())
            })?;
        let base_url = Url::parse(&raw_url).map_err(|e| {
            AppError::Config(format!("PASSIV_API_URL '{}' is not a valid URL: {}", raw_url, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "PASSIV_API_URL must be an http or https URL, got scheme '{}'",
                base_url.scheme()
            )));
        }

        let portfolio_name = lookup("PORTFOLIO_NAME").filter(|name| !name.is_empty());
        if run_mode.needs_portfolio() && portfolio_name.is_none() {
            return Err(AppError::Config(
                "Portfolio name not found. Set the portfolio group to rebalance, e.g. \
                 PORTFOLIO_NAME=\"mygreatportfolio\""
                    .to_string(),
            ));
        }

        let log_level = match lookup("LOG_LEVEL") {
            Some(raw) => parse_level(&raw)?,
            None => Level::INFO,
        };

        let log_file = lookup("LOG_FILE")
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Ok(Settings {
            api_key: Zeroizing::new(api_key),
            base_url,
            portfolio_name,
            run_mode,
            log_level,
            log_file,
        })
    }
}

/// Accepts the tracing level names plus the WARNING/CRITICAL spellings other
/// logging stacks use.
fn parse_level(raw: &str) -> Result<Level, AppError> {
    match raw.to_lowercase().as_str() {
        "warning" => Ok(Level::WARN),
        "critical" => Ok(Level::ERROR),
        other => other.parse::<Level>().map_err(|_| {
            AppError::Config(format!(
                "Unknown LOG_LEVEL '{}' (expected trace, debug, info, warn/warning, error or critical)",
                raw
            ))
        }),
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("portfolio_name", &self.portfolio_name)
            .field("run_mode", &self.run_mode)
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .finish()
    }
}
