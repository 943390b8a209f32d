use std::path::PathBuf;

use crate::dashboard::DashboardOptions;
use crate::models::{Thresholds, DEFAULT_COLD_DAYS, DEFAULT_HOT_DAYS};
use crate::ranking::DEFAULT_TOP_N;

/// Largest accepted `TOP_N`.
pub const MAX_TOP_N: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cold_days: f64,
    pub hot_days: f64,
    pub top_n: usize,
    /// JSON lead list read by the `lead-triage` binary.
    pub leads_file: Option<PathBuf>,
}

fn parse_days(name: &str, value: Option<String>, default: f64) -> anyhow::Result<f64> {
    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };

    let days: f64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a number of days, got '{}'", name, raw))?;
    if !days.is_finite() || days < 0.0 {
        anyhow::bail!("{} must be a non-negative number of days", name);
    }
    Ok(days)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            cold_days: parse_days("COLD_DAYS", lookup("COLD_DAYS"), DEFAULT_COLD_DAYS)?,
            hot_days: parse_days("HOT_DAYS", lookup("HOT_DAYS"), DEFAULT_HOT_DAYS)?,
            top_n: lookup("TOP_N")
                .filter(|v| !v.trim().is_empty())
                .map(|v| {
                    v.trim()
                        .parse::<usize>()
                        .map_err(|_| anyhow::anyhow!("TOP_N must be a whole number, got '{}'", v))
                })
                .transpose()?
                .map(|n| {
                    if n == 0 || n > MAX_TOP_N {
                        anyhow::bail!("TOP_N must be between 1 and {}", MAX_TOP_N);
                    }
                    Ok(n)
                })
                .transpose()?
                .unwrap_or(DEFAULT_TOP_N),
            leads_file: lookup("LEADS_FILE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Thresholds: cold >= {}d, hot <= {}d, top {}",
            config.cold_days,
            config.hot_days,
            config.top_n
        );
        if let Some(ref path) = config.leads_file {
            tracing::debug!("Leads file: {}", path.display());
        }

        Ok(config)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            cold_days: self.cold_days,
            hot_days: self.hot_days,
        }
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            thresholds: self.thresholds(),
            top_n: self.top_n,
        }
    }
}
