use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_priority::config::Config;
use lead_priority::dashboard::DashboardView;
use lead_priority::wire::parse_lead_list;

/// Prints the dashboard view model for a lead list file.
///
/// The lead list comes from `LEADS_FILE` (backend `{ok, items}` envelope or a
/// bare array). The first argument, if given, is the search query.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok once the view is written to stdout.
fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the JSON view
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lead_priority=info,lead_triage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    let path = config
        .leads_file
        .clone()
        .ok_or_else(|| anyhow::anyhow!("LEADS_FILE environment variable required"))?;
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read leads file {}", path.display()))?;
    let leads = parse_lead_list(&raw)
        .with_context(|| format!("Failed to decode leads file {}", path.display()))?;
    tracing::info!("Loaded {} leads from {}", leads.len(), path.display());

    let query = std::env::args().nth(1).unwrap_or_default();
    let view = DashboardView::compute(&leads, &query, &config.dashboard_options(), Utc::now());

    tracing::info!(
        "Counts: total={}, cold={}, hot={}",
        view.counts.total,
        view.counts.cold,
        view.counts.hot
    );

    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
