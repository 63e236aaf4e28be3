//! Generates the pool account and visit tables.
//!
//! Run with:
//! ```
//! cargo run -p pool-data --bin generate
//! ```
//!
//! Writes `data/test/accounts.csv` and `data/test/pool_visits.csv`; the
//! directory must already exist.

use pool_data::builders::ScenarioBuilder;
use pool_data::names::FakeNameSource;
use time::Weekday;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut rng = rand::thread_rng();

    let result = ScenarioBuilder::pool_season()
        .with_metrics(true)
        .build(&FakeNameSource, &mut rng)?;

    // Summary output
    let summary = &result.summary;
    tracing::info!("Generation completed!");
    tracing::info!("  Accounts: {}", result.accounts.len());
    tracing::info!("  Total visits generated: {}", summary.total_visits);
    tracing::info!("  Accounts without visits: {}", summary.accounts_without_visits);
    for weekday in [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ] {
        tracing::info!("  {weekday}: {}", summary.visits_on(weekday));
    }
    if let Some(metrics) = &result.metrics {
        tracing::info!(
            "  Generation: {} ms, export: {} ms",
            metrics.generation_time_ms,
            metrics.export_time_ms
        );
    }

    Ok(())
}
