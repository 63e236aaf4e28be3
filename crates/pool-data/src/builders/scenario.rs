//! Fluent builder for constructing pool data scenarios.

use std::path::PathBuf;
use std::time::Instant;

use rand::Rng;
use thiserror::Error;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::config::{AccountGenConfig, GenerationConfig, OutputConfig, VisitGenConfig};
use crate::error::GenerationError;
use crate::export::{CsvExporter, ExportError};
use crate::generators::{
    AccountGenerator, AccountRoster, GeneratedAccount, GeneratedVisit, VisitGenerator,
    VisitSummary,
};
use crate::names::NameSource;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result of building a scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    pub accounts: Vec<GeneratedAccount>,
    pub roster: AccountRoster,
    pub visits: Vec<GeneratedVisit>,
    pub summary: VisitSummary,
    /// Metrics from scenario generation (populated if metrics tracking enabled).
    pub metrics: Option<ScenarioMetrics>,
}

/// Performance metrics from scenario generation.
#[derive(Debug, Clone)]
pub struct ScenarioMetrics {
    /// Time spent generating data (milliseconds).
    pub generation_time_ms: u64,
    /// Time spent writing tables (milliseconds, 0 if build_data used).
    pub export_time_ms: u64,
    pub account_count: usize,
    pub visit_count: usize,
    /// Members across all accounts.
    pub member_count: usize,
}

/// Builder for generating accounts and visits in one run.
///
/// # Example
///
/// ```rust,ignore
/// let result = ScenarioBuilder::new()
///     .with_accounts(100)
///     .with_hours(9, 20)
///     .with_seed(7)
///     .build(&FakeNameSource, &mut rng)?;
/// ```
pub struct ScenarioBuilder {
    account_config: AccountGenConfig,
    visit_config: VisitGenConfig,
    output: OutputConfig,
    today: Option<Date>,
    track_metrics: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a new scenario builder with default settings.
    pub fn new() -> Self {
        Self::from_config(GenerationConfig::default())
    }

    /// Creates a builder from a complete configuration.
    pub fn from_config(config: GenerationConfig) -> Self {
        Self {
            account_config: config.accounts,
            visit_config: config.visits,
            output: config.output,
            today: None,
            track_metrics: false,
        }
    }

    /// Sets the number of accounts to generate.
    pub fn with_accounts(mut self, count: usize) -> Self {
        self.account_config.account_count = count;
        self
    }

    /// Sets the first account number.
    pub fn with_base_account_id(mut self, base: u32) -> Self {
        self.account_config.base_account_id = base;
        self
    }

    /// Sets the account generation configuration.
    pub fn with_account_config(mut self, config: AccountGenConfig) -> Self {
        self.account_config = config;
        self
    }

    /// Sets the visit generation configuration.
    pub fn with_visit_config(mut self, config: VisitGenConfig) -> Self {
        self.visit_config = config;
        self
    }

    /// Sets the inclusive season date range.
    pub fn with_season(mut self, start: Date, end: Date) -> Self {
        self.visit_config.season_start = start;
        self.visit_config.season_end = end;
        self
    }

    /// Sets opening (inclusive) and closing (exclusive) hours.
    pub fn with_hours(mut self, open: u8, close: u8) -> Self {
        self.visit_config.open_hour = open;
        self.visit_config.close_hour = close;
        self
    }

    /// Sets the binomial trials and target mean for visits per account.
    pub fn with_visit_distribution(mut self, max_visits: u64, mean_visits: f64) -> Self {
        self.visit_config.max_visits_per_account = max_visits;
        self.visit_config.mean_visits = mean_visits;
        self
    }

    /// Sets the seed for visit count draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.visit_config.visit_count_seed = seed;
        self
    }

    /// Pins the generation date used for registration dates.
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Sets the directory the tables are written to.
    pub fn with_output_dir(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = directory.into();
        self
    }

    /// Enables timing metrics on the result.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Builds the scenario (generates data but doesn't write files).
    pub fn build_data<N: NameSource>(
        &self,
        names: &N,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, GenerationError> {
        let gen_start = self.track_metrics.then(Instant::now);
        let today = self.today.unwrap_or_else(|| OffsetDateTime::now_utc().date());

        info!("Generating {} accounts", self.account_config.account_count);
        let account_gen = AccountGenerator::with_config(self.account_config.clone());
        let accounts = account_gen.generate_all(names, today, rng)?;
        let roster = AccountRoster::from_accounts(&accounts);

        info!(
            "Generating visits from {} to {}",
            self.visit_config.season_start, self.visit_config.season_end
        );
        let visit_gen = VisitGenerator::with_config(self.visit_config.clone());
        let visits = visit_gen.generate_all(&roster, rng)?;
        let summary = VisitSummary::from_visits(&roster, &visits);

        let metrics = gen_start.map(|start| ScenarioMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            export_time_ms: 0, // Set by build() if files are written
            account_count: accounts.len(),
            visit_count: visits.len(),
            member_count: accounts.iter().map(GeneratedAccount::member_count).sum(),
        });

        Ok(ScenarioResult {
            accounts,
            roster,
            visits,
            summary,
            metrics,
        })
    }

    /// Builds the scenario and writes both tables.
    ///
    /// The account table is written before any visit is generated.
    pub fn build<N: NameSource>(
        &self,
        names: &N,
        rng: &mut impl Rng,
    ) -> Result<ScenarioResult, ScenarioError> {
        let gen_start = self.track_metrics.then(Instant::now);
        let exporter = CsvExporter::new(self.output.clone());
        let today = self.today.unwrap_or_else(|| OffsetDateTime::now_utc().date());

        info!("Generating {} accounts", self.account_config.account_count);
        let account_gen = AccountGenerator::with_config(self.account_config.clone());
        let accounts = account_gen.generate_all(names, today, rng)?;
        let accounts_written = Instant::now();
        exporter.export_accounts(&accounts)?;
        let mut export_time = accounts_written.elapsed();

        let roster = AccountRoster::from_accounts(&accounts);
        info!(
            "Generating visits from {} to {}",
            self.visit_config.season_start, self.visit_config.season_end
        );
        let visit_gen = VisitGenerator::with_config(self.visit_config.clone());
        let visits = visit_gen.generate_all(&roster, rng)?;
        let visits_written = Instant::now();
        exporter.export_visits(&visits)?;
        export_time += visits_written.elapsed();

        let summary = VisitSummary::from_visits(&roster, &visits);
        let metrics = gen_start.map(|start| ScenarioMetrics {
            generation_time_ms: start.elapsed().saturating_sub(export_time).as_millis() as u64,
            export_time_ms: export_time.as_millis() as u64,
            account_count: accounts.len(),
            visit_count: visits.len(),
            member_count: accounts.iter().map(GeneratedAccount::member_count).sum(),
        });

        Ok(ScenarioResult {
            accounts,
            roster,
            visits,
            summary,
            metrics,
        })
    }
}

/// Preset scenarios for common testing needs.
impl ScenarioBuilder {
    /// The full Memorial Day to Labor Day season.
    ///
    /// - 800 accounts numbered from 10000
    /// - Visits per account ~ Binomial(150, 1/3), seeded with 42
    /// - Pool open 10:00 to 21:00
    pub fn pool_season() -> Self {
        Self::new()
    }

    /// Small run for quick checks.
    ///
    /// - 10 accounts
    /// - One week in June with a handful of visits each
    pub fn smoke_test() -> Self {
        Self::new()
            .with_accounts(10)
            .with_season(
                time::macros::date!(2024 - 06 - 03),
                time::macros::date!(2024 - 06 - 09),
            )
            .with_visit_distribution(10, 3.0)
            .with_metrics(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::{FakeNameSource, ListNameSource};
    use rand::{SeedableRng, rngs::StdRng};
    use time::macros::date;

    #[test]
    fn test_build_data() {
        let mut rng = StdRng::seed_from_u64(51);
        let result = ScenarioBuilder::new()
            .with_accounts(15)
            .with_today(date!(2024 - 10 - 01))
            .build_data(&FakeNameSource, &mut rng)
            .unwrap();

        assert_eq!(result.accounts.len(), 15);
        assert_eq!(result.roster.len(), 15);
        assert_eq!(result.summary.total_visits, result.visits.len());
        assert!(result.metrics.is_none());
    }

    #[test]
    fn test_preset_pool_season() {
        let builder = ScenarioBuilder::pool_season();
        assert_eq!(builder.account_config.account_count, 800);
        assert_eq!(builder.account_config.base_account_id, 10000);
        assert_eq!(builder.visit_config.max_visits_per_account, 150);
        assert_eq!(builder.visit_config.visit_count_seed, 42);
        assert_eq!(builder.visit_config.open_hour, 10);
        assert_eq!(builder.visit_config.close_hour, 21);
    }

    #[test]
    fn test_preset_smoke_test() {
        let mut rng = StdRng::seed_from_u64(52);
        let result = ScenarioBuilder::smoke_test()
            .with_today(date!(2024 - 10 - 01))
            .build_data(&ListNameSource::single("Sam", "Doe"), &mut rng)
            .unwrap();

        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.account_count, 10);
        assert_eq!(metrics.visit_count, result.visits.len());
        assert_eq!(metrics.export_time_ms, 0);
        for visit in &result.visits {
            assert!(visit.checkin_time.date() >= date!(2024 - 06 - 03));
            assert!(visit.checkin_time.date() <= date!(2024 - 06 - 09));
        }
    }

    #[test]
    fn test_custom_base_id() {
        let mut rng = StdRng::seed_from_u64(53);
        let result = ScenarioBuilder::new()
            .with_accounts(3)
            .with_base_account_id(500)
            .with_visit_distribution(20, 5.0)
            .build_data(&FakeNameSource, &mut rng)
            .unwrap();

        let ids: Vec<u32> = result.accounts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![500, 501, 502]);
        assert!(result.visits.iter().all(|v| (500..503).contains(&v.account_id)));
    }

    #[test]
    fn test_build_fails_without_output_dir() {
        let mut rng = StdRng::seed_from_u64(54);
        let result = ScenarioBuilder::new()
            .with_accounts(2)
            .with_output_dir("/nonexistent/pool-data")
            .build(&FakeNameSource, &mut rng);
        assert!(matches!(
            result,
            Err(ScenarioError::Export(ExportError::MissingDirectory(_)))
        ));
    }
}
