//! Configuration types for test data generation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::error::GenerationError;

/// Longest registration window accepted, roughly ten thousand years.
pub const MAX_REGISTRATION_WINDOW_DAYS: i64 = 3_650_000;

/// Top-level configuration for a full generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub accounts: AccountGenConfig,
    pub visits: VisitGenConfig,
    pub output: OutputConfig,
}

/// Configuration for account generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountGenConfig {
    /// Number of accounts to generate.
    pub account_count: usize,
    /// First account number; ids run sequentially from here.
    pub base_account_id: u32,
    /// Upper bound (inclusive) on the number of tags per account.
    pub max_tags: usize,
    /// How far back registration dates may go, in days (inclusive).
    pub registration_window_days: i64,
    /// Domain appended to usernames for email addresses.
    pub email_domain: String,
    /// Site access codes to sample from.
    pub site_access_options: Vec<String>,
    /// Inclusive upper bound on guest credits.
    pub max_guest_credits: u32,
    /// Inclusive range of members per account.
    pub member_count_range: (usize, usize),
}

impl Default for AccountGenConfig {
    fn default() -> Self {
        Self {
            account_count: 800,
            base_account_id: 10000,
            max_tags: 2,
            registration_window_days: 365,
            email_domain: "example.com".to_string(),
            site_access_options: vec!["1".to_string()],
            max_guest_credits: 10,
            member_count_range: (1, 6),
        }
    }
}

impl AccountGenConfig {
    /// Checks ranges and option lists before any account is drawn.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(0..=MAX_REGISTRATION_WINDOW_DAYS).contains(&self.registration_window_days) {
            return Err(GenerationError::InvalidConfig(format!(
                "registration window of {} days outside 0..={MAX_REGISTRATION_WINDOW_DAYS}",
                self.registration_window_days
            )));
        }
        let (min_members, max_members) = self.member_count_range;
        if min_members == 0 || min_members > max_members {
            return Err(GenerationError::InvalidConfig(format!(
                "member count range {min_members}..={max_members} is invalid"
            )));
        }
        if self.site_access_options.is_empty() {
            return Err(GenerationError::EmptyChoice("site access options"));
        }
        Ok(())
    }
}

/// Relative weights used when picking a visit date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DayWeights {
    pub weekend: u32,
    pub friday: u32,
    pub weekday: u32,
}

impl Default for DayWeights {
    fn default() -> Self {
        Self {
            weekend: 3,
            friday: 2,
            weekday: 1,
        }
    }
}

/// Configuration for visit generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitGenConfig {
    /// First day of the season (inclusive).
    pub season_start: Date,
    /// Last day of the season (inclusive).
    pub season_end: Date,
    /// Opening hour (inclusive).
    pub open_hour: u8,
    /// Closing hour (exclusive).
    pub close_hour: u8,
    /// First hour of the evening peak on peak days.
    pub peak_start_hour: u8,
    /// Weight of each peak hour on peak days.
    pub peak_hour_weight: u32,
    /// Weight of each non-peak hour on peak days.
    pub off_peak_hour_weight: u32,
    /// Date weighting by day of week.
    pub day_weights: DayWeights,
    /// Binomial trials per account (the maximum number of visits).
    pub max_visits_per_account: u64,
    /// Target mean number of visits per account.
    pub mean_visits: f64,
    /// Seed for the visit count draws.
    pub visit_count_seed: u64,
    /// Inclusive range of credits consumed per visit.
    pub credits_range: (u32, u32),
}

impl Default for VisitGenConfig {
    fn default() -> Self {
        Self {
            // Saturday before Memorial Day through Labor Day 2024
            season_start: date!(2024 - 05 - 25),
            season_end: date!(2024 - 09 - 02),
            open_hour: 10,
            close_hour: 21,
            peak_start_hour: 16,
            peak_hour_weight: 3,
            off_peak_hour_weight: 1,
            day_weights: DayWeights::default(),
            max_visits_per_account: 150,
            mean_visits: 50.0,
            visit_count_seed: 42,
            credits_range: (1, 5),
        }
    }
}

impl VisitGenConfig {
    /// Probability of a visit on each binomial trial.
    pub fn visit_probability(&self) -> f64 {
        if self.max_visits_per_account == 0 {
            return 0.0;
        }
        self.mean_visits / self.max_visits_per_account as f64
    }

    /// Checks the configuration for inverted ranges and impossible parameters.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.season_start > self.season_end {
            return Err(GenerationError::InvalidConfig(format!(
                "season starts {} after it ends {}",
                self.season_start, self.season_end
            )));
        }
        if self.open_hour >= self.close_hour || self.close_hour > 24 {
            return Err(GenerationError::InvalidConfig(format!(
                "operating hours {}..{} are not a valid range",
                self.open_hour, self.close_hour
            )));
        }
        if !(0.0..=self.max_visits_per_account as f64).contains(&self.mean_visits) {
            return Err(GenerationError::InvalidConfig(format!(
                "mean visits {} outside 0..={}",
                self.mean_visits, self.max_visits_per_account
            )));
        }
        if self.credits_range.0 > self.credits_range.1 {
            return Err(GenerationError::InvalidConfig(format!(
                "credits range {:?} is inverted",
                self.credits_range
            )));
        }
        Ok(())
    }
}

/// Where the generated tables are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory that must already exist.
    pub directory: PathBuf,
    pub accounts_file: String,
    pub visits_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data/test"),
            accounts_file: "accounts.csv".to_string(),
            visits_file: "pool_visits.csv".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn accounts_path(&self) -> PathBuf {
        self.directory.join(&self.accounts_file)
    }

    pub fn visits_path(&self) -> PathBuf {
        self.directory.join(&self.visits_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_visit_probability() {
        let config = VisitGenConfig::default();
        assert!((config.visit_probability() - 1.0 / 3.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_hours_rejected() {
        let config = VisitGenConfig {
            open_hour: 21,
            close_hour: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GenerationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_mean_above_trials_rejected() {
        let config = VisitGenConfig {
            mean_visits: 200.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_account_config_valid() {
        assert!(AccountGenConfig::default().validate().is_ok());
    }

    #[test]
    fn test_registration_window_bounds() {
        for days in [-1, MAX_REGISTRATION_WINDOW_DAYS + 1, 10_000_000] {
            let config = AccountGenConfig {
                registration_window_days: days,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(GenerationError::InvalidConfig(_))),
                "window {days} accepted"
            );
        }
    }

    #[test]
    fn test_invalid_member_ranges_rejected() {
        for range in [(0, 3), (4, 2)] {
            let config = AccountGenConfig {
                member_count_range: range,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(GenerationError::InvalidConfig(_))),
                "range {range:?} accepted"
            );
        }
    }

    #[test]
    fn test_empty_site_access_rejected() {
        let config = AccountGenConfig {
            site_access_options: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GenerationError::EmptyChoice(_))
        ));
    }

    #[test]
    fn test_output_paths() {
        let output = OutputConfig::default();
        assert_eq!(output.accounts_path(), PathBuf::from("data/test/accounts.csv"));
        assert_eq!(output.visits_path(), PathBuf::from("data/test/pool_visits.csv"));
    }
}
