//! Pool visit (check-in) generation.
//!
//! Each account draws a visit count from a binomial distribution using its own
//! seeded generator, so the counts depend only on the seed and account order.
//! Timestamps and per-visit fields come from the caller's generator.

use std::collections::HashSet;
use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use rand_distr::{Binomial, Distribution};
use serde::Serialize;
use time::{PrimitiveDateTime, Weekday};
use tracing::debug;

use super::account::{AccountRoster, AccountType};
use crate::config::VisitGenConfig;
use crate::error::GenerationError;
use crate::schedule::CheckinSampler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemberType {
    Adult,
    Child,
    #[serde(rename = "Guest Pass")]
    GuestPass,
}

impl MemberType {
    pub const ALL: [MemberType; 3] = [MemberType::Adult, MemberType::Child, MemberType::GuestPass];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberType::Adult => "Adult",
            MemberType::Child => "Child",
            MemberType::GuestPass => "Guest Pass",
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the check-in counted against the membership or as a guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitKind {
    Member,
    Guest,
}

impl VisitKind {
    pub const ALL: [VisitKind; 2] = [VisitKind::Member, VisitKind::Guest];
}

/// Generated check-in ready for export.
#[derive(Debug, Clone)]
pub struct GeneratedVisit {
    pub checkin_time: PrimitiveDateTime,
    pub account_id: u32,
    /// Copy of the account type when the visit was generated.
    pub account_type: AccountType,
    pub name: String,
    pub member_type: MemberType,
    pub kind: VisitKind,
    pub num_credits: u32,
}

/// Generates visits for a roster of accounts.
pub struct VisitGenerator {
    config: VisitGenConfig,
}

impl VisitGenerator {
    /// Creates a new visit generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: VisitGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: VisitGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VisitGenConfig {
        &self.config
    }

    fn binomial(&self) -> Result<Binomial, GenerationError> {
        Binomial::new(
            self.config.max_visits_per_account,
            self.config.visit_probability(),
        )
        .map_err(|e| GenerationError::Binomial(e.to_string()))
    }

    /// Draws one visit count per account, in order.
    ///
    /// Uses a generator seeded from `visit_count_seed`, so the same number of
    /// accounts always yields the same counts.
    pub fn sample_visit_counts(&self, account_count: usize) -> Result<Vec<u64>, GenerationError> {
        let binomial = self.binomial()?;
        let mut count_rng = StdRng::seed_from_u64(self.config.visit_count_seed);
        Ok((0..account_count)
            .map(|_| binomial.sample(&mut count_rng))
            .collect())
    }

    /// Generates all visits, sorted by check-in time.
    pub fn generate_all(
        &self,
        roster: &AccountRoster,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedVisit>, GenerationError> {
        let sampler = CheckinSampler::new(&self.config)?;
        if roster.is_empty() {
            debug!("No accounts, no visits to generate");
            return Ok(Vec::new());
        }
        let counts = self.sample_visit_counts(roster.len())?;

        let mut visits = Vec::with_capacity(counts.iter().sum::<u64>() as usize);
        for ((account_id, entry), count) in roster.iter().zip(counts) {
            if count == 0 {
                continue;
            }

            for _ in 0..count {
                let checkin_time = sampler.sample(rng)?;
                let name = entry
                    .member_names
                    .choose(rng)
                    .cloned()
                    .ok_or(GenerationError::NoMembers(account_id))?;
                let member_type = MemberType::ALL[rng.gen_range(0..MemberType::ALL.len())];
                let kind = VisitKind::ALL[rng.gen_range(0..VisitKind::ALL.len())];
                let num_credits =
                    rng.gen_range(self.config.credits_range.0..=self.config.credits_range.1);

                visits.push(GeneratedVisit {
                    checkin_time,
                    account_id,
                    account_type: entry.account_type,
                    name,
                    member_type,
                    kind,
                    num_credits,
                });
            }
        }

        // Stable: visits with equal timestamps keep generation order.
        visits.sort_by_key(|v| v.checkin_time);

        debug!(
            "Generated {} visits across {} accounts",
            visits.len(),
            roster.len()
        );
        Ok(visits)
    }
}

impl Default for VisitGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics over generated visits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitSummary {
    pub total_visits: usize,
    pub accounts_with_visits: usize,
    pub accounts_without_visits: usize,
    /// Visit totals indexed Monday (0) through Sunday (6).
    pub visits_by_weekday: [usize; 7],
}

impl VisitSummary {
    pub fn from_visits(roster: &AccountRoster, visits: &[GeneratedVisit]) -> Self {
        let mut visited = HashSet::new();
        let mut visits_by_weekday = [0usize; 7];
        for visit in visits {
            visited.insert(visit.account_id);
            let weekday = visit.checkin_time.weekday();
            visits_by_weekday[weekday.number_days_from_monday() as usize] += 1;
        }

        Self {
            total_visits: visits.len(),
            accounts_with_visits: visited.len(),
            accounts_without_visits: roster.len().saturating_sub(visited.len()),
            visits_by_weekday,
        }
    }

    pub fn visits_on(&self, weekday: Weekday) -> usize {
        self.visits_by_weekday[weekday.number_days_from_monday() as usize]
    }
}
