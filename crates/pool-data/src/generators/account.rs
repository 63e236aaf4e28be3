//! Member account generation.

use std::collections::BTreeMap;
use std::fmt;

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;
use time::{Date, Duration};
use tracing::debug;

use crate::config::AccountGenConfig;
use crate::error::GenerationError;
use crate::names::NameSource;

/// Membership category of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountType {
    #[serde(rename = "Active Summer")]
    ActiveSummer,
    #[serde(rename = "Gold Pass")]
    GoldPass,
    #[serde(rename = "August Pass (Waitlist)")]
    AugustPassWaitlist,
    #[serde(rename = "August Pass (Non Member)")]
    AugustPassNonMember,
    #[serde(rename = "Offered Membership")]
    OfferedMembership,
    #[serde(rename = "August Pass (Member)")]
    AugustPassMember,
    #[serde(rename = "Waitlist")]
    Waitlist,
    #[serde(rename = "Honorary Pass")]
    HonoraryPass,
}

impl AccountType {
    pub const ALL: [AccountType; 8] = [
        AccountType::ActiveSummer,
        AccountType::GoldPass,
        AccountType::AugustPassWaitlist,
        AccountType::AugustPassNonMember,
        AccountType::OfferedMembership,
        AccountType::AugustPassMember,
        AccountType::Waitlist,
        AccountType::HonoraryPass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::ActiveSummer => "Active Summer",
            AccountType::GoldPass => "Gold Pass",
            AccountType::AugustPassWaitlist => "August Pass (Waitlist)",
            AccountType::AugustPassNonMember => "August Pass (Non Member)",
            AccountType::OfferedMembership => "Offered Membership",
            AccountType::AugustPassMember => "August Pass (Member)",
            AccountType::Waitlist => "Waitlist",
            AccountType::HonoraryPass => "Honorary Pass",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative tag attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    GoldPassEligible,
    ExtendedMembership,
}

impl Tag {
    pub const ALL: [Tag; 2] = [Tag::GoldPassEligible, Tag::ExtendedMembership];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::GoldPassEligible => "Gold Pass Eligible",
            Tag::ExtendedMembership => "Extended Membership",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
        }
    }
}

const STATES: [&str; 3] = ["VA", "DC", "MD"];

const STREETS: [&str; 5] = ["Main St", "Oak St", "Pine St", "Maple Ave", "Cedar Rd"];

/// Check-in notes with their relative weights; blank is as likely as the rest combined.
const CHECKIN_NOTES: [(Option<&str>, u32); 3] = [
    (None, 2),
    (Some("Requires ID"), 1),
    (Some("VIP Member"), 1),
];

/// Generated account data ready for export.
#[derive(Debug, Clone)]
pub struct GeneratedAccount {
    pub id: u32,
    pub account_type: AccountType,
    pub tags: Vec<Tag>,
    pub registered_on: Date,
    pub legacy_id: Option<u32>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub site_access: String,
    pub listed_in_directory: bool,
    pub guest_credits: u32,
    pub billing_email: String,
    pub street_address: String,
    pub street_address_2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub cell_phone: String,
    pub work_phone: String,
    pub home_phone: String,
    pub payment_status: PaymentStatus,
    pub checkin_note: Option<String>,
    pub authnet_token: Option<u32>,
    pub member_names: Vec<String>,
}

impl GeneratedAccount {
    /// Always equal to the number of member names.
    pub fn member_count(&self) -> usize {
        self.member_names.len()
    }

    /// The account number repeated as text.
    pub fn account_number(&self) -> String {
        self.id.to_string()
    }
}

/// Generates member accounts.
pub struct AccountGenerator {
    config: AccountGenConfig,
}

impl AccountGenerator {
    /// Creates a new account generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: AccountGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: AccountGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AccountGenConfig {
        &self.config
    }

    /// Generates `account_count` accounts with sequential ids from the base id.
    pub fn generate_all<N: NameSource>(
        &self,
        names: &N,
        today: Date,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeneratedAccount>, GenerationError> {
        self.config.validate()?;
        let base = self.config.base_account_id;
        let count = u32::try_from(self.config.account_count).map_err(|_| {
            GenerationError::InvalidConfig(format!(
                "account count {} too large",
                self.config.account_count
            ))
        })?;
        let end = base.checked_add(count).ok_or_else(|| {
            GenerationError::InvalidConfig(format!(
                "{count} accounts from base {base} overflow the id space"
            ))
        })?;

        let accounts = (base..end)
            .map(|id| self.generate_unchecked(id, names, today, rng))
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Generated {} accounts from id {}", accounts.len(), base);
        Ok(accounts)
    }

    /// Generates a single account.
    pub fn generate<N: NameSource>(
        &self,
        id: u32,
        names: &N,
        today: Date,
        rng: &mut impl Rng,
    ) -> Result<GeneratedAccount, GenerationError> {
        self.config.validate()?;
        self.generate_unchecked(id, names, today, rng)
    }

    fn generate_unchecked<N: NameSource>(
        &self,
        id: u32,
        names: &N,
        today: Date,
        rng: &mut impl Rng,
    ) -> Result<GeneratedAccount, GenerationError> {
        let account_type = AccountType::ALL[rng.gen_range(0..AccountType::ALL.len())];

        let tag_count = rng.gen_range(0..=self.config.max_tags);
        let tags = sample_distinct(&Tag::ALL, tag_count, rng)?;

        let days_ago = rng.gen_range(0..=self.config.registration_window_days);
        let registered_on = today.checked_sub(Duration::days(days_ago)).ok_or_else(|| {
            GenerationError::InvalidConfig(format!(
                "registration {days_ago} days before {today} is out of range"
            ))
        })?;

        let legacy_id = rng.gen_bool(0.5).then(|| rng.gen_range(1000..=9999));

        let first_name = names.first_name(rng)?;
        let last_name = names.last_name(rng)?;
        let username = username_for(&first_name, &last_name);
        let email = format!("{username}@{}", self.config.email_domain);
        let billing_email = email.clone();

        let site_access = self
            .config
            .site_access_options
            .choose(rng)
            .cloned()
            .ok_or(GenerationError::EmptyChoice("site access options"))?;

        let listed_in_directory = rng.gen_bool(0.5);
        let guest_credits = rng.gen_range(0..=self.config.max_guest_credits);

        let street_address = format!(
            "{} {}",
            rng.gen_range(100..=9999),
            STREETS[rng.gen_range(0..STREETS.len())]
        );
        let city = format!("{} City", names.last_name(rng)?);
        let state = STATES[rng.gen_range(0..STATES.len())].to_string();
        let zip = rng.gen_range(10000..=99999).to_string();

        let cell_phone = phone_number(rng);
        let work_phone = phone_number(rng);
        let home_phone = phone_number(rng);

        let payment_status = if rng.gen_bool(0.5) {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Unpaid
        };

        let checkin_note = CHECKIN_NOTES
            .choose_weighted(rng, |(_, weight)| *weight)?
            .0
            .map(str::to_string);

        let (min_members, max_members) = self.config.member_count_range;
        let member_count = rng.gen_range(min_members..=max_members);

        let authnet_token = rng.gen_bool(0.5).then(|| rng.gen_range(100000..=999999));

        let member_names = (0..member_count)
            .map(|_| names.full_name(rng))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GeneratedAccount {
            id,
            account_type,
            tags,
            registered_on,
            legacy_id,
            username,
            first_name,
            last_name,
            email,
            site_access,
            listed_in_directory,
            guest_credits,
            billing_email,
            street_address,
            street_address_2: String::new(),
            city,
            state,
            zip,
            cell_phone,
            work_phone,
            home_phone,
            payment_status,
            checkin_note,
            authnet_token,
            member_names,
        })
    }
}

impl Default for AccountGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks `count` distinct items without replacement.
///
/// Asking for more items than exist is an error, never a truncation.
pub fn sample_distinct<T: Copy>(
    items: &[T],
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<T>, GenerationError> {
    if count > items.len() {
        return Err(GenerationError::SampleTooLarge {
            requested: count,
            available: items.len(),
        });
    }
    Ok(items.choose_multiple(rng, count).copied().collect())
}

/// Lowercased first initial followed by the last name.
fn username_for(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .take(1)
        .chain(last_name.chars())
        .collect::<String>()
        .to_lowercase()
}

/// A US-style number such as `(555) 123-4567`.
fn phone_number(rng: &mut impl Rng) -> String {
    format!(
        "({}) {}-{}",
        rng.gen_range(200..=999),
        rng.gen_range(100..=999),
        rng.gen_range(1000..=9999)
    )
}

/// Account lookups retained for visit generation.
///
/// Entries iterate in ascending id order, which is also generation order.
#[derive(Debug, Clone, Default)]
pub struct AccountRoster {
    entries: BTreeMap<u32, RosterEntry>,
}

/// What visit generation needs to know about one account.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub account_type: AccountType,
    pub member_names: Vec<String>,
}

impl AccountRoster {
    pub fn from_accounts(accounts: &[GeneratedAccount]) -> Self {
        let entries = accounts
            .iter()
            .map(|account| {
                (
                    account.id,
                    RosterEntry {
                        account_type: account.account_type,
                        member_names: account.member_names.clone(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: u32) -> Option<&RosterEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &RosterEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }
}
