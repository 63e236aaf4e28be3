//! Entity generators for test data.
//!
//! This module provides generators for the two pool tables:
//! - [`AccountGenerator`]: Generate member accounts with contact and billing details
//! - [`VisitGenerator`]: Generate check-ins clustered on weekends and Friday evenings

pub mod account;
pub mod visit;

pub use account::{
    AccountGenerator, AccountRoster, AccountType, GeneratedAccount, PaymentStatus, RosterEntry,
    Tag, sample_distinct,
};
pub use visit::{GeneratedVisit, MemberType, VisitGenerator, VisitKind, VisitSummary};
