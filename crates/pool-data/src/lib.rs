//! Test data generation for pool membership tracking.
//!
//! This crate fabricates member accounts and timestamped pool check-ins with
//! realistic attendance patterns: visits per account follow a binomial
//! distribution, and check-ins cluster on weekends and Friday evenings.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pool_data::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let result = ScenarioBuilder::pool_season()
//!     .with_output_dir("data/test")
//!     .build(&FakeNameSource, &mut rng)?;
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod names;
pub mod schedule;

pub use error::GenerationError;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{ScenarioBuilder, ScenarioError, ScenarioMetrics, ScenarioResult};
    pub use crate::config::{AccountGenConfig, GenerationConfig, OutputConfig, VisitGenConfig};
    pub use crate::error::GenerationError;
    pub use crate::export::{CsvExporter, ExportError};
    pub use crate::generators::{
        AccountGenerator, AccountRoster, AccountType, GeneratedAccount, GeneratedVisit,
        MemberType, VisitGenerator, VisitKind, VisitSummary,
    };
    pub use crate::names::{FakeNameSource, ListNameSource, NameSource};
    pub use crate::schedule::{CheckinSampler, is_peak_day};
}
