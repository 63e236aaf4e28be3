//! Fluent builder APIs for pool data scenarios.
//!
//! The [`ScenarioBuilder`] runs account generation, visit generation and the
//! CSV export in one call.

mod scenario;

pub use scenario::{ScenarioBuilder, ScenarioError, ScenarioMetrics, ScenarioResult};
