use thiserror::Error;

/// Errors raised while generating accounts or visits.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cannot sample {requested} distinct items from {available}")]
    SampleTooLarge { requested: usize, available: usize },

    #[error("Nothing to choose from: {0}")]
    EmptyChoice(&'static str),

    #[error("Weighted sampling failed: {0}")]
    Weights(#[from] rand::distributions::WeightedError),

    #[error("Invalid binomial parameters: {0}")]
    Binomial(String),

    #[error("Name source unavailable: {0}")]
    NameSource(String),

    #[error("Invalid time component: {0}")]
    Time(#[from] time::error::ComponentRange),

    #[error("Account {0} has no members")]
    NoMembers(u32),
}
