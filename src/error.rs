//! Crate error taxonomy.
//!
//! Configuration problems are fatal and surface at the call that triggered
//! them; there are no internal retries. Tour capacity overflow is *not* an
//! error — [`Tour::add_node`](crate::ga::Tour::add_node) reports it through
//! its boolean result and leaves the decision to the caller.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// A numeric tunable, population request, or point set is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A strategy name did not match any known crossover strategy.
    #[error("there is no crossover strategy named {0:?}")]
    UnknownStrategy(String),

    /// The engine was asked to run before its population was initialized.
    #[error("population has not been initialized")]
    NotInitialized,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
