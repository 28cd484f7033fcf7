//! Error types for ChakraTrack

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// ChakraTrack error types
#[derive(Error, Debug)]
pub enum Error {
    /// Matrix shapes inconsistent with the declared state/measurement dimensions.
    /// Raised at model or estimator construction, never mid-run.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which matrix or vector failed validation
        context: &'static str,
        /// Expected shape, e.g. "2x2"
        expected: String,
        /// Actual shape
        actual: String,
    },

    /// `predict()` or `correct()` called before `initialize()`.
    #[error("estimator not initialized")]
    NotInitialized,

    /// Innovation covariance S is numerically non-invertible.
    /// Indicates a degenerate noise configuration, not a transient condition.
    #[error("singular innovation covariance")]
    SingularInnovationCovariance,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A filter error surfaced during a session cycle.
    #[error("cycle {cycle}: {source}")]
    Cycle {
        /// Cycle number at which the run aborted
        cycle: u64,
        /// Underlying filter error
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap a filter error with the session cycle it occurred in.
    pub fn at_cycle(self, cycle: u64) -> Error {
        Error::Cycle {
            cycle,
            source: Box::new(self),
        }
    }
}

impl From<basic_toml::Error> for Error {
    fn from(e: basic_toml::Error) -> Self {
        Error::Config(e.to_string())
    }
}
