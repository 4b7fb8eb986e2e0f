//! Error types for the fallible edges of the crate.
//!
//! The simulation and meshing core never fails: invalid queries degrade to
//! `None` or neutral values. Only rule strings and configuration files can
//! be rejected.

use thiserror::Error;

/// Rule string rejected by [`LifeLikeRule::parse`](crate::domain::LifeLikeRule::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    /// Expected exactly `survive/born/states`.
    #[error("expected 3 '/'-separated sections, found {0}")]
    SectionCount(usize),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// Neighbour counts live in 0..=26.
    #[error("neighbour count {0} exceeds 26")]
    CountOutOfRange(u8),

    #[error("range {lo}-{hi} is reversed")]
    ReversedRange { lo: u8, hi: u8 },

    #[error("a rule needs at least 2 states, got {0}")]
    TooFewStates(u8),
}

/// Configuration could not be loaded or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid rule: {0}")]
    Rule(#[from] RuleParseError),

    /// A field is outside its valid range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
