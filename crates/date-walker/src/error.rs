//! Error types for date-walker operations.

use thiserror::Error;

use crate::calendar::{MAX_YEAR, MIN_YEAR};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The tree does not match any production the walker knows.
    #[error("Malformed AST: {0}")]
    MalformedAst(String),

    #[error("Unsupported year: {0} (supported range is {min}..={max})", min = MIN_YEAR, max = MAX_YEAR)]
    UnsupportedYear(i64),

    /// A literal extracted from the tree is out of range, or names a date that
    /// does not exist.
    #[error("Invalid {component}: {value}")]
    InvalidComponentValue {
        component: &'static str,
        value: i64,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl ResolveError {
    pub(crate) fn invalid(component: &'static str, value: impl Into<i64>) -> Self {
        ResolveError::InvalidComponentValue {
            component,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
