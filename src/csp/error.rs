//! Error types.

use chrono::NaiveDate;

/// A malformed model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("constraint {constraint} references variable {index}, but the model has {num_variables} variables")]
    VariableOutOfRange {
        /// Position of the offending constraint in the model.
        constraint: usize,
        index: usize,
        num_variables: usize,
    },
}

/// An operator string that is not one of `== != > < >= <=`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator: {0:?}")]
pub struct ParseOperatorError(pub String);
