//! Errors
//!
//! Custom error types used throughout the `contingency` crate.
use thiserror::Error;

/// Table axis, used to point at the offending margin of a degenerate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "Row"),
            Axis::Column => write!(f, "Column"),
        }
    }
}

/// Errors that can occur when running a chi-square test of independence.
#[derive(Debug, Error)]
pub enum ContingencyError {
    /// The observed table breaks a structural precondition.
    #[error("Invalid contingency table: {0}.")]
    InvalidTable(String),
    /// A row or column total is zero, so expected counts are undefined.
    /// The index is zero-based; the message numbers rows and columns from 1.
    #[error("{0} {} has a total of zero, expected counts are undefined.", .1 + 1)]
    DegenerateTable(Axis, usize),
    /// Significance level outside of the open interval (0, 1).
    #[error("Invalid significance level {0}, expected a value strictly between 0 and 1.")]
    InvalidAlpha(f64),
    /// First value is the name of the argument, second is the expected domain, third is what was passed.
    #[error("Invalid argument passed for {0}, expected {1} but {2} provided.")]
    InvalidDomain(String, String, String),
    /// Invalid parameter value, same layout as `InvalidDomain`.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Unable to write configuration or result to a file.
    #[error("Unable to write to file: {0}")]
    UnableToWrite(String),
    /// Unable to read configuration from a file.
    #[error("Unable to read from a file {0}")]
    UnableToRead(String),
}
