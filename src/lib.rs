//! Chi-square test of independence for r×c contingency tables.
//!
//! The engine derives every intermediate value of the test (margins, expected
//! counts, per-cell deviations and contributions, degrees of freedom, p-value
//! and Cramér's V) and returns them in an immutable [`TestResult`]. Formatting
//! these values is left to the caller.

// Modules
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod result;
pub mod statistics;
pub mod survival;
pub mod utils;

// Individual classes, and functions
pub use config::TestConfig;
pub use data::ContingencyTable;
pub use errors::ContingencyError;
pub use result::{Decision, TestResult};
pub use statistics::{compute, ChiSquareTest};
pub use survival::upper_tail;
