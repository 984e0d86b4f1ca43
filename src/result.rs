//! Test Result
//!
//! The immutable outcome of a chi-square test of independence. Every value a
//! report needs is derived here once, so consumers only format, never compute.
use crate::errors::ContingencyError;
use serde::Serialize;

/// Outcome of comparing the p-value with the significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    /// `p < alpha`, the variables are associated.
    RejectNull,
    /// `p >= alpha`, the data is consistent with independence.
    FailToReject,
}

/// Every intermediate and final value of a chi-square test of independence.
///
/// Matrices are indexed `[row][column]` in the order of the input table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub(crate) row_labels: Vec<String>,
    pub(crate) col_labels: Vec<String>,
    pub(crate) observed: Vec<Vec<u64>>,
    pub(crate) row_totals: Vec<u64>,
    pub(crate) col_totals: Vec<u64>,
    pub(crate) n: u64,
    pub(crate) expected: Vec<Vec<f64>>,
    pub(crate) use_yates: bool,
    pub(crate) deviations: Vec<Vec<f64>>,
    pub(crate) adjusted_deviations: Vec<Vec<f64>>,
    pub(crate) contributions: Vec<Vec<f64>>,
    pub(crate) chi2: f64,
    pub(crate) df: u64,
    pub(crate) p_value: f64,
    pub(crate) alpha: f64,
    pub(crate) cramers_v: f64,
    pub(crate) decision: Decision,
    pub(crate) min_expected_count: f64,
    pub(crate) min_expected: f64,
    pub(crate) low_expected_cells: usize,
}

impl TestResult {
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn rows(&self) -> usize {
        self.observed.len()
    }

    pub fn cols(&self) -> usize {
        self.col_totals.len()
    }

    /// Observed counts, O.
    pub fn observed(&self) -> &[Vec<u64>] {
        &self.observed
    }

    pub fn row_totals(&self) -> &[u64] {
        &self.row_totals
    }

    pub fn col_totals(&self) -> &[u64] {
        &self.col_totals
    }

    /// Grand total of all observed counts.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Expected counts under independence, `E[i][j] = row_totals[i] * col_totals[j] / n`.
    pub fn expected(&self) -> &[Vec<f64>] {
        &self.expected
    }

    /// Whether the continuity correction was applied. Always `false` unless the table is 2x2.
    pub fn use_yates(&self) -> bool {
        self.use_yates
    }

    /// Signed deviations `O - E`.
    pub fn deviations(&self) -> &[Vec<f64>] {
        &self.deviations
    }

    /// `|O - E|`, reduced by 0.5 (floored at 0) when the continuity correction applies.
    pub fn adjusted_deviations(&self) -> &[Vec<f64>] {
        &self.adjusted_deviations
    }

    /// Per-cell contribution to the statistic, `adjusted_deviation^2 / E`.
    pub fn contributions(&self) -> &[Vec<f64>] {
        &self.contributions
    }

    /// The chi-square statistic, the sum of all contributions.
    pub fn chi2(&self) -> f64 {
        self.chi2
    }

    /// Degrees of freedom, `(r - 1)(c - 1)`.
    pub fn df(&self) -> u64 {
        self.df
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Cramér's V effect size, in `[0, 1]`.
    pub fn cramers_v(&self) -> f64 {
        self.cramers_v
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    pub fn rejects_null(&self) -> bool {
        self.decision == Decision::RejectNull
    }

    /// Threshold the expected counts were checked against.
    pub fn min_expected_count(&self) -> f64 {
        self.min_expected_count
    }

    /// Smallest expected count in the table.
    pub fn min_expected(&self) -> f64 {
        self.min_expected
    }

    /// Number of cells with an expected count below `min_expected_count`.
    pub fn low_expected_cells(&self) -> usize {
        self.low_expected_cells
    }

    /// True when no expected count falls below `min_expected_count`.
    pub fn expected_counts_adequate(&self) -> bool {
        self.low_expected_cells == 0
    }

    /// Dump the result as a json object
    pub fn json_dump(&self) -> Result<String, ContingencyError> {
        match serde_json::to_string(self) {
            Ok(s) => Ok(s),
            Err(e) => Err(ContingencyError::UnableToWrite(e.to_string())),
        }
    }
}
