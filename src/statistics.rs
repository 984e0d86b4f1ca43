//! Table Statistics
//!
//! Chi-square test of independence on an r×c contingency table. The
//! computation is a fixed pipeline, each step relying on the invariants the
//! previous ones established:
//!
//! 1. margins (row totals, column totals, grand total), rejecting zero margins
//! 2. expected counts
//! 3. continuity correction policy
//! 4. per-cell deviations and contributions
//! 5. statistic, degrees of freedom, p-value
//! 6. Cramér's V, decision and expected-count diagnostics
use crate::config::TestConfig;
use crate::constants::YATES_ADJUSTMENT;
use crate::data::ContingencyTable;
use crate::errors::{Axis, ContingencyError};
use crate::result::{Decision, TestResult};
use crate::survival::upper_tail;
use crate::utils::min_dimension;
use log::{debug, warn};

/// Chi-square test of independence with a fixed, validated configuration.
#[derive(Debug, Clone, Default)]
pub struct ChiSquareTest {
    cfg: TestConfig,
}

impl ChiSquareTest {
    /// Create a test from a configuration, validating it.
    pub fn new(cfg: TestConfig) -> Result<Self, ContingencyError> {
        cfg.validate()?;
        Ok(ChiSquareTest { cfg })
    }

    pub fn cfg(&self) -> &TestConfig {
        &self.cfg
    }

    /// Run the test on an observed table.
    ///
    /// * `table` - The observed counts and their labels.
    pub fn compute(&self, table: &ContingencyTable) -> Result<TestResult, ContingencyError> {
        let (rows, cols) = (table.rows(), table.cols());
        debug!(
            "Chi-square test on a {}x{} table, alpha = {}, yates requested = {}.",
            rows, cols, self.cfg.alpha, self.cfg.yates
        );

        let (row_totals, col_totals, n) = margins(table)?;
        let expected = expected_counts(&row_totals, &col_totals, n);

        let use_yates = yates_applies(rows, cols, self.cfg.yates);
        if self.cfg.yates && !use_yates {
            warn!(
                "Yates correction only applies to 2x2 tables, ignoring it for a {}x{} table.",
                rows, cols
            );
        }

        let deviations: Vec<Vec<f64>> = expected
            .iter()
            .enumerate()
            .map(|(i, e_row)| {
                e_row
                    .iter()
                    .zip(table.get_row(i))
                    .map(|(e, &o)| o as f64 - e)
                    .collect()
            })
            .collect();
        let adjusted_deviations: Vec<Vec<f64>> = deviations
            .iter()
            .map(|row| row.iter().map(|d| adjusted_deviation(*d, use_yates)).collect())
            .collect();
        let contributions: Vec<Vec<f64>> = adjusted_deviations
            .iter()
            .zip(expected.iter())
            .map(|(a_row, e_row)| a_row.iter().zip(e_row).map(|(a, e)| a * a / e).collect())
            .collect();

        let chi2: f64 = contributions.iter().flatten().sum();
        let df = degrees_of_freedom(rows, cols);
        let p_value = upper_tail(chi2, df)?;
        debug!("chi2 = {}, df = {}, p = {}.", chi2, df, p_value);

        let cramers_v = cramers_v(chi2, n, rows, cols);
        let decision = if p_value < self.cfg.alpha {
            Decision::RejectNull
        } else {
            Decision::FailToReject
        };

        let min_expected = expected.iter().flatten().copied().fold(f64::INFINITY, f64::min);
        let low_expected_cells = expected
            .iter()
            .flatten()
            .filter(|&&e| e < self.cfg.min_expected_count)
            .count();
        if low_expected_cells > 0 {
            warn!(
                "{} of {} expected counts are below {}, the chi-square approximation may be unreliable.",
                low_expected_cells,
                rows * cols,
                self.cfg.min_expected_count
            );
        }

        Ok(TestResult {
            row_labels: table.row_labels().to_vec(),
            col_labels: table.col_labels().to_vec(),
            observed: table.to_nested(),
            row_totals,
            col_totals,
            n,
            expected,
            use_yates,
            deviations,
            adjusted_deviations,
            contributions,
            chi2,
            df,
            p_value,
            alpha: self.cfg.alpha,
            cramers_v,
            decision,
            min_expected_count: self.cfg.min_expected_count,
            min_expected,
            low_expected_cells,
        })
    }
}

/// Run a chi-square test of independence.
///
/// * `observed` - One vector of counts per row.
/// * `row_labels` - One label per row.
/// * `col_labels` - One label per column.
/// * `alpha` - Significance level, strictly between 0 and 1.
/// * `use_yates` - Request the continuity correction, only honored for 2x2 tables.
pub fn compute(
    observed: &[Vec<u64>],
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    alpha: f64,
    use_yates: bool,
) -> Result<TestResult, ContingencyError> {
    let test = ChiSquareTest::new(TestConfig::default().set_alpha(alpha).set_yates(use_yates))?;
    let table = ContingencyTable::new(observed, row_labels, col_labels)?;
    test.compute(&table)
}

fn checked_total<'a, I: Iterator<Item = &'a u64>>(mut values: I) -> Result<u64, ContingencyError> {
    values.try_fold(0_u64, |acc, &v| acc.checked_add(v)).ok_or_else(|| {
        ContingencyError::InvalidTable("sum of counts overflows a 64 bit integer".to_string())
    })
}

/// Row totals, column totals and the grand total, rejecting zero margins.
pub fn margins(table: &ContingencyTable) -> Result<(Vec<u64>, Vec<u64>, u64), ContingencyError> {
    let row_totals = (0..table.rows())
        .map(|i| checked_total(table.get_row(i).iter()))
        .collect::<Result<Vec<u64>, ContingencyError>>()?;
    let col_totals = (0..table.cols())
        .map(|j| checked_total(table.get_col_iter(j)))
        .collect::<Result<Vec<u64>, ContingencyError>>()?;
    if let Some(i) = row_totals.iter().position(|&t| t == 0) {
        return Err(ContingencyError::DegenerateTable(Axis::Row, i));
    }
    if let Some(j) = col_totals.iter().position(|&t| t == 0) {
        return Err(ContingencyError::DegenerateTable(Axis::Column, j));
    }
    let n = checked_total(row_totals.iter())?;
    Ok((row_totals, col_totals, n))
}

/// Expected counts under independence. Margins must be non-zero.
pub fn expected_counts(row_totals: &[u64], col_totals: &[u64], n: u64) -> Vec<Vec<f64>> {
    let n = n as f64;
    row_totals
        .iter()
        .map(|&rt| col_totals.iter().map(|&ct| rt as f64 * ct as f64 / n).collect())
        .collect()
}

/// The continuity correction is only defined for 2x2 tables.
#[inline]
pub fn yates_applies(rows: usize, cols: usize, requested: bool) -> bool {
    requested && rows == 2 && cols == 2
}

#[inline]
fn adjusted_deviation(deviation: f64, use_yates: bool) -> f64 {
    let abs_diff = deviation.abs();
    if use_yates {
        (abs_diff - YATES_ADJUSTMENT).max(0.0)
    } else {
        abs_diff
    }
}

#[inline]
pub fn degrees_of_freedom(rows: usize, cols: usize) -> u64 {
    ((rows - 1) * (cols - 1)) as u64
}

/// Cramér's V, `sqrt(chi2 / (n * min(r - 1, c - 1)))`.
pub fn cramers_v(chi2: f64, n: u64, rows: usize, cols: usize) -> f64 {
    let scale = n as f64 * min_dimension(rows, cols) as f64;
    // Rounding can push a perfect association a hair above 1.
    (chi2 / scale).sqrt().min(1.0)
}
