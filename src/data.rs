//! Data
//!
//! The observed contingency table and its construction checks.
use crate::errors::ContingencyError;
use crate::utils::default_labels;
use serde::Serialize;

/// An r×c table of observed counts with its row and column labels.
///
/// Counts are stored row-major in a single buffer. Every table that exists has
/// passed the structural checks: at least two rows and two columns, a
/// rectangular layout, and one label per row and per column. Zero margins are
/// not rejected here, they are a property of the test, not of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    data: Vec<u64>,
    rows: usize,
    cols: usize,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
}

impl ContingencyTable {
    /// Create a new table from nested rows of counts.
    ///
    /// * `observed` - One vector of counts per row, all of the same length.
    /// * `row_labels` - One label per row.
    /// * `col_labels` - One label per column.
    pub fn new(
        observed: &[Vec<u64>],
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    ) -> Result<Self, ContingencyError> {
        let rows = observed.len();
        let cols = observed.first().map_or(0, |r| r.len());
        if let Some((i, r)) = observed.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ContingencyError::InvalidTable(format!(
                "row {} has {} entries but row 0 has {}",
                i,
                r.len(),
                cols
            )));
        }
        let data = observed.iter().flatten().copied().collect();
        Self::from_row_major(data, rows, cols, row_labels, col_labels)
    }

    /// Create a table from nested counts, labelling rows and columns
    /// `"Row 1"`, `"Row 2"`, ... and `"Col 1"`, `"Col 2"`, ...
    pub fn from_counts(observed: &[Vec<u64>]) -> Result<Self, ContingencyError> {
        let rows = observed.len();
        let cols = observed.first().map_or(0, |r| r.len());
        Self::new(observed, default_labels("Row", rows), default_labels("Col", cols))
    }

    /// Create a table from signed counts, rejecting any negative entry.
    pub fn from_signed(
        observed: &[Vec<i64>],
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    ) -> Result<Self, ContingencyError> {
        let mut counts = Vec::with_capacity(observed.len());
        for (i, row) in observed.iter().enumerate() {
            let mut converted = Vec::with_capacity(row.len());
            for (j, &v) in row.iter().enumerate() {
                let v = u64::try_from(v).map_err(|_| {
                    ContingencyError::InvalidTable(format!("cell ({}, {}) has negative count {}", i, j, v))
                })?;
                converted.push(v);
            }
            counts.push(converted);
        }
        Self::new(&counts, row_labels, col_labels)
    }

    /// Create a table from a flat, row-major buffer.
    ///
    /// * `data` - Counts, `rows * cols` of them, row after row.
    /// * `rows` - Number of rows.
    /// * `cols` - Number of columns.
    pub fn from_row_major(
        data: Vec<u64>,
        rows: usize,
        cols: usize,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
    ) -> Result<Self, ContingencyError> {
        if rows < 2 || cols < 2 {
            return Err(ContingencyError::InvalidTable(format!(
                "a {}x{} table has no degrees of freedom, at least 2 rows and 2 columns are required",
                rows, cols
            )));
        }
        if data.len() != rows * cols {
            return Err(ContingencyError::InvalidTable(format!(
                "expected {} counts for a {}x{} table but {} provided",
                rows * cols,
                rows,
                cols,
                data.len()
            )));
        }
        if row_labels.len() != rows {
            return Err(ContingencyError::InvalidTable(format!(
                "{} row labels provided for {} rows",
                row_labels.len(),
                rows
            )));
        }
        if col_labels.len() != cols {
            return Err(ContingencyError::InvalidTable(format!(
                "{} column labels provided for {} columns",
                col_labels.len(),
                cols
            )));
        }
        Ok(ContingencyTable {
            data,
            rows,
            cols,
            row_labels,
            col_labels,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get a single count.
    ///
    /// * `i` - The ith row of the table.
    /// * `j` - the jth column of the table.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.data[i * self.cols + j]
    }

    /// Get an entire row of counts.
    pub fn get_row(&self, row: usize) -> &[u64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Get access to a column of counts, as an iterator.
    pub fn get_col_iter(&self, col: usize) -> std::iter::StepBy<std::iter::Skip<std::slice::Iter<'_, u64>>> {
        self.data.iter().skip(col).step_by(self.cols)
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Counts as one vector per row.
    pub fn to_nested(&self) -> Vec<Vec<u64>> {
        self.data.chunks(self.cols).map(|r| r.to_vec()).collect()
    }
}
