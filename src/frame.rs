//! Date-indexed columnar frame.
//!
//! A [`Frame`] is an ordered mapping from calendar date to a row of named
//! `f64` cells, stored column-wise. `f64::NAN` marks an undefined cell
//! (e.g. the warmup prefix of a rolling calculation). Input frames and
//! indicator result frames share this one representation.

use chrono::NaiveDate;

use crate::error::TtiError;

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    index: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

impl Frame {
    /// Create a frame with a date index and no columns yet.
    pub fn with_index(index: Vec<NaiveDate>) -> Self {
        Frame {
            index,
            columns: Vec::new(),
        }
    }

    /// Create a frame from an index and named columns in one step.
    pub fn from_columns(
        index: Vec<NaiveDate>,
        columns: Vec<(&str, Vec<f64>)>,
    ) -> Result<Self, TtiError> {
        let mut frame = Frame::with_index(index);
        for (name, values) in columns {
            frame.push_column(name, values)?;
        }
        Ok(frame)
    }

    /// Append a column; its length must match the index.
    pub fn push_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), TtiError> {
        if values.len() != self.index.len() {
            return Err(TtiError::InvalidInputData {
                reason: format!(
                    "column {} has {} values for {} index rows",
                    name,
                    values.len(),
                    self.index.len()
                ),
            });
        }
        self.columns.push((name.to_string(), values));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Position of an exact date in the index, if present.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.index.iter().position(|&d| d == date)
    }

    /// All cells of row `i`, in column declaration order.
    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.index.len() {
            return None;
        }
        Some(self.columns.iter().map(|(_, values)| values[i]).collect())
    }

    pub fn last_row(&self) -> Option<Vec<f64>> {
        self.len().checked_sub(1).and_then(|i| self.row(i))
    }

    /// Owned copy of the first `n` rows (all rows when `n >= len`).
    pub fn head(&self, n: usize) -> Frame {
        let n = n.min(self.len());
        Frame {
            index: self.index[..n].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(name, values)| (name.clone(), values[..n].to_vec()))
                .collect(),
        }
    }
}
