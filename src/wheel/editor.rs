//! Editable prize rows
//!
//! Backs the add-row / rebalance UI. Probabilities are kept at full precision;
//! the one-decimal percentages shown to the user are derived and never read
//! back into the model.

use serde::{Deserialize, Serialize};

use super::prizes::{PrizeEntry, PrizeRegistry, PrizeSource};
use super::probability::auto_balance_weights;
use crate::error::{Result, WheelError};

/// Grow-only list of prize rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeEditor {
    rows: Vec<PrizeEntry>,
    max_rows: usize,
}

impl PrizeEditor {
    pub fn new(max_rows: usize) -> Self {
        Self {
            rows: Vec::new(),
            max_rows,
        }
    }

    /// Start from an existing table
    pub fn from_registry(registry: &PrizeRegistry, max_rows: usize) -> Self {
        Self {
            rows: registry.entries().to_vec(),
            max_rows: max_rows.max(registry.len()),
        }
    }

    pub fn rows(&self) -> &[PrizeEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.max_rows
    }

    /// Append a blank row; returns its index
    pub fn add_row(&mut self) -> Result<usize> {
        if self.is_full() {
            return Err(WheelError::TooManySegments { max: self.max_rows });
        }
        let index = self.rows.len();
        self.rows.push(PrizeEntry::new(format!("Prize {}", index + 1), 0.0));
        log::debug!("Added prize row {index}");
        Ok(index)
    }

    /// Append a row and rebalance so the table stays spinnable.
    ///
    /// A lone row takes the whole wheel. On failure the editor is left unchanged.
    pub fn add_balanced_row(&mut self, fixed_first: f64) -> Result<usize> {
        let index = self.add_row()?;
        if self.rows.len() == 1 {
            self.rows[0].probability = 1.0;
            return Ok(index);
        }
        if let Err(e) = self.rebalance(fixed_first) {
            self.rows.pop();
            return Err(e);
        }
        Ok(index)
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        self.row_mut(index)?.label = label.into();
        Ok(())
    }

    /// Set a row from a user-entered percentage
    pub fn set_percent(&mut self, index: usize, percent: f64) -> Result<()> {
        self.row_mut(index)?.probability = percent / 100.0;
        Ok(())
    }

    /// Pin row 0 to `fixed_first` and spread the rest by powers of two
    pub fn rebalance(&mut self, fixed_first: f64) -> Result<()> {
        let probabilities = auto_balance_weights(&self.rows, fixed_first)?;
        for (row, p) in self.rows.iter_mut().zip(probabilities) {
            row.probability = p;
        }
        log::info!("Rebalanced {} prizes (first = {fixed_first})", self.rows.len());
        Ok(())
    }

    /// One-decimal percentage for display only
    pub fn display_percent(&self, index: usize) -> Option<String> {
        self.rows
            .get(index)
            .map(|row| format!("{:.1}", row.probability * 100.0))
    }

    /// Validated full-precision snapshot for the next spin
    pub fn snapshot(&self) -> Result<PrizeRegistry> {
        PrizeRegistry::from_source(self)
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut PrizeEntry> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(WheelError::RowOutOfRange { index, len })
    }
}

impl PrizeSource for PrizeEditor {
    fn prizes(&self) -> Vec<PrizeEntry> {
        self.rows.clone()
    }
}
