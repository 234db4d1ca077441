//! The validator's output: header plus every row whose value count matches it.

use std::collections::BTreeSet;

use benford_core::models::Row;

use crate::splitter::Grid;

/// Header row followed by the surviving data rows, in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedDataset {
    rows: Vec<Row>,
}

impl CleanedDataset {
    /// Copy `grid`, leaving out every row index in `corrupted`.
    ///
    /// The header (index 0) always has the header's own length and so is
    /// never in `corrupted`.
    pub fn assemble(grid: &Grid, corrupted: &BTreeSet<usize>) -> Self {
        let rows = grid
            .rows()
            .iter()
            .enumerate()
            .filter(|(index, _)| !corrupted.contains(index))
            .map(|(_, row)| row.clone())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn header(&self) -> &Row {
        &self.rows[0]
    }

    pub fn data_rows(&self) -> &[Row] {
        &self.rows[1..]
    }

    /// Number of rows including the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first header equal to `name`.
    pub fn column_index(&self, name: &[u8]) -> Option<usize> {
        self.header().iter().position(|h| h.as_slice() == name)
    }

    /// Every data row's value for column `name`, or `None` when the header
    /// has no such column.
    pub fn column_values(&self, name: &[u8]) -> Option<Vec<&[u8]>> {
        let index = self.column_index(name)?;
        Some(
            self.data_rows()
                .iter()
                .filter_map(|row| row.get(index).map(Vec::as_slice))
                .collect(),
        )
    }
}
