//! Tabular section data and cell normalization.
//!
//! A [`DataTable`] keeps every cell as text exactly as exported, apart from
//! two repairs applied by [`CellNormalizer`]: placeholder cells become null
//! and minute rollovers in time values are pulled back below sixty seconds.

use crate::config::NormalizationConfig;
use crate::constants::{MINUTE_ROLLOVER_PATTERN, MINUTE_ROLLOVER_REPLACEMENT, PLACEHOLDER_VALUE};
use crate::error::{Result, SpeedCoachError};
use crate::timing::parse_elapsed;
use chrono::TimeDelta;
use once_cell::sync::Lazy;
use polars::prelude::{Column, DataFrame};
use regex::{NoExpand, Regex};
use serde::Serialize;
use std::collections::HashMap;

static MINUTE_ROLLOVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(MINUTE_ROLLOVER_PATTERN).expect("rollover pattern constant is a valid regex")
});

/// One cell; `None` marks a missing value
pub type Cell = Option<String>;

/// Rows of a section under its header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataTable {
    columns: Vec<String>,
    units: Option<Vec<Cell>>,
    rows: Vec<Vec<Cell>>,
}

impl DataTable {
    /// Build a table from rows already checked against the header width
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            columns,
            units: None,
            rows,
        }
    }

    /// Attach the units echo row
    pub fn with_units(mut self, units: Vec<Cell>) -> Self {
        self.units = Some(units);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Units row emitted by the device under the header, if the section had one
    pub fn units(&self) -> Option<&[Cell]> {
        self.units.as_deref()
    }

    /// Units for a named column
    pub fn unit(&self, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.units.as_ref()?.get(index)?.as_deref()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// All values of a named column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).and_then(Option::as_deref))
                .collect(),
        )
    }

    /// Value at a row in a named column
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)?.as_deref()
    }

    /// A row as a column name to value mapping
    pub fn row(&self, index: usize) -> Option<HashMap<&str, Option<&str>>> {
        let row = self.rows.get(index)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(Option::as_deref))
                .collect(),
        )
    }

    /// Values of a time column as durations; unparseable cells are `None`
    pub fn durations(&self, column: &str) -> Option<Vec<Option<TimeDelta>>> {
        Some(
            self.column(column)?
                .into_iter()
                .map(|value| value.and_then(parse_elapsed))
                .collect(),
        )
    }

    /// Remove the first row, returning it
    pub(crate) fn take_first_row(&mut self) -> Option<Vec<Cell>> {
        if self.rows.is_empty() {
            None
        } else {
            Some(self.rows.remove(0))
        }
    }

    /// Apply the normalizer to every cell
    pub fn normalize(&mut self, normalizer: &CellNormalizer) {
        for cell in self.rows.iter_mut().flatten() {
            normalizer.normalize_cell(cell);
        }
    }

    /// Convert to a DataFrame of nullable string columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let values: Vec<Option<&str>> =
                    self.rows
                        .iter()
                        .map(|row| row.get(index).and_then(Option::as_deref))
                        .collect();
                Column::new(name.as_str().into(), values)
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}

/// Placeholder and rollover repairs for extracted cells
#[derive(Debug, Clone)]
pub struct CellNormalizer {
    placeholder: String,
    rollover: Regex,
    replacement: String,
}

impl Default for CellNormalizer {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER_VALUE.to_string(),
            rollover: MINUTE_ROLLOVER.clone(),
            replacement: MINUTE_ROLLOVER_REPLACEMENT.to_string(),
        }
    }
}

impl CellNormalizer {
    /// Build a normalizer from configuration
    pub fn from_config(config: &NormalizationConfig) -> Result<Self> {
        if config.rollover_pattern == MINUTE_ROLLOVER_PATTERN {
            return Ok(Self {
                placeholder: config.placeholder.clone(),
                rollover: MINUTE_ROLLOVER.clone(),
                replacement: config.rollover_replacement.clone(),
            });
        }

        let rollover = Regex::new(&config.rollover_pattern).map_err(|e| {
            SpeedCoachError::Configuration {
                message: format!(
                    "Invalid rollover pattern '{}': {}",
                    config.rollover_pattern, e
                ),
            }
        })?;

        Ok(Self {
            placeholder: config.placeholder.clone(),
            rollover,
            replacement: config.rollover_replacement.clone(),
        })
    }

    /// Null out placeholders, then rewrite rollovers anywhere in the cell
    pub fn normalize_cell(&self, cell: &mut Cell) {
        let Some(value) = cell.as_ref() else {
            return;
        };

        if *value == self.placeholder {
            *cell = None;
            return;
        }

        if self.rollover.is_match(value) {
            let repaired = self
                .rollover
                .replace_all(value, NoExpand(&self.replacement))
                .into_owned();
            *cell = Some(repaired);
        }
    }
}
