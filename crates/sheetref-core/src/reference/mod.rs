//! Parsed, normalized cell and range references.
//!
//! - [`Reference`] - the result of a parse, immutable once built
//! - [`Format`], [`FormatHint`] - Excel (`Sheet1!A1`) vs spreadsheet (`'Sheet 1'!A1`) notation
//! - [`Shape`] - which of the six reference shapes the input matched
//! - [`column_rank`], [`column_letters`] - column label arithmetic

mod column;
mod display;
pub(crate) mod pattern;
pub(crate) mod resolve;

use serde::Serialize;
use std::str::FromStr;

pub use column::{column_letters, column_rank};

use crate::config::Limits;
use crate::error::ReferenceError;
use resolve::{Marked, order_columns, order_rows};

/// Reference notation.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// `Sheet1!A1:B2`; open ends are filled from the limits.
    Excel,
    /// `'Sheet 1'!A1:B2`; open ends stay open.
    Spreadsheet,
}

/// Requested notation for a parse. `Auto` picks [`Format::Spreadsheet`] for
/// inputs with a quoted sheet prefix and [`Format::Excel`] otherwise.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum FormatHint {
    #[default]
    Auto,
    Excel,
    Spreadsheet,
}

impl From<Format> for FormatHint {
    fn from(format: Format) -> Self {
        match format {
            Format::Excel => FormatHint::Excel,
            Format::Spreadsheet => FormatHint::Spreadsheet,
        }
    }
}

/// The reference shape matched in the source text.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// `A1:B2`
    Range,
    /// `A1`
    Alone,
    /// `1:3`
    RowRange,
    /// `A:C`
    ColumnRange,
    /// `A1:3`
    RowRangeOpen,
    /// `A1:C`
    ColumnRangeOpen,
}

/// A parsed reference to a cell or rectangular range.
///
/// The start column and row are always present. The ends equal the start
/// for a single cell, and are absent only on the open axis of a
/// spreadsheet-format one-axis range such as `A1:A`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub(crate) input: String,
    pub(crate) format: Format,
    pub(crate) shape: Shape,
    pub(crate) sheet: Option<String>,
    pub(crate) column: Marked<String>,
    pub(crate) row: Marked<u32>,
    pub(crate) column_end: Option<Marked<String>>,
    pub(crate) row_end: Option<Marked<u32>>,
    pub(crate) limits: Limits,
}

impl Reference {
    /// The text this reference was parsed from.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The sheet name without quotes, or `None` for the current sheet.
    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    pub fn column(&self) -> &str {
        &self.column.value
    }

    pub fn row(&self) -> u32 {
        self.row.value
    }

    pub fn column_end(&self) -> Option<&str> {
        self.column_end.as_ref().map(|end| end.value.as_str())
    }

    pub fn row_end(&self) -> Option<u32> {
        self.row_end.as_ref().map(|end| end.value)
    }

    pub fn column_fixed(&self) -> bool {
        self.column.fixed
    }

    pub fn row_fixed(&self) -> bool {
        self.row.fixed
    }

    pub fn column_end_fixed(&self) -> bool {
        self.column_end.as_ref().is_some_and(|end| end.fixed)
    }

    pub fn row_end_fixed(&self) -> bool {
        self.row_end.as_ref().is_some_and(|end| end.fixed)
    }

    /// The limits that were used (or would be used) to fill open ends.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// True when the reference covers exactly one cell.
    pub fn is_single_cell(&self) -> bool {
        self.column_end() == Some(self.column()) && self.row_end() == Some(self.row())
    }

    /// Number of columns covered, or `None` when the column axis is open.
    pub fn width(&self) -> Option<u64> {
        let start = column_rank(self.column())?;
        let end = column_rank(self.column_end()?)?;
        Some(end - start + 1)
    }

    /// Number of rows covered, or `None` when the row axis is open.
    pub fn height(&self) -> Option<u64> {
        let end = self.row_end()?;
        Some(u64::from(end) - u64::from(self.row()) + 1)
    }

    /// Move every relative coordinate by the given number of columns and rows,
    /// the way a formula reference moves when the formula is copied. Fixed
    /// coordinates stay where they are.
    ///
    /// Returns `None` when a coordinate would move before column `A` or row `1`.
    pub fn offset(&self, columns: i64, rows: i64) -> Option<Reference> {
        let mut column = offset_column(&self.column, columns)?;
        let mut column_end = match &self.column_end {
            Some(end) => Some(offset_column(end, columns)?),
            None => None,
        };
        let mut row = offset_row(&self.row, rows)?;
        let mut row_end = match &self.row_end {
            Some(end) => Some(offset_row(end, rows)?),
            None => None,
        };

        order_columns(&mut column, &mut column_end);
        order_rows(&mut row, &mut row_end);

        Some(Reference {
            input: self.input.clone(),
            format: self.format,
            shape: self.shape,
            sheet: self.sheet.clone(),
            column,
            row,
            column_end,
            row_end,
            limits: self.limits.clone(),
        })
    }
}

fn offset_column(column: &Marked<String>, delta: i64) -> Option<Marked<String>> {
    if column.fixed || delta == 0 {
        return Some(column.clone());
    }
    let rank = column_rank(&column.value)?;
    let moved = rank.checked_add_signed(delta).filter(|rank| *rank > 0)?;
    Some(Marked {
        value: column_letters(moved)?,
        fixed: false,
    })
}

fn offset_row(row: &Marked<u32>, delta: i64) -> Option<Marked<u32>> {
    if row.fixed || delta == 0 {
        return Some(row.clone());
    }
    let moved = i64::from(row.value).checked_add(delta)?;
    let value = u32::try_from(moved).ok().filter(|row| *row > 0)?;
    Some(Marked {
        value,
        fixed: false,
    })
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s, FormatHint::Auto)
    }
}

#[derive(Serialize)]
struct ReferenceFields<'a> {
    input: &'a str,
    format: Format,
    shape: Shape,
    canonical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sheet: Option<&'a str>,
    column: &'a str,
    row: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_end: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    row_end: Option<u32>,
    column_fixed: bool,
    row_fixed: bool,
    column_end_fixed: bool,
    row_end_fixed: bool,
    limits: &'a Limits,
}

impl Serialize for Reference {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReferenceFields {
            input: self.input(),
            format: self.format,
            shape: self.shape,
            canonical: self.to_string(),
            sheet: self.sheet(),
            column: self.column(),
            row: self.row(),
            column_end: self.column_end(),
            row_end: self.row_end(),
            column_fixed: self.column_fixed(),
            row_fixed: self.row_fixed(),
            column_end_fixed: self.column_end_fixed(),
            row_end_fixed: self.row_end_fixed(),
            limits: &self.limits,
        }
        .serialize(serializer)
    }
}
