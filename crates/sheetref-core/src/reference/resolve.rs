//! The stages between a shape match and a finished [`Reference`].
//!
//! `RawTokens` -> [`resolve_shape`] -> `Resolved` -> [`extract_fixed`] ->
//! `MarkedTokens` -> [`normalize`] -> `Reference`. Every stage takes its input
//! by value and returns a new snapshot.

use super::column::column_rank;
use super::pattern::RawTokens;
use super::{Format, Reference, Shape};
use crate::config::Limits;
use crate::error::{ReferenceError, Result};

const FIRST_COLUMN: &str = "A";
const FIRST_ROW: &str = "1";

/// A coordinate value and whether it carried a `$` marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Marked<T> {
    pub value: T,
    pub fixed: bool,
}

/// Tokens after single-cell and open-ended shapes have been told apart.
///
/// The start coordinates are always present. An end is `None` only for the
/// open axis of a one-axis range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Resolved<'a> {
    pub shape: Shape,
    pub sheet: Option<&'a str>,
    pub column: &'a str,
    pub row: &'a str,
    pub column_end: Option<&'a str>,
    pub row_end: Option<&'a str>,
}

/// Tokens with `$` markers split off and rows converted to numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MarkedTokens<'a> {
    pub shape: Shape,
    pub sheet: Option<&'a str>,
    pub column: Marked<String>,
    pub row: Marked<u32>,
    pub column_end: Option<Marked<String>>,
    pub row_end: Option<Marked<u32>>,
}

pub(crate) fn resolve_shape(raw: RawTokens<'_>) -> Resolved<'_> {
    let column = raw.column.unwrap_or(FIRST_COLUMN);
    let row = raw.row.unwrap_or(FIRST_ROW);

    let (column_end, row_end) = match (raw.column_end, raw.row_end) {
        (None, None) => (Some(column), Some(row)),
        ends => ends,
    };

    Resolved {
        shape: raw.shape,
        sheet: raw.sheet,
        column,
        row,
        column_end,
        row_end,
    }
}

fn split_marker(token: &str) -> (&str, bool) {
    match token.strip_prefix('$') {
        Some(rest) => (rest, true),
        None => (token, false),
    }
}

fn mark_column(input: &str, token: &str) -> Result<Marked<String>> {
    let (letters, fixed) = split_marker(token);
    if column_rank(letters).is_none() {
        return Err(ReferenceError::invalid(input));
    }
    Ok(Marked {
        value: letters.to_string(),
        fixed,
    })
}

fn mark_row(input: &str, token: &str) -> Result<Marked<u32>> {
    let (digits, fixed) = split_marker(token);
    let value = digits
        .parse::<u32>()
        .ok()
        .filter(|row| *row > 0)
        .ok_or_else(|| ReferenceError::invalid(input))?;
    Ok(Marked { value, fixed })
}

/// Record and strip the `$` marker of every coordinate.
///
/// Fails when a row is `0` or does not fit in a `u32`, or when a column label
/// is too long to rank.
pub(crate) fn extract_fixed<'a>(input: &str, resolved: Resolved<'a>) -> Result<MarkedTokens<'a>> {
    Ok(MarkedTokens {
        shape: resolved.shape,
        sheet: resolved.sheet,
        column: mark_column(input, resolved.column)?,
        row: mark_row(input, resolved.row)?,
        column_end: resolved
            .column_end
            .map(|token| mark_column(input, token))
            .transpose()?,
        row_end: resolved
            .row_end
            .map(|token| mark_row(input, token))
            .transpose()?,
    })
}

/// Swap start and end columns when the end ranks before the start.
pub(crate) fn order_columns(column: &mut Marked<String>, column_end: &mut Option<Marked<String>>) {
    let Some(end) = column_end.as_mut() else {
        return;
    };
    if let (Some(start_rank), Some(end_rank)) = (column_rank(&column.value), column_rank(&end.value))
        && end_rank < start_rank
    {
        log::trace!("swapping columns {} and {}", column.value, end.value);
        std::mem::swap(column, end);
    }
}

/// Swap start and end rows when the end is above the start.
pub(crate) fn order_rows(row: &mut Marked<u32>, row_end: &mut Option<Marked<u32>>) {
    if let Some(end) = row_end.as_mut()
        && end.value < row.value
    {
        log::trace!("swapping rows {} and {}", row.value, end.value);
        std::mem::swap(row, end);
    }
}

/// Strip the quotes from a quoted sheet name, turning `''` back into `'`.
fn unquote_sheet(token: &str) -> Option<String> {
    let name = match token
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        Some(inner) => inner.replace("''", "'"),
        None => token.to_string(),
    };
    (!name.is_empty()).then_some(name)
}

/// Fill open ends (Excel only), order the coordinates, upper-case the columns
/// and unquote the sheet name.
pub(crate) fn normalize(
    input: &str,
    marked: MarkedTokens<'_>,
    format: Format,
    limits: Limits,
) -> Reference {
    let MarkedTokens {
        shape,
        sheet,
        mut column,
        mut row,
        mut column_end,
        mut row_end,
    } = marked;

    if format == Format::Excel {
        if column_end.is_none() {
            log::trace!("filling column end of {input:?} with {}", limits.column());
            column_end = Some(Marked {
                value: limits.column().to_string(),
                fixed: false,
            });
        }
        if row_end.is_none() {
            log::trace!("filling row end of {input:?} with {}", limits.row());
            row_end = Some(Marked {
                value: limits.row(),
                fixed: false,
            });
        }
    }

    order_columns(&mut column, &mut column_end);
    order_rows(&mut row, &mut row_end);

    column.value.make_ascii_uppercase();
    if let Some(end) = column_end.as_mut() {
        end.value.make_ascii_uppercase();
    }

    Reference {
        input: input.to_string(),
        format,
        shape,
        sheet: sheet.and_then(unquote_sheet),
        column,
        row,
        column_end,
        row_end,
        limits,
    }
}
