//! Shape matching.
//!
//! Each of the six reference shapes is a separate anchored regex with named
//! groups. They are tried in a fixed order and the first match wins, so the
//! captured tokens always come tagged with the [`Shape`] that produced them.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::Shape;
use crate::error::{ReferenceError, Result};

const SHEET: &str = r"^(?:(?<sheet>.+)!)?";
const COLUMN: &str = r"(?<column>\$?[A-Za-z]+)";
const ROW: &str = r"(?<row>\$?[0-9]+)";
const COLUMN_END: &str = r"(?<column_end>\$?[A-Za-z]+)";
const ROW_END: &str = r"(?<row_end>\$?[0-9]+)";

/// Tokens as they appear in the source text, `$` markers included.
///
/// `None` means the shape does not name that coordinate at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTokens<'a> {
    pub shape: Shape,
    pub sheet: Option<&'a str>,
    pub column: Option<&'a str>,
    pub row: Option<&'a str>,
    pub column_end: Option<&'a str>,
    pub row_end: Option<&'a str>,
}

fn shape_patterns() -> &'static [(Shape, Regex)] {
    static PATTERNS: OnceLock<Vec<(Shape, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (Shape::Range, format!("{COLUMN}{ROW}:{COLUMN_END}{ROW_END}")),
            (Shape::Alone, format!("{COLUMN}{ROW}")),
            (Shape::RowRange, format!("{ROW}:{ROW_END}")),
            (Shape::ColumnRange, format!("{COLUMN}:{COLUMN_END}")),
            (Shape::RowRangeOpen, format!("{COLUMN}{ROW}:{ROW_END}")),
            (Shape::ColumnRangeOpen, format!("{COLUMN}{ROW}:{COLUMN_END}")),
        ]
        .into_iter()
        .map(|(shape, coords)| {
            let re = Regex::new(&format!("{SHEET}{coords}$"))
                .expect("reference shape regex must compile");
            (shape, re)
        })
        .collect()
    })
}

fn quoted_sheet_re() -> &'static Regex {
    static QUOTED_RE: OnceLock<Regex> = OnceLock::new();
    QUOTED_RE.get_or_init(|| Regex::new(r"^'.+'!.+$").expect("quoted sheet regex must compile"))
}

/// True when the input starts with a quoted sheet prefix (`'name'!...`).
pub(crate) fn has_quoted_sheet(input: &str) -> bool {
    quoted_sheet_re().is_match(input)
}

fn group<'h>(caps: &Captures<'h>, name: &str) -> Option<&'h str> {
    caps.name(name).map(|m| m.as_str())
}

/// Match `input` against the six shapes in order.
pub(crate) fn match_shape(input: &str) -> Result<RawTokens<'_>> {
    let (shape, caps) = shape_patterns()
        .iter()
        .find_map(|(shape, re)| re.captures(input).map(|caps| (*shape, caps)))
        .ok_or_else(|| ReferenceError::invalid(input))?;

    let tokens = RawTokens {
        shape,
        sheet: group(&caps, "sheet"),
        column: group(&caps, "column"),
        row: group(&caps, "row"),
        column_end: group(&caps, "column_end"),
        row_end: group(&caps, "row_end"),
    };

    if tokens.column.is_none() && tokens.row.is_none() {
        return Err(ReferenceError::invalid(input));
    }

    log::debug!("matched {input:?} as {shape:?}");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_shape_is_recognized() {
        let cases = [
            ("A1:B2", Shape::Range),
            ("A1", Shape::Alone),
            ("1:3", Shape::RowRange),
            ("A:C", Shape::ColumnRange),
            ("A1:3", Shape::RowRangeOpen),
            ("A1:C", Shape::ColumnRangeOpen),
        ];
        for (input, shape) in cases {
            assert_eq!(match_shape(input).unwrap().shape, shape, "{input}");
        }
    }

    #[test]
    fn test_tokens_keep_markers_and_sheet() {
        let tokens = match_shape("'My Sheet'!$a$1:B$20").unwrap();
        assert_eq!(tokens.sheet, Some("'My Sheet'"));
        assert_eq!(tokens.column, Some("$a"));
        assert_eq!(tokens.row, Some("$1"));
        assert_eq!(tokens.column_end, Some("B"));
        assert_eq!(tokens.row_end, Some("$20"));
    }

    #[test]
    fn test_unnamed_coordinates_are_none() {
        let tokens = match_shape("2:5").unwrap();
        assert_eq!(tokens.column, None);
        assert_eq!(tokens.column_end, None);
        assert_eq!(tokens.row, Some("2"));
        assert_eq!(tokens.row_end, Some("5"));
        assert_eq!(tokens.sheet, None);
    }

    #[test]
    fn test_rejects_unknown_shapes() {
        for input in ["", "!!!", "Sheet1!", "!A1", "A", "1", "A:1", "1:A", "A:B2", "1A", "A1:B2:C3", "A 1"] {
            assert!(
                matches!(match_shape(input), Err(ReferenceError::InvalidReference { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_quoted_sheet_detection() {
        assert!(has_quoted_sheet("'Sheet 1'!A1"));
        assert!(!has_quoted_sheet("Sheet1!A1"));
        assert!(!has_quoted_sheet("'Sheet 1'!"));
        assert!(!has_quoted_sheet("A1"));
    }
}
