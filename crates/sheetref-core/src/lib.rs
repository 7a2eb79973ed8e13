//! sheetref_core - parser and normalizer for spreadsheet cell/range references.

pub mod config;
pub mod error;
mod parser;
pub mod reference;

pub use config::{Limits, LimitsConfig, load_limits};
pub use error::{ReferenceError, Result};
pub use parser::{ReferenceParser, parse, parse_with_limits, resolve_format};
pub use reference::{Format, FormatHint, Reference, Shape, column_letters, column_rank};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cells_round_trip() {
        for input in ["A1", "B2", "Z10", "AA1", "XFD1048576", "Sheet1!C3"] {
            assert_eq!(parse(input, FormatHint::Auto).unwrap().to_string(), input);
        }
        assert_eq!(
            parse("'My Sheet'!A1", FormatHint::Auto).unwrap().to_string(),
            "'My Sheet'!A1"
        );
    }

    #[test]
    fn test_range_is_reordered() {
        let reference = parse("B2:A1", FormatHint::Spreadsheet).unwrap();
        assert_eq!(reference.to_string(), "A1:B2");
        assert_eq!(reference.shape(), Shape::Range);
    }

    #[test]
    fn test_rows_reorder_numerically() {
        let reference = parse("A10:A9", FormatHint::Auto).unwrap();
        assert_eq!(reference.row(), 9);
        assert_eq!(reference.row_end(), Some(10));
        assert_eq!(reference.to_string(), "A9:A10");
    }

    #[test]
    fn test_fixed_markers_are_isolated() {
        let reference = parse("$A$1:B2", FormatHint::Auto).unwrap();
        assert!(reference.column_fixed());
        assert!(reference.row_fixed());
        assert!(!reference.column_end_fixed());
        assert!(!reference.row_end_fixed());
        assert!(!reference.to_string().contains('$'));
    }

    #[test]
    fn test_open_end_filling_is_excel_only() {
        let excel = parse("A1:A", FormatHint::Excel).unwrap();
        assert_eq!(excel.row_end(), Some(1_048_576));
        assert_eq!(excel.shape(), Shape::ColumnRangeOpen);

        let sheet = parse("A1:A", FormatHint::Spreadsheet).unwrap();
        assert_eq!(sheet.row_end(), None);
        assert!(!sheet.row_end_fixed());
    }

    #[test]
    fn test_columns_are_upper_cased() {
        let reference = parse("a1:b2", FormatHint::Auto).unwrap();
        assert_eq!(reference.column(), "A");
        assert_eq!(reference.column_end(), Some("B"));
    }

    #[test]
    fn test_sheet_handling() {
        let excel = parse("Sheet1!A1", FormatHint::Excel).unwrap();
        assert_eq!(excel.sheet(), Some("Sheet1"));

        let sheet = parse("'My Sheet'!A1", FormatHint::Spreadsheet).unwrap();
        assert_eq!(sheet.sheet(), Some("My Sheet"));
        assert_eq!(sheet.to_string(), "'My Sheet'!A1");

        let current = parse("A1", FormatHint::Auto).unwrap();
        assert_eq!(current.sheet(), None);
    }

    #[test]
    fn test_invalid_inputs() {
        for input in ["", "!!!", "Sheet1!", "A", "A0", "1:A", "A1:B2:C3"] {
            let err = parse(input, FormatHint::Auto).unwrap_err();
            assert_eq!(
                err,
                ReferenceError::InvalidReference {
                    input: input.to_string()
                }
            );
        }
    }

    #[test]
    fn test_error_message_names_input() {
        let err = parse("!!!", FormatHint::Auto).unwrap_err();
        assert_eq!(err.to_string(), "Invalid reference: !!!");
    }

    #[test]
    fn test_row_and_column_ranges() {
        let rows = parse("3:1", FormatHint::Spreadsheet).unwrap();
        assert_eq!(rows.shape(), Shape::RowRange);
        assert_eq!(rows.column(), "A");
        assert_eq!(rows.column_end(), None);
        assert_eq!(rows.row(), 1);
        assert_eq!(rows.row_end(), Some(3));

        let columns = parse("$D:b", FormatHint::Excel).unwrap();
        assert_eq!(columns.shape(), Shape::ColumnRange);
        assert_eq!(columns.column(), "B");
        assert_eq!(columns.column_end(), Some("D"));
        assert!(columns.column_end_fixed());
        assert_eq!(columns.row(), 1);
        assert_eq!(columns.row_end(), Some(1_048_576));
    }

    #[test]
    fn test_excel_always_has_both_ends() {
        for input in ["A1", "A1:B2", "1:2", "A:B", "A1:5", "A1:C"] {
            let reference = parse(input, FormatHint::Excel).unwrap();
            assert!(reference.column_end().is_some(), "{input}");
            assert!(reference.row_end().is_some(), "{input}");
        }
    }

    #[test]
    fn test_input_is_retained() {
        let reference: Reference = "sheet1!$b$2".parse().unwrap();
        assert_eq!(reference.input(), "sheet1!$b$2");
        assert_eq!(reference.format(), Format::Excel);
        assert_eq!(reference.to_string(), "sheet1!B2");
    }

    #[test]
    fn test_reference_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Reference>();
        assert_send_sync::<ReferenceParser>();
    }
}
