//! Reference parsing entry points.

use crate::config::{Limits, LimitsConfig};
use crate::error::Result;
use crate::reference::pattern::{has_quoted_sheet, match_shape};
use crate::reference::resolve::{extract_fixed, normalize, resolve_shape};
use crate::reference::{Format, FormatHint, Reference};

/// Parses references using a set of per-format limits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceParser {
    limits: LimitsConfig,
}

impl ReferenceParser {
    pub fn new(limits: LimitsConfig) -> ReferenceParser {
        ReferenceParser { limits }
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Parse `input`, filling open Excel ranges from the configured limits.
    pub fn parse(&self, input: &str, hint: FormatHint) -> Result<Reference> {
        let format = resolve_format(input, hint);
        let limits = self.limits.for_format(format).clone();
        parse_as(input, format, limits)
    }

    /// Parse `input` with explicit limits. An empty `column_limit` or
    /// `row_limit` keeps the configured value for the resolved format.
    pub fn parse_with_limits(
        &self,
        input: &str,
        hint: FormatHint,
        column_limit: &str,
        row_limit: &str,
    ) -> Result<Reference> {
        let format = resolve_format(input, hint);
        let limits = self
            .limits
            .for_format(format)
            .with_overrides(column_limit, row_limit)?;
        parse_as(input, format, limits)
    }
}

/// Pick the notation for `input`.
pub fn resolve_format(input: &str, hint: FormatHint) -> Format {
    match hint {
        FormatHint::Excel => Format::Excel,
        FormatHint::Spreadsheet => Format::Spreadsheet,
        FormatHint::Auto if has_quoted_sheet(input) => Format::Spreadsheet,
        FormatHint::Auto => Format::Excel,
    }
}

fn parse_as(input: &str, format: Format, limits: Limits) -> Result<Reference> {
    log::debug!("parsing {input:?} as {format:?}");
    let raw = match_shape(input)?;
    let marked = extract_fixed(input, resolve_shape(raw))?;
    Ok(normalize(input, marked, format, limits))
}

/// Parse `input` with the built-in limits.
pub fn parse(input: &str, hint: FormatHint) -> Result<Reference> {
    ReferenceParser::default().parse(input, hint)
}

/// Parse `input` with the built-in limits, overridden by any non-empty
/// `column_limit` / `row_limit`.
pub fn parse_with_limits(
    input: &str,
    hint: FormatHint,
    column_limit: &str,
    row_limit: &str,
) -> Result<Reference> {
    ReferenceParser::default().parse_with_limits(input, hint, column_limit, row_limit)
}
