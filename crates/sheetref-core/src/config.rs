//! Row/column limits used to fill open-ended ranges.
//!
//! Limits come from three layers, highest priority first: explicit values
//! passed to a parse call, a `limits.toml` file, and the built-in defaults
//! for each format.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ReferenceError, Result};
use crate::reference::{Format, column_rank};

const MAX_LIMITS_FILE_BYTES: u64 = 65_536;

/// The last column and row of a sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Limits {
    column: String,
    row: u32,
}

impl Limits {
    /// Build limits from a column label and a row number given as text.
    pub fn new(column: &str, row: &str) -> Result<Limits> {
        let row = row
            .parse::<u32>()
            .ok()
            .filter(|row| *row > 0)
            .ok_or_else(|| ReferenceError::InvalidLimit {
                limit: row.to_string(),
            })?;
        Limits::from_parts(column, row)
    }

    fn from_parts(column: &str, row: u32) -> Result<Limits> {
        let invalid = |limit: String| ReferenceError::InvalidLimit { limit };
        if row == 0 {
            return Err(invalid(row.to_string()));
        }
        if column_rank(column).is_none() {
            return Err(invalid(column.to_string()));
        }
        Ok(Limits {
            column: column.to_ascii_uppercase(),
            row,
        })
    }

    /// `XFD` / `1048576`.
    pub fn excel() -> Limits {
        Limits {
            column: "XFD".to_string(),
            row: 1_048_576,
        }
    }

    /// `Z` / `1000`.
    pub fn spreadsheet() -> Limits {
        Limits {
            column: "Z".to_string(),
            row: 1_000,
        }
    }

    pub fn for_format(format: Format) -> Limits {
        match format {
            Format::Excel => Limits::excel(),
            Format::Spreadsheet => Limits::spreadsheet(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    /// Replace either part with a caller-supplied override. Empty strings keep
    /// the current value.
    pub fn with_overrides(&self, column: &str, row: &str) -> Result<Limits> {
        let row = if row.is_empty() {
            self.row.to_string()
        } else {
            row.to_string()
        };
        let column = if column.is_empty() { self.column.as_str() } else { column };
        Limits::new(column, &row)
    }
}

/// Limits for both formats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LimitsConfig {
    pub excel: Limits,
    pub spreadsheet: Limits,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            excel: Limits::excel(),
            spreadsheet: Limits::spreadsheet(),
        }
    }
}

impl LimitsConfig {
    pub fn for_format(&self, format: Format) -> &Limits {
        match format {
            Format::Excel => &self.excel,
            Format::Spreadsheet => &self.spreadsheet,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsFile {
    excel: Option<LimitsTable>,
    spreadsheet: Option<LimitsTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsTable {
    column: Option<String>,
    row: Option<u32>,
}

fn apply_table(
    base: Limits,
    table: Option<&LimitsTable>,
    name: &str,
    warnings: &mut Vec<String>,
) -> Limits {
    let Some(table) = table else {
        return base;
    };
    let column = table.column.as_deref().unwrap_or(base.column());
    let row = table.row.unwrap_or(base.row());
    match Limits::from_parts(column, row) {
        Ok(limits) => limits,
        Err(err) => {
            warnings.push(format!("Ignoring [{}] limits: {}", name, err));
            base
        }
    }
}

/// Parse limits from TOML text. Tables or keys that are missing keep their
/// defaults; invalid values are reported in the returned warnings.
pub fn parse_limits(content: &str, path: &Path) -> Result<(LimitsConfig, Vec<String>)> {
    let file: LimitsFile = toml::from_str(content).map_err(|err| ReferenceError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut warnings = Vec::new();
    let defaults = LimitsConfig::default();
    let config = LimitsConfig {
        excel: apply_table(defaults.excel, file.excel.as_ref(), "excel", &mut warnings),
        spreadsheet: apply_table(
            defaults.spreadsheet,
            file.spreadsheet.as_ref(),
            "spreadsheet",
            &mut warnings,
        ),
    };
    Ok((config, warnings))
}

/// Read and parse a limits file.
pub fn read_limits_file(path: &Path) -> Result<(LimitsConfig, Vec<String>)> {
    let config_err = |message: String| ReferenceError::Config {
        path: path.to_path_buf(),
        message,
    };
    let meta = std::fs::metadata(path).map_err(|err| config_err(err.to_string()))?;
    if meta.len() > MAX_LIMITS_FILE_BYTES {
        return Err(config_err(format!(
            "file too large ({} bytes, max {})",
            meta.len(),
            MAX_LIMITS_FILE_BYTES
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|err| config_err(err.to_string()))?;
    parse_limits(&content, path)
}

/// Load limits from `limits_file`, or from the user's config directory when
/// no file is given. Problems never fail the load; they fall back to the
/// defaults and are returned as warnings.
pub fn load_limits(limits_file: Option<&Path>) -> (LimitsConfig, Vec<String>) {
    let config_path = limits_file.map(Path::to_path_buf).or_else(user_limits_path);
    let Some(path) = config_path else {
        return (LimitsConfig::default(), Vec::new());
    };

    if !path.exists() {
        let mut warnings = Vec::new();
        if limits_file.is_some() {
            warnings.push(format!("Limits file not found: {}", path.display()));
        }
        return (LimitsConfig::default(), warnings);
    }

    match read_limits_file(&path) {
        Ok((config, warnings)) => {
            log::debug!("loaded limits from {}", path.display());
            (config, warnings)
        }
        Err(err) => (LimitsConfig::default(), vec![err.to_string()]),
    }
}

fn user_limits_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetref")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("limits.toml");
    Some(path)
}
