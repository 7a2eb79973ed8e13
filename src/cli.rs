//! Command-line argument handling.

use anyhow::{Context, bail};
use sheetref_core::FormatHint;
use std::path::PathBuf;

/// How each parsed reference is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Output {
    #[default]
    Canonical,
    Marked,
    Fields,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub hint: FormatHint,
    pub column_limit: String,
    pub row_limit: String,
    pub config_file: Option<PathBuf>,
    pub output: Output,
    pub references: Vec<String>,
    pub help: bool,
}

pub fn print_usage() {
    eprintln!("Usage: sheetref [OPTIONS] <REFERENCE>...");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <REFERENCE>...            References to normalize (e.g. A1:B2, 'Sheet 1'!A:A)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --excel                   Treat references as Excel notation");
    eprintln!("  --spreadsheet             Treat references as spreadsheet notation");
    eprintln!("  --column-limit <LETTERS>  Last column used to fill open ranges");
    eprintln!("  --row-limit <N>           Last row used to fill open ranges");
    eprintln!("  --config <FILE>           Read limits from a TOML file");
    eprintln!("  --marked                  Keep $ markers in the output");
    eprintln!("  --fields                  Print every parsed field as TOML");
    eprintln!("  -h, --help                Print help");
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                options.help = true;
                return Ok(options);
            }
            "--excel" => options.hint = FormatHint::Excel,
            "--spreadsheet" => options.hint = FormatHint::Spreadsheet,
            "--column-limit" => {
                i += 1;
                options.column_limit = args
                    .get(i)
                    .context("--column-limit requires a value")?
                    .to_string();
            }
            "--row-limit" => {
                i += 1;
                options.row_limit = args
                    .get(i)
                    .context("--row-limit requires a value")?
                    .to_string();
            }
            "--config" => {
                i += 1;
                let path = args.get(i).context("--config requires a file path")?;
                options.config_file = Some(PathBuf::from(path));
            }
            "--marked" => options.output = Output::Marked,
            "--fields" => options.output = Output::Fields,
            "--" => {
                options.references.extend(args[i + 1..].iter().cloned());
                break;
            }
            arg if arg.starts_with("--") => bail!("Unknown option: {}", arg),
            arg => options.references.push(arg.to_string()),
        }
        i += 1;
    }

    if options.references.is_empty() {
        bail!("No references given");
    }
    Ok(options)
}
