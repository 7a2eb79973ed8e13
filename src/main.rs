//! sheetref - normalize spreadsheet cell and range references

mod cli;

use cli::Output;
use sheetref_core::{ReferenceParser, load_limits};
use std::env;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match cli::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_usage();
            std::process::exit(1);
        }
    };
    if options.help {
        cli::print_usage();
        return;
    }

    let (limits, warnings) = load_limits(options.config_file.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    let parser = ReferenceParser::new(limits);

    let mut failed = false;
    for input in &options.references {
        match render(&parser, &options, input) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn render(parser: &ReferenceParser, options: &cli::Options, input: &str) -> anyhow::Result<String> {
    let reference =
        parser.parse_with_limits(input, options.hint, &options.column_limit, &options.row_limit)?;
    Ok(match options.output {
        Output::Canonical => reference.to_string(),
        Output::Marked => reference.to_marked_string(),
        Output::Fields => toml::to_string(&reference)?,
    })
}
