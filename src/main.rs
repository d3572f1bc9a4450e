//! Statement extraction CLI.
//!
//! Converts every `.pdf` statement in a directory to text, extracts the
//! transactions of each account, reconciles balances, and writes the
//! global date-sorted ledger to a CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- statements/ [output.csv]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: log filter; defaults to `info` so progress and warnings
//!   are visible
//! - `RELEVE_PDF_TO_TEXT`: PDF-to-text command; defaults to
//!   `pdftotext -layout`

use log::info;
use releve_extract::{ExtractError, LedgerBuilder, Result, TextExtractor};
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(ExtractError::MissingArgument);
    }

    let input_dir = PathBuf::from(&args[1]);
    let output_path = args.get(2).map(String::as_str).unwrap_or("output.csv");

    // Lexicographic filename order keeps output reproducible across runs.
    let mut entries: Vec<PathBuf> = std::fs::read_dir(&input_dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    let extractor = TextExtractor::from_env();
    let mut builder = LedgerBuilder::new();

    for path in entries {
        // Case-sensitive extension check; anything that is not a statement
        // is skipped without comment.
        if path.extension().map(|ext| ext != "pdf").unwrap_or(true) {
            continue;
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        info!("parsing {name}");

        let text = extractor.extract(&path)?;
        builder
            .process_statement(&name, &text)
            .map_err(|e| ExtractError::Statement {
                file: name.clone(),
                source: Box::new(e),
            })?;
        info!("{name}: parse ok");
    }

    let output = File::create(output_path)?;
    builder.write_output(output)?;

    println!("OPERATIONS({})", builder.operations());
    println!("{}", builder.counts().summary());
    println!("ERRORS({})", builder.stats().errors);
    println!("WARNINGS({})", builder.stats().warnings);

    Ok(())
}
