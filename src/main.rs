//! Chainreport Converter CLI
//!
//! Converts an exchange export into a Chainreport import file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- hi-csv hi_export.csv chainreport.csv
//! cargo run -- hi-pdf statement_2023_01.pdf chainreport.csv
//! cargo run -- --skip-lines 3 coinbase-csv coinbase.csv chainreport.csv
//! RUST_LOG=debug cargo run -- kraken-csv ledgers.csv chainreport.csv
//! ```
//!
//! Operator messages (lines to fix, withdrawals to verify) and the run summary
//! are printed to stdout unless `--quiet` is given. Developer diagnostics go
//! through `env_logger` on stderr (`RUST_LOG`, default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing input, malformed record, unwritable output, etc.)

use chainreport_converter::cli;
use chainreport_converter::core::Converter;
use env_logger::Env;
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();
    let converter = Converter::new(args.parser, args.to_converter_config());

    let mut print = |message: &str| println!("{}", message);
    let callback: Option<&mut dyn FnMut(&str)> = if args.quiet { None } else { Some(&mut print) };

    if let Err(e) = converter.convert_files(&args.input_file, &args.output_file, callback) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
