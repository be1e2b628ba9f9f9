//! Balance Engine CLI
//!
//! Processes balance use/cancel/query requests from a CSV file against
//! accounts seeded from a second CSV, writing receipt rows for successful
//! operations to stdout (or a file).
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.csv --accounts accounts.csv > receipts.csv
//! cargo run -- requests.csv --accounts accounts.csv --output receipts.csv
//! ```
//!
//! Rejected requests are logged to stderr and, where the validation rules
//! allow it, recorded as failed transactions in the audit trail; they never
//! abort the run.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing input file, unreadable seed file, output I/O)

use balance_engine::cli;
use balance_engine::runner;
use std::fs::File;
use std::io::Write;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let result = match &args.output_file {
        Some(path) => match File::create(path) {
            Ok(mut file) => runner::run(&args.requests_file, &args.accounts_file, &mut file),
            Err(e) => Err(e.into()),
        },
        None => {
            let mut stdout = std::io::stdout();
            let result = runner::run(&args.requests_file, &args.accounts_file, &mut stdout);
            result.and_then(|()| stdout.flush().map_err(Into::into))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
