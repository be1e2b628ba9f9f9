use clap::Parser;
use std::path::PathBuf;

/// Process balance use/cancel requests against seeded accounts
#[derive(Parser, Debug)]
#[command(name = "balance-engine")]
#[command(about = "Process balance use/cancel requests against seeded accounts", long_about = None)]
pub struct CliArgs {
    /// Input CSV file containing balance requests
    #[arg(value_name = "REQUESTS", help = "Path to the requests CSV file")]
    pub requests_file: PathBuf,

    /// Account seed CSV populating the in-memory stores
    #[arg(
        long = "accounts",
        value_name = "ACCOUNTS",
        help = "Path to the account seed CSV file"
    )]
    pub accounts_file: PathBuf,

    /// Where to write receipt rows (defaults to stdout)
    #[arg(
        long = "output",
        value_name = "OUTPUT",
        help = "Path to write the receipts CSV (default: stdout)"
    )]
    pub output_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parses_required_arguments() {
        let parsed =
            CliArgs::try_parse_from(["program", "requests.csv", "--accounts", "accounts.csv"])
                .unwrap();

        assert_eq!(parsed.requests_file, PathBuf::from("requests.csv"));
        assert_eq!(parsed.accounts_file, PathBuf::from("accounts.csv"));
        assert!(parsed.output_file.is_none());
    }

    #[test]
    fn test_parses_output_option() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "requests.csv",
            "--accounts",
            "accounts.csv",
            "--output",
            "receipts.csv",
        ])
        .unwrap();

        assert_eq!(parsed.output_file, Some(PathBuf::from("receipts.csv")));
    }

    #[rstest]
    #[case::missing_everything(&["program"])]
    #[case::missing_accounts(&["program", "requests.csv"])]
    #[case::accounts_without_value(&["program", "requests.csv", "--accounts"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
