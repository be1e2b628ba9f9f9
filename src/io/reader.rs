//! Streaming CSV reader over balance requests
//!
//! Yields one [`BalanceRequest`] per CSV row without loading the file into
//! memory. Fatal errors (file not found) are returned from the
//! constructor; per-row parse and conversion errors are yielded as `Err`
//! items so the caller can log them and keep going.

use crate::io::csv_format::{convert_request, RequestRecord};
use crate::types::{BalanceError, BalanceRequest};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming request reader with an iterator interface
#[derive(Debug)]
pub struct RequestReader {
    reader: csv::Reader<File>,
    line: u64,
}

impl RequestReader {
    /// Open a requests CSV for streaming iteration
    ///
    /// The reader trims whitespace and tolerates short rows (trailing
    /// optional columns may be omitted).
    ///
    /// # Errors
    ///
    /// * `FileNotFound` - the path does not exist
    /// * `IoError` - the file exists but cannot be opened
    pub fn from_path(path: &Path) -> Result<Self, BalanceError> {
        if !path.exists() {
            return Err(BalanceError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let file = File::open(path)?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(RequestReader { reader, line: 1 })
    }
}

impl Iterator for RequestReader {
    type Item = Result<BalanceRequest, BalanceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.reader.deserialize::<RequestRecord>().next()?;
        self.line += 1;

        match row {
            Ok(record) => Some(convert_request(record).map_err(|error| match error {
                // Attach the row position to conversion failures.
                BalanceError::InvalidRequest { reason } => BalanceError::ParseError {
                    line: Some(self.line),
                    message: reason,
                },
                other => other,
            })),
            Err(error) => Some(Err(error.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("failed to write temp file");
        file.flush().expect("failed to flush temp file");
        file
    }

    #[test]
    fn test_reader_fails_on_missing_file() {
        let result = RequestReader::from_path(Path::new("nonexistent.csv"));
        assert!(matches!(
            result.unwrap_err(),
            BalanceError::FileNotFound { .. }
        ));
    }

    #[test]
    fn test_reader_iterates_requests() {
        let file = create_temp_csv(
            "command,user,account,transaction,amount\n\
             use,12,1000000012,,200\n\
             cancel,,1000000012,tx-1,200\n\
             query,,,tx-1,\n",
        );

        let reader = RequestReader::from_path(file.path()).unwrap();
        let requests: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(requests.len(), 3);
        assert!(matches!(requests[0], BalanceRequest::Use { .. }));
        assert!(matches!(requests[1], BalanceRequest::Cancel { .. }));
        assert!(matches!(requests[2], BalanceRequest::Query { .. }));
    }

    #[test]
    fn test_reader_yields_error_with_line_number() {
        let file = create_temp_csv(
            "command,user,account,transaction,amount\n\
             use,12,1000000012,,200\n\
             transfer,12,1000000012,,200\n",
        );

        let reader = RequestReader::from_path(file.path()).unwrap();
        let rows: Vec<_> = reader.collect();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());
        match rows[1].as_ref().unwrap_err() {
            BalanceError::ParseError { line, message } => {
                assert_eq!(*line, Some(3)); // header is line 1
                assert!(message.contains("unknown command"));
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_reader_continues_after_error() {
        let file = create_temp_csv(
            "command,user,account,transaction,amount\n\
             use,12,1000000012,,200\n\
             use,not_a_number,1000000012,,200\n\
             use,13,1000000013,,300\n",
        );

        let reader = RequestReader::from_path(file.path()).unwrap();
        let rows: Vec<_> = reader.collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(rows[1].is_err());
        assert!(rows[2].is_ok());
    }

    #[test]
    fn test_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("command,user,account,transaction,amount\n");

        let reader = RequestReader::from_path(file.path()).unwrap();
        assert_eq!(reader.count(), 0);
    }

    #[test]
    fn test_reader_trims_whitespace() {
        let file = create_temp_csv(
            "command,user,account,transaction,amount\n\
             use , 12 , 1000000012 , , 200 \n",
        );

        let reader = RequestReader::from_path(file.path()).unwrap();
        let requests: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(
            requests[0],
            BalanceRequest::Use {
                user_id: 12,
                account_number: "1000000012".to_string(),
                amount: 200,
            }
        );
    }
}
