//! I/O module
//!
//! The CSV surface of the batch runner:
//! - `csv_format` - record conversion and output serialization
//! - `reader` - streaming reader over request rows

pub mod csv_format;
pub mod reader;

pub use csv_format::{
    convert_request, read_account_seeds, write_receipts_csv, AccountSeed, RequestRecord,
};
pub use reader::RequestReader;
