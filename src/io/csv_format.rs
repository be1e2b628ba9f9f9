//! CSV format handling for requests, account seeds, and receipts
//!
//! This module centralizes the CSV surface of the batch runner:
//! - `RequestRecord` deserialization and conversion to [`BalanceRequest`]
//! - `AccountSeed` rows that populate the in-memory stores
//! - receipt output serialization
//!
//! Conversion functions are pure (no I/O) for easy testing.

use crate::types::{
    AccountStatus, BalanceError, BalanceRequest, TransactionReceipt, UserId,
};
use csv::{ReaderBuilder, Trim, Writer};
use std::io::Write;
use std::path::Path;

/// Raw request row as read from the requests CSV
///
/// Columns: `command,user,account,transaction,amount`. Which fields are
/// required depends on the command, so everything but the command is
/// optional at this layer; [`convert_request`] enforces presence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RequestRecord {
    pub command: String,
    pub user: Option<UserId>,
    pub account: Option<String>,
    pub transaction: Option<String>,
    pub amount: Option<i64>,
}

/// Account seed row as read from the accounts CSV
///
/// Columns: `user,name,account,status,balance`, with status spelled
/// `in_use` or `unregistered`. One row per account; a user appearing on
/// several rows owns several accounts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct AccountSeed {
    pub user: UserId,
    pub name: String,
    pub account: String,
    pub status: AccountStatus,
    pub balance: u64,
}

/// Convert a raw request row into a typed [`BalanceRequest`]
///
/// Enforces field presence per command; the amount's sign and magnitude
/// are deliberately passed through untouched so the service can apply its
/// own fail-fast rule.
pub fn convert_request(record: RequestRecord) -> Result<BalanceRequest, BalanceError> {
    let command = record.command.to_lowercase();
    match command.as_str() {
        "use" => {
            let user_id = record
                .user
                .ok_or_else(|| BalanceError::invalid_request("use requires a user"))?;
            let account_number = require_account(record.account)?;
            let amount = require_amount(record.amount)?;
            Ok(BalanceRequest::Use {
                user_id,
                account_number,
                amount,
            })
        }
        "cancel" => {
            let transaction_id = require_transaction(record.transaction)?;
            let account_number = require_account(record.account)?;
            let amount = require_amount(record.amount)?;
            Ok(BalanceRequest::Cancel {
                transaction_id,
                account_number,
                amount,
            })
        }
        "query" => {
            let transaction_id = require_transaction(record.transaction)?;
            Ok(BalanceRequest::Query { transaction_id })
        }
        other => Err(BalanceError::invalid_request(&format!(
            "unknown command '{}'",
            other
        ))),
    }
}

fn require_account(account: Option<String>) -> Result<String, BalanceError> {
    match account {
        Some(number) if !number.is_empty() => Ok(number),
        _ => Err(BalanceError::invalid_request("an account number is required")),
    }
}

fn require_transaction(transaction: Option<String>) -> Result<String, BalanceError> {
    match transaction {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(BalanceError::invalid_request(
            "a transaction identifier is required",
        )),
    }
}

fn require_amount(amount: Option<i64>) -> Result<i64, BalanceError> {
    amount.ok_or_else(|| BalanceError::invalid_request("an amount is required"))
}

/// Read account seed rows from a CSV file
///
/// Fatal on a missing file; individual malformed rows are fatal too, since
/// a partially seeded store would make every downstream result suspect.
pub fn read_account_seeds(path: &Path) -> Result<Vec<AccountSeed>, BalanceError> {
    if !path.exists() {
        return Err(BalanceError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let mut seeds = Vec::new();
    for row in reader.deserialize::<AccountSeed>() {
        seeds.push(row?);
    }
    Ok(seeds)
}

/// Write receipts to CSV
///
/// Columns: `account,type,result,transaction_id,amount,balance,
/// transacted_at`, one row per receipt in processing order, timestamps in
/// RFC 3339.
pub fn write_receipts_csv(
    receipts: &[TransactionReceipt],
    output: &mut dyn Write,
) -> Result<(), BalanceError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record([
        "account",
        "type",
        "result",
        "transaction_id",
        "amount",
        "balance",
        "transacted_at",
    ])?;

    for receipt in receipts {
        writer.write_record(&[
            receipt.account_number.clone(),
            type_label(receipt).to_string(),
            result_label(receipt).to_string(),
            receipt.transaction_id.clone(),
            receipt.amount.to_string(),
            receipt.balance_snapshot.to_string(),
            receipt.transacted_at.to_rfc3339(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn type_label(receipt: &TransactionReceipt) -> &'static str {
    match receipt.transaction_type {
        crate::types::TransactionType::Use => "use",
        crate::types::TransactionType::Cancel => "cancel",
    }
}

fn result_label(receipt: &TransactionReceipt) -> &'static str {
    match receipt.result {
        crate::types::TransactionResult::Success => "success",
        crate::types::TransactionResult::Fail => "fail",
    }
}
