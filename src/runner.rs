//! Batch runner
//!
//! Drives the transaction service from a requests CSV, playing the role of
//! the surrounding request handler: it dispatches each request, and when a
//! use or cancel fails after its account had been resolved, it converts
//! the failure into a persisted failed-transaction record via the
//! `save_failed_*` entry points before moving on. Failures raised before
//! any account was resolved are logged and skipped without an audit
//! record.
//!
//! Per-request errors never abort the run; only setup problems (unreadable
//! input, malformed seed file, output I/O) are fatal.

use crate::core::traits::{AccountStore, Clock, TransactionIdSource, TransactionStore};
use crate::core::{MemoryAccountStore, TransactionService};
use crate::io::csv_format::{read_account_seeds, write_receipts_csv};
use crate::io::reader::RequestReader;
use crate::types::{AccountUser, BalanceError, BalanceRequest, TransactionReceipt};
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Process a requests CSV against accounts seeded from `accounts_path`,
/// writing one receipt row per successful operation or query to `output`
///
/// # Errors
///
/// * `FileNotFound` / `IoError` - input files cannot be read
/// * `ParseError` - the seed file is malformed (request rows are skipped
///   instead, with a warning)
pub fn run(
    requests_path: &Path,
    accounts_path: &Path,
    output: &mut dyn Write,
) -> Result<(), BalanceError> {
    let mut service = TransactionService::new();
    seed_accounts(service.accounts_mut(), accounts_path)?;

    let reader = RequestReader::from_path(requests_path)?;
    let mut receipts = Vec::new();

    for row in reader {
        match row {
            Ok(request) => {
                if let Some(receipt) = dispatch(&mut service, request) {
                    receipts.push(receipt);
                }
            }
            Err(error) => warn!(%error, "skipping unreadable request row"),
        }
    }

    write_receipts_csv(&receipts, output)
}

/// Populate the account store from the seed CSV
fn seed_accounts(store: &mut MemoryAccountStore, accounts_path: &Path) -> Result<(), BalanceError> {
    let seeds = read_account_seeds(accounts_path)?;
    for seed in seeds {
        store.upsert_user(AccountUser {
            id: seed.user,
            name: seed.name.clone(),
        });
        store.insert_account(seed.user, &seed.account, seed.status, seed.balance);
    }
    Ok(())
}

/// Execute one request, converting post-resolution failures into persisted
/// failed-transaction records
fn dispatch<A, T, I, C>(
    service: &mut TransactionService<A, T, I, C>,
    request: BalanceRequest,
) -> Option<TransactionReceipt>
where
    A: AccountStore,
    T: TransactionStore,
    I: TransactionIdSource,
    C: Clock,
{
    match request {
        BalanceRequest::Use {
            user_id,
            account_number,
            amount,
        } => match service.use_balance(user_id, &account_number, amount) {
            Ok(receipt) => Some(receipt),
            Err(error) => {
                if error.occurred_after_account_resolution() {
                    if let Err(audit_error) =
                        service.save_failed_use_transaction(&account_number, amount)
                    {
                        warn!(%audit_error, account = %account_number, "failed to record failed use");
                    }
                }
                warn!(%error, account = %account_number, "use request rejected");
                None
            }
        },
        BalanceRequest::Cancel {
            transaction_id,
            account_number,
            amount,
        } => match service.cancel_balance(&transaction_id, &account_number, amount) {
            Ok(receipt) => Some(receipt),
            Err(error) => {
                if error.occurred_after_account_resolution() {
                    if let Err(audit_error) =
                        service.save_failed_cancel_transaction(&account_number, amount)
                    {
                        warn!(%audit_error, account = %account_number, "failed to record failed cancel");
                    }
                }
                warn!(%error, transaction = %transaction_id, "cancel request rejected");
                None
            }
        },
        BalanceRequest::Query { transaction_id } => {
            match service.query_transaction(&transaction_id) {
                Ok(receipt) => Some(receipt),
                Err(error) => {
                    warn!(%error, transaction = %transaction_id, "query rejected");
                    None
                }
            }
        }
    }
}
