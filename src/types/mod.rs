//! Types module
//!
//! Contains core data structures used throughout the engine:
//! - `account`: account owners, accounts, and lifecycle status
//! - `transaction`: persisted records, requests, and receipts
//! - `error`: the error taxonomy

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountId, AccountStatus, AccountUser, UserId};
pub use error::BalanceError;
pub use transaction::{
    BalanceRequest, Transaction, TransactionReceipt, TransactionResult, TransactionType,
    TxRecordId,
};
