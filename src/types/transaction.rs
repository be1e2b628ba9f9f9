//! Transaction-related types for the balance engine
//!
//! This module defines the persisted transaction record, the request shapes
//! accepted by the engine, and the receipt returned to callers.

use super::account::{AccountId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Internal transaction identifier assigned by the transaction store
///
/// Distinct from the opaque, externally-facing `transaction_id` string used
/// to reference a transaction for cancellation or queries.
pub type TxRecordId = u64;

/// Kinds of balance transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Balance-decreasing operation tied to a spend
    Use,

    /// Full reversal of a prior use transaction
    Cancel,
}

/// Outcome recorded on a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionResult {
    Success,
    Fail,
}

/// A persisted transaction record
///
/// Exactly one record is written per attempted operation once an account
/// has been located — successful or failed — forming an append-only audit
/// log. Records are never mutated or deleted after creation. A cancel
/// references the same account as the use it reverses but is a distinct
/// record, not a mutation of the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Internal identifier assigned by the transaction store on save
    pub id: TxRecordId,

    /// Internal id of the account this transaction affects
    pub account_id: AccountId,

    /// Number of the affected account, denormalized so receipts can be
    /// built from the stored record alone
    pub account_number: String,

    /// Use or Cancel
    pub transaction_type: TransactionType,

    /// Success or Fail
    pub result: TransactionResult,

    /// Requested amount in minor units
    ///
    /// Positive for any valid request; failed records may carry the
    /// originally-requested signed value.
    pub amount: i64,

    /// Account balance after this transaction's effect, or the unmodified
    /// balance when the effect never happened (failed records)
    pub balance_snapshot: u64,

    /// Opaque, unique, externally-facing identifier used for later
    /// cancellation or lookup
    pub transaction_id: String,

    /// When the transaction was recorded
    pub transacted_at: DateTime<Utc>,
}

/// A balance operation request, as accepted by the batch surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceRequest {
    /// Spend `amount` from the account owned by `user_id`
    Use {
        user_id: UserId,
        account_number: String,
        amount: i64,
    },

    /// Fully reverse the use transaction identified by `transaction_id`
    Cancel {
        transaction_id: String,
        account_number: String,
        amount: i64,
    },

    /// Look up a previously recorded transaction
    Query { transaction_id: String },
}

/// Result DTO returned to callers for successful operations and queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionReceipt {
    pub account_number: String,
    pub transaction_type: TransactionType,
    pub result: TransactionResult,
    pub transaction_id: String,
    pub amount: i64,
    pub balance_snapshot: u64,
    pub transacted_at: DateTime<Utc>,
}

impl TransactionReceipt {
    /// Build a receipt from a stored transaction record
    pub fn from_record(transaction: &Transaction) -> Self {
        TransactionReceipt {
            account_number: transaction.account_number.clone(),
            transaction_type: transaction.transaction_type,
            result: transaction.result,
            transaction_id: transaction.transaction_id.clone(),
            amount: transaction.amount,
            balance_snapshot: transaction.balance_snapshot,
            transacted_at: transaction.transacted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_copies_all_record_fields() {
        let transaction = Transaction {
            id: 7,
            account_id: 1,
            account_number: "1000000012".to_string(),
            transaction_type: TransactionType::Use,
            result: TransactionResult::Success,
            amount: 200,
            balance_snapshot: 9800,
            transaction_id: "tx-1".to_string(),
            transacted_at: Utc::now(),
        };

        let receipt = TransactionReceipt::from_record(&transaction);

        assert_eq!(receipt.account_number, "1000000012");
        assert_eq!(receipt.transaction_type, TransactionType::Use);
        assert_eq!(receipt.result, TransactionResult::Success);
        assert_eq!(receipt.transaction_id, "tx-1");
        assert_eq!(receipt.amount, 200);
        assert_eq!(receipt.balance_snapshot, 9800);
        assert_eq!(receipt.transacted_at, transaction.transacted_at);
    }
}
