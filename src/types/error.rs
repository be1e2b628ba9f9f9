//! Error types for the balance engine
//!
//! This module defines all failures that a balance operation can surface.
//! Each variant carries enough context to diagnose the rejected request and
//! renders a fixed user-facing message.
//!
//! # Error Categories
//!
//! - **Lookup failures**: user, account, or transaction not found
//! - **Validation failures**: ownership, status, sufficiency, full-cancel,
//!   and age rules
//! - **Request failures**: malformed or non-positive amounts, rejected
//!   before any lookup
//! - **I/O and parse errors**: the CSV batch surface

use super::account::UserId;
use thiserror::Error;

/// Main error type for the balance engine
///
/// Every failure is surfaced synchronously to the caller as one of these
/// variants; none are retried internally, and none are fatal to the
/// process — each is scoped to a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// No user exists with the requested id
    ///
    /// Raised before any account resolution; no audit record is written.
    #[error("user {user_id} not found")]
    UserNotFound {
        /// The id that could not be resolved
        user_id: UserId,
    },

    /// No account exists with the requested account number
    #[error("account {account_number} not found")]
    AccountNotFound {
        /// The account number that could not be resolved
        account_number: String,
    },

    /// The resolved account is not owned by the requesting user
    #[error("account {account_number} does not belong to user {user_id}")]
    UserAccountMismatch {
        /// The requesting user
        user_id: UserId,
        /// The account they tried to spend from
        account_number: String,
    },

    /// The account has been unregistered and no longer accepts requests
    #[error("account {account_number} is already unregistered")]
    AccountAlreadyUnregistered {
        /// The unregistered account
        account_number: String,
    },

    /// The requested amount exceeds the current account balance
    ///
    /// The account state is left unchanged and no record is written by the
    /// orchestration method itself.
    #[error("amount {requested} exceeds balance {balance} of account {account_number}")]
    AmountExceedsBalance {
        /// The overdrawn account
        account_number: String,
        /// Balance at the time of the request
        balance: u64,
        /// Amount the request asked for
        requested: u64,
    },

    /// No transaction exists with the requested transaction identifier
    #[error("transaction {transaction_id} not found")]
    TransactionNotFound {
        /// The identifier that could not be resolved
        transaction_id: String,
    },

    /// The transaction being cancelled belongs to a different account
    #[error("transaction {transaction_id} does not belong to account {account_number}")]
    TransactionAccountMismatch {
        /// The transaction the request referenced
        transaction_id: String,
        /// The account the request named
        account_number: String,
    },

    /// Partial cancellation is not supported
    ///
    /// A cancel must reverse exactly the amount recorded on the original
    /// transaction.
    #[error("cancel amount {requested} does not match the original amount {original}")]
    CancelMustBeFull {
        /// Amount recorded on the original use transaction
        original: i64,
        /// Amount the cancel request asked for
        requested: u64,
    },

    /// The original transaction is more than one year old
    ///
    /// A transaction exactly one year old is still cancellable; one year
    /// and a day is not.
    #[error("transaction {transaction_id} is too old to cancel")]
    TooOldToCancel {
        /// The transaction the request tried to cancel
        transaction_id: String,
    },

    /// The request was malformed (e.g. a non-positive amount)
    ///
    /// Raised before any lookup occurs; no audit record is written.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request
        reason: String,
    },

    /// Applying the operation would overflow the account balance
    #[error("balance overflow in {operation} for account {account_number}")]
    BalanceOverflow {
        /// Operation that would overflow
        operation: String,
        /// The affected account
        account_number: String,
    },

    /// File not found at the specified path
    ///
    /// Fatal to the batch run: processing cannot start.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading or writing the batch files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error
    ///
    /// Recoverable: the malformed row is skipped and processing continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for BalanceError {
    fn from(error: std::io::Error) -> Self {
        BalanceError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for BalanceError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BalanceError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper constructors for the common variants

impl BalanceError {
    /// Create a UserNotFound error
    pub fn user_not_found(user_id: UserId) -> Self {
        BalanceError::UserNotFound { user_id }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account_number: &str) -> Self {
        BalanceError::AccountNotFound {
            account_number: account_number.to_string(),
        }
    }

    /// Create a UserAccountMismatch error
    pub fn user_account_mismatch(user_id: UserId, account_number: &str) -> Self {
        BalanceError::UserAccountMismatch {
            user_id,
            account_number: account_number.to_string(),
        }
    }

    /// Create an AccountAlreadyUnregistered error
    pub fn account_already_unregistered(account_number: &str) -> Self {
        BalanceError::AccountAlreadyUnregistered {
            account_number: account_number.to_string(),
        }
    }

    /// Create an AmountExceedsBalance error
    pub fn amount_exceeds_balance(account_number: &str, balance: u64, requested: u64) -> Self {
        BalanceError::AmountExceedsBalance {
            account_number: account_number.to_string(),
            balance,
            requested,
        }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(transaction_id: &str) -> Self {
        BalanceError::TransactionNotFound {
            transaction_id: transaction_id.to_string(),
        }
    }

    /// Create a TransactionAccountMismatch error
    pub fn transaction_account_mismatch(transaction_id: &str, account_number: &str) -> Self {
        BalanceError::TransactionAccountMismatch {
            transaction_id: transaction_id.to_string(),
            account_number: account_number.to_string(),
        }
    }

    /// Create a CancelMustBeFull error
    pub fn cancel_must_be_full(original: i64, requested: u64) -> Self {
        BalanceError::CancelMustBeFull {
            original,
            requested,
        }
    }

    /// Create a TooOldToCancel error
    pub fn too_old_to_cancel(transaction_id: &str) -> Self {
        BalanceError::TooOldToCancel {
            transaction_id: transaction_id.to_string(),
        }
    }

    /// Create an InvalidRequest error
    pub fn invalid_request(reason: &str) -> Self {
        BalanceError::InvalidRequest {
            reason: reason.to_string(),
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(operation: &str, account_number: &str) -> Self {
        BalanceError::BalanceOverflow {
            operation: operation.to_string(),
            account_number: account_number.to_string(),
        }
    }

    /// Whether this failure happened after an account had been resolved
    ///
    /// Callers are responsible for converting such failures into a
    /// persisted failed-transaction record via `save_failed_use_transaction`
    /// / `save_failed_cancel_transaction`. Failures raised before any
    /// account was resolved (lookup misses, malformed requests) must not
    /// produce an audit record.
    pub fn occurred_after_account_resolution(&self) -> bool {
        matches!(
            self,
            BalanceError::UserAccountMismatch { .. }
                | BalanceError::AccountAlreadyUnregistered { .. }
                | BalanceError::AmountExceedsBalance { .. }
                | BalanceError::TransactionAccountMismatch { .. }
                | BalanceError::CancelMustBeFull { .. }
                | BalanceError::TooOldToCancel { .. }
                | BalanceError::BalanceOverflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::user_not_found(
        BalanceError::user_not_found(12),
        "user 12 not found"
    )]
    #[case::account_not_found(
        BalanceError::account_not_found("1000000012"),
        "account 1000000012 not found"
    )]
    #[case::user_account_mismatch(
        BalanceError::user_account_mismatch(12, "1000000012"),
        "account 1000000012 does not belong to user 12"
    )]
    #[case::already_unregistered(
        BalanceError::account_already_unregistered("1000000012"),
        "account 1000000012 is already unregistered"
    )]
    #[case::amount_exceeds_balance(
        BalanceError::amount_exceeds_balance("1000000012", 100, 1000),
        "amount 1000 exceeds balance 100 of account 1000000012"
    )]
    #[case::transaction_not_found(
        BalanceError::transaction_not_found("tx-1"),
        "transaction tx-1 not found"
    )]
    #[case::transaction_account_mismatch(
        BalanceError::transaction_account_mismatch("tx-1", "1000000012"),
        "transaction tx-1 does not belong to account 1000000012"
    )]
    #[case::cancel_must_be_full(
        BalanceError::cancel_must_be_full(200, 100),
        "cancel amount 100 does not match the original amount 200"
    )]
    #[case::too_old(
        BalanceError::too_old_to_cancel("tx-1"),
        "transaction tx-1 is too old to cancel"
    )]
    #[case::invalid_request(
        BalanceError::invalid_request("amount must be positive"),
        "invalid request: amount must be positive"
    )]
    #[case::balance_overflow(
        BalanceError::balance_overflow("cancel", "1000000012"),
        "balance overflow in cancel for account 1000000012"
    )]
    #[case::parse_error_with_line(
        BalanceError::ParseError { line: Some(42), message: "bad field".to_string() },
        "CSV parse error at line 42: bad field"
    )]
    #[case::parse_error_without_line(
        BalanceError::ParseError { line: None, message: "bad field".to_string() },
        "CSV parse error: bad field"
    )]
    fn test_error_display(#[case] error: BalanceError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::user_account_mismatch(BalanceError::user_account_mismatch(1, "a"), true)]
    #[case::already_unregistered(BalanceError::account_already_unregistered("a"), true)]
    #[case::amount_exceeds_balance(BalanceError::amount_exceeds_balance("a", 1, 2), true)]
    #[case::transaction_account_mismatch(
        BalanceError::transaction_account_mismatch("t", "a"),
        true
    )]
    #[case::cancel_must_be_full(BalanceError::cancel_must_be_full(200, 100), true)]
    #[case::too_old(BalanceError::too_old_to_cancel("t"), true)]
    #[case::user_not_found(BalanceError::user_not_found(1), false)]
    #[case::account_not_found(BalanceError::account_not_found("a"), false)]
    #[case::transaction_not_found(BalanceError::transaction_not_found("t"), false)]
    #[case::invalid_request(BalanceError::invalid_request("r"), false)]
    fn test_audit_record_boundary(#[case] error: BalanceError, #[case] expected: bool) {
        assert_eq!(error.occurred_after_account_resolution(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: BalanceError = io_error.into();
        assert!(matches!(error, BalanceError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
