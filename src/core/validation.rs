//! Pure validation rules for balance operations
//!
//! Each function is side-effect-free: it inspects already-resolved entities
//! and either passes or returns the specific failure. The service layer
//! decides what to persist; nothing here touches a store.

use crate::types::{Account, AccountStatus, AccountUser, BalanceError, Transaction};
use chrono::{DateTime, Months, Utc};

/// How far back a use transaction remains cancellable, in calendar months.
const CANCEL_WINDOW_MONTHS: u32 = 12;

/// Check that a requested amount is a positive integer
///
/// Runs before any lookup; a non-positive amount fails `InvalidRequest`
/// and leaves no audit record. Returns the amount as unsigned for the
/// balance arithmetic downstream.
pub fn validate_request_amount(amount: i64) -> Result<u64, BalanceError> {
    if amount <= 0 {
        return Err(BalanceError::invalid_request("amount must be positive"));
    }
    Ok(amount as u64)
}

/// Validate a balance-use request against the resolved user and account
///
/// Checks run in order: ownership, status, sufficiency. The first failed
/// rule wins.
pub fn validate_use(
    user: &AccountUser,
    account: &Account,
    amount: u64,
) -> Result<(), BalanceError> {
    if account.user_id != user.id {
        return Err(BalanceError::user_account_mismatch(
            user.id,
            &account.account_number,
        ));
    }
    if account.status != AccountStatus::InUse {
        return Err(BalanceError::account_already_unregistered(
            &account.account_number,
        ));
    }
    if amount > account.balance {
        return Err(BalanceError::amount_exceeds_balance(
            &account.account_number,
            account.balance,
            amount,
        ));
    }
    Ok(())
}

/// Validate a cancel request against the original transaction and account
///
/// Checks run in order: the transaction must belong to the named account,
/// the cancel must cover the full original amount, and the original must
/// not be older than the cancellation window. A transaction exactly one
/// year old is still cancellable; one year and a day is rejected.
pub fn validate_cancel(
    transaction: &Transaction,
    account: &Account,
    amount: u64,
    now: DateTime<Utc>,
) -> Result<(), BalanceError> {
    if transaction.account_id != account.id {
        return Err(BalanceError::transaction_account_mismatch(
            &transaction.transaction_id,
            &account.account_number,
        ));
    }
    if transaction.amount != amount as i64 {
        return Err(BalanceError::cancel_must_be_full(transaction.amount, amount));
    }

    let expired = transaction
        .transacted_at
        .checked_add_months(Months::new(CANCEL_WINDOW_MONTHS))
        .is_some_and(|deadline| deadline < now);
    if expired {
        return Err(BalanceError::too_old_to_cancel(&transaction.transaction_id));
    }

    Ok(())
}
