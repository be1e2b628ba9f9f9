//! Transaction service
//!
//! The orchestrator behind every balance operation: it sequences store
//! lookups, runs the pure validation rules, applies the balance delta with
//! checked arithmetic, persists the resulting transaction record, and maps
//! the outcome to a [`TransactionReceipt`].
//!
//! Each call is a synchronous sequence of reads, validation, one in-memory
//! balance mutation, and one record write; nothing suspends mid-sequence
//! and nothing is retried. Failure records for post-resolution rejections
//! are written by the caller through the `save_failed_*` entry points, not
//! by the orchestration methods themselves.

use crate::core::account_store::MemoryAccountStore;
use crate::core::traits::{
    AccountStore, Clock, SystemClock, TransactionIdSource, TransactionStore, UuidIdSource,
};
use crate::core::transaction_store::MemoryTransactionStore;
use crate::core::validation;
use crate::types::{
    Account, BalanceError, Transaction, TransactionReceipt, TransactionResult, TransactionType,
    UserId,
};
use tracing::debug;

/// Orchestrates balance use, cancel, audit, and query operations
///
/// Generic over its collaborators so the pipeline can run against
/// in-memory fakes, a fixed clock, or a deterministic id source under
/// test. [`TransactionService::new`] wires the production defaults.
pub struct TransactionService<A, T, I, C> {
    accounts: A,
    transactions: T,
    ids: I,
    clock: C,
}

impl TransactionService<MemoryAccountStore, MemoryTransactionStore, UuidIdSource, SystemClock> {
    /// Create a service over empty in-memory stores with UUID identifiers
    /// and the system clock
    pub fn new() -> Self {
        TransactionService::with_parts(
            MemoryAccountStore::new(),
            MemoryTransactionStore::new(),
            UuidIdSource,
            SystemClock,
        )
    }
}

impl Default
    for TransactionService<MemoryAccountStore, MemoryTransactionStore, UuidIdSource, SystemClock>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, T, I, C> TransactionService<A, T, I, C>
where
    A: AccountStore,
    T: TransactionStore,
    I: TransactionIdSource,
    C: Clock,
{
    /// Assemble a service from explicit collaborators
    pub fn with_parts(accounts: A, transactions: T, ids: I, clock: C) -> Self {
        TransactionService {
            accounts,
            transactions,
            ids,
            clock,
        }
    }

    /// The account store
    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    /// The account store, mutably (seeding)
    pub fn accounts_mut(&mut self) -> &mut A {
        &mut self.accounts
    }

    /// The transaction store
    pub fn transactions(&self) -> &T {
        &self.transactions
    }

    /// Spend `amount` from the account `account_number` owned by `user_id`
    ///
    /// Resolves the user and account, validates ownership, status, and
    /// sufficiency, decrements the balance, and persists a successful use
    /// record whose snapshot is the new balance.
    ///
    /// # Errors
    ///
    /// * `InvalidRequest` - non-positive amount (before any lookup)
    /// * `UserNotFound` / `AccountNotFound` - lookup misses, no record written
    /// * `UserAccountMismatch` / `AccountAlreadyUnregistered` /
    ///   `AmountExceedsBalance` - validation failures; the balance is
    ///   untouched and no record is written here (see
    ///   [`TransactionService::save_failed_use_transaction`])
    pub fn use_balance(
        &mut self,
        user_id: UserId,
        account_number: &str,
        amount: i64,
    ) -> Result<TransactionReceipt, BalanceError> {
        let amount = validation::validate_request_amount(amount)?;

        let user = self
            .accounts
            .find_user_by_id(user_id)
            .ok_or_else(|| BalanceError::user_not_found(user_id))?;
        let mut account = self
            .accounts
            .find_by_account_number(account_number)
            .ok_or_else(|| BalanceError::account_not_found(account_number))?;

        validation::validate_use(&user, &account, amount)?;

        let new_balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BalanceError::balance_overflow("use", account_number))?;
        account.balance = new_balance;
        self.accounts.save_account(account.clone());

        let record = self.record(
            &account,
            TransactionType::Use,
            TransactionResult::Success,
            amount as i64,
            new_balance,
        );
        debug!(
            transaction_id = %record.transaction_id,
            account = %account.account_number,
            amount,
            new_balance,
            "balance use recorded"
        );

        Ok(TransactionReceipt::from_record(&record))
    }

    /// Persist a failed use record against `account_number`
    ///
    /// Invoked by the caller when a use request failed after the account
    /// had been resolved, so every externally-visible attempt leaves an
    /// audit record. The balance is never touched: the snapshot is the
    /// current, unmodified balance, and the amount is stored as requested,
    /// sign included.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the account number cannot be resolved
    pub fn save_failed_use_transaction(
        &mut self,
        account_number: &str,
        amount: i64,
    ) -> Result<(), BalanceError> {
        let account = self
            .accounts
            .find_by_account_number(account_number)
            .ok_or_else(|| BalanceError::account_not_found(account_number))?;

        let record = self.record(
            &account,
            TransactionType::Use,
            TransactionResult::Fail,
            amount,
            account.balance,
        );
        debug!(
            transaction_id = %record.transaction_id,
            account = %account.account_number,
            amount,
            "failed use recorded"
        );

        Ok(())
    }

    /// Fully reverse the use transaction `transaction_id` on `account_number`
    ///
    /// Resolves the original transaction and the account, validates that
    /// they match, that the cancel covers the full original amount, and
    /// that the original is within the one-year window, then increments
    /// the balance and persists a successful cancel record. The original
    /// record is left untouched; the cancel is a distinct record.
    ///
    /// # Errors
    ///
    /// * `InvalidRequest` - non-positive amount (before any lookup)
    /// * `TransactionNotFound` / `AccountNotFound` - lookup misses
    /// * `TransactionAccountMismatch` / `CancelMustBeFull` /
    ///   `TooOldToCancel` - validation failures; no record is written here
    ///   (see [`TransactionService::save_failed_cancel_transaction`])
    /// * `BalanceOverflow` - the reversal would overflow the balance
    pub fn cancel_balance(
        &mut self,
        transaction_id: &str,
        account_number: &str,
        amount: i64,
    ) -> Result<TransactionReceipt, BalanceError> {
        let amount = validation::validate_request_amount(amount)?;

        let original = self
            .transactions
            .find_by_transaction_id(transaction_id)
            .ok_or_else(|| BalanceError::transaction_not_found(transaction_id))?;
        let mut account = self
            .accounts
            .find_by_account_number(account_number)
            .ok_or_else(|| BalanceError::account_not_found(account_number))?;

        validation::validate_cancel(&original, &account, amount, self.clock.now())?;

        let new_balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| BalanceError::balance_overflow("cancel", account_number))?;
        account.balance = new_balance;
        self.accounts.save_account(account.clone());

        let record = self.record(
            &account,
            TransactionType::Cancel,
            TransactionResult::Success,
            amount as i64,
            new_balance,
        );
        debug!(
            transaction_id = %record.transaction_id,
            cancelled = %transaction_id,
            account = %account.account_number,
            amount,
            new_balance,
            "balance cancel recorded"
        );

        Ok(TransactionReceipt::from_record(&record))
    }

    /// Persist a failed cancel record against `account_number`
    ///
    /// Mirror of [`TransactionService::save_failed_use_transaction`] with
    /// type Cancel.
    ///
    /// # Errors
    ///
    /// * `AccountNotFound` - the account number cannot be resolved
    pub fn save_failed_cancel_transaction(
        &mut self,
        account_number: &str,
        amount: i64,
    ) -> Result<(), BalanceError> {
        let account = self
            .accounts
            .find_by_account_number(account_number)
            .ok_or_else(|| BalanceError::account_not_found(account_number))?;

        let record = self.record(
            &account,
            TransactionType::Cancel,
            TransactionResult::Fail,
            amount,
            account.balance,
        );
        debug!(
            transaction_id = %record.transaction_id,
            account = %account.account_number,
            amount,
            "failed cancel recorded"
        );

        Ok(())
    }

    /// Look up a previously recorded transaction by its identifier
    ///
    /// No validation beyond existence and no mutation: the receipt is
    /// populated directly from the stored record, failed records included.
    ///
    /// # Errors
    ///
    /// * `TransactionNotFound` - the identifier cannot be resolved
    pub fn query_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<TransactionReceipt, BalanceError> {
        let record = self
            .transactions
            .find_by_transaction_id(transaction_id)
            .ok_or_else(|| BalanceError::transaction_not_found(transaction_id))?;

        Ok(TransactionReceipt::from_record(&record))
    }

    /// Build and persist a transaction record with a fresh identifier and
    /// the current timestamp
    fn record(
        &mut self,
        account: &Account,
        transaction_type: TransactionType,
        result: TransactionResult,
        amount: i64,
        balance_snapshot: u64,
    ) -> Transaction {
        let transaction = Transaction {
            // The store assigns the internal id on save.
            id: 0,
            account_id: account.id,
            account_number: account.account_number.clone(),
            transaction_type,
            result,
            amount,
            balance_snapshot,
            transaction_id: self.ids.next_id(),
            transacted_at: self.clock.now(),
        };
        self.transactions.save(transaction)
    }
}
