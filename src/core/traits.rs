//! Capability traits for stores, identifier generation, and time
//!
//! These traits draw the seam between the orchestration logic and its
//! collaborators, so the validation and balance-mutation pipeline can be
//! exercised against in-memory fakes with any persistence engine
//! substituted behind the same interface.

use crate::types::{Account, AccountUser, Transaction, UserId};
use chrono::{DateTime, Utc};

/// Lookup and persistence of accounts and their owners
///
/// Lookups are modeled as `Option`-returning queries; the service layer
/// converts an absent result into the matching typed failure.
pub trait AccountStore {
    /// Find an account owner by id
    fn find_user_by_id(&self, user_id: UserId) -> Option<AccountUser>;

    /// Find an account by its externally-facing account number
    fn find_by_account_number(&self, account_number: &str) -> Option<Account>;

    /// Write an account back to the store
    fn save_account(&mut self, account: Account);
}

/// Lookup and persistence of transaction records
pub trait TransactionStore {
    /// Find a transaction by its opaque transaction identifier
    fn find_by_transaction_id(&self, transaction_id: &str) -> Option<Transaction>;

    /// Persist a transaction record
    ///
    /// Returns the persisted record, including any store-assigned fields.
    fn save(&mut self, transaction: Transaction) -> Transaction;
}

/// Source of unique, opaque transaction identifiers
pub trait TransactionIdSource {
    /// Produce a fresh identifier, unique per call
    fn next_id(&mut self) -> String;
}

/// Source of transaction timestamps
pub trait Clock {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Production identifier source backed by UUID v4
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdSource;

impl TransactionIdSource for UuidIdSource {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
///
/// Mainly for tests that need the one-year cancellation window to be
/// deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_source_yields_unique_ids() {
        let mut ids = UuidIdSource;
        let first = ids.next_id();
        let second = ids.next_id();

        assert_ne!(first, second);
        assert_eq!(first.len(), 32); // simple form, no hyphens
    }

    #[test]
    fn test_fixed_clock_is_stable() {
        let instant = Utc::now();
        let clock = FixedClock(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }
}
