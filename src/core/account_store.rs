//! In-memory account store
//!
//! This module provides `MemoryAccountStore`, the in-memory implementation
//! of the [`AccountStore`] capability. It maintains account owners keyed by
//! user id and accounts keyed by account number, and assigns internal
//! account ids on insertion.
//!
//! The engine assumes accounts pre-exist in the store (opening and
//! unregistering accounts happen outside the transaction pipeline), so the
//! store exposes seeding methods alongside the capability trait.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, AccountStatus, AccountUser, UserId};
use std::collections::HashMap;

/// In-memory implementation of [`AccountStore`]
///
/// Backed by two `HashMap`s: owners by user id and accounts by account
/// number. Internal account ids are assigned sequentially on insertion.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    users: HashMap<UserId, AccountUser>,
    accounts: HashMap<String, Account>,
    next_account_id: AccountId,
}

impl MemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryAccountStore {
            users: HashMap::new(),
            accounts: HashMap::new(),
            next_account_id: 0,
        }
    }

    /// Insert or replace an account owner
    pub fn upsert_user(&mut self, user: AccountUser) {
        self.users.insert(user.id, user);
    }

    /// Insert an account for an existing owner, assigning its internal id
    ///
    /// Returns the assigned id. A duplicate account number replaces the
    /// previous entry; seeding inputs are expected to be unique.
    pub fn insert_account(
        &mut self,
        user_id: UserId,
        account_number: &str,
        status: AccountStatus,
        balance: u64,
    ) -> AccountId {
        self.next_account_id += 1;
        let id = self.next_account_id;
        self.accounts.insert(
            account_number.to_string(),
            Account {
                id,
                user_id,
                account_number: account_number.to_string(),
                status,
                balance,
            },
        );
        id
    }

    /// Number of accounts currently held
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

impl AccountStore for MemoryAccountStore {
    fn find_user_by_id(&self, user_id: UserId) -> Option<AccountUser> {
        self.users.get(&user_id).cloned()
    }

    fn find_by_account_number(&self, account_number: &str) -> Option<Account> {
        self.accounts.get(account_number).cloned()
    }

    fn save_account(&mut self, account: Account) {
        self.accounts
            .insert(account.account_number.clone(), account);
    }
}
