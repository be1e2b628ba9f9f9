//! Account-related types for the balance engine
//!
//! This module defines account owners, accounts, and account lifecycle
//! status used throughout the system.

use serde::{Deserialize, Serialize};

/// Account owner identifier
pub type UserId = u64;

/// Internal account identifier assigned by the account store
pub type AccountId = u64;

/// Account lifecycle status
///
/// Accounts are opened in `InUse`. An `Unregistered` account still exists
/// in the store (its transaction history remains queryable) but rejects
/// new balance-use requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    InUse,
    Unregistered,
}

/// Owner of zero or more accounts
///
/// Immutable after creation; administrative renames happen outside this
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUser {
    /// Owner identifier
    pub id: UserId,

    /// Display name of the owner
    pub name: String,
}

/// A single account and its current balance
///
/// The balance is held in currency minor units and must never go negative:
/// a use request that would overdraw is rejected before any mutation.
/// Only the transaction service mutates the balance, one request at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Internal identifier assigned by the account store
    pub id: AccountId,

    /// Identifier of the owning [`AccountUser`]
    ///
    /// A reference, not ownership: one user may own many accounts.
    pub user_id: UserId,

    /// Unique, externally-facing account number
    pub account_number: String,

    /// Lifecycle status; only `InUse` accounts accept use requests
    pub status: AccountStatus,

    /// Current balance in currency minor units, never negative
    pub balance: u64,
}
