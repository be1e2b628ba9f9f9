//! Core business logic module
//!
//! This module contains the transaction pipeline components:
//! - `traits` - capability seams for stores, identifiers, and time
//! - `validation` - pure ownership/status/amount/age rules
//! - `service` - orchestration of lookups, validation, and balance mutation
//! - `account_store` / `transaction_store` - in-memory store implementations

pub mod account_store;
pub mod service;
pub mod traits;
pub mod transaction_store;
pub mod validation;

pub use account_store::MemoryAccountStore;
pub use service::TransactionService;
pub use traits::{
    AccountStore, Clock, FixedClock, SystemClock, TransactionIdSource, TransactionStore,
    UuidIdSource,
};
pub use transaction_store::MemoryTransactionStore;
