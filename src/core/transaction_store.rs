//! In-memory transaction store
//!
//! This module provides `MemoryTransactionStore`, the in-memory
//! implementation of the [`TransactionStore`] capability. Records are keyed
//! by their opaque transaction identifier and assigned a sequential
//! internal id on save.
//!
//! The store is append-only: records are never mutated or deleted once
//! saved, so the full history of attempted operations remains available as
//! an audit trail.

use crate::core::traits::TransactionStore;
use crate::types::{Transaction, TxRecordId};
use std::collections::HashMap;

/// In-memory implementation of [`TransactionStore`]
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    by_transaction_id: HashMap<String, Transaction>,
    next_id: TxRecordId,
}

impl MemoryTransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryTransactionStore {
            by_transaction_id: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.by_transaction_id.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.by_transaction_id.is_empty()
    }

    /// All records ordered by internal id (insertion order)
    pub fn records(&self) -> Vec<&Transaction> {
        let mut records: Vec<&Transaction> = self.by_transaction_id.values().collect();
        records.sort_by_key(|record| record.id);
        records
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn find_by_transaction_id(&self, transaction_id: &str) -> Option<Transaction> {
        self.by_transaction_id.get(transaction_id).cloned()
    }

    fn save(&mut self, mut transaction: Transaction) -> Transaction {
        self.next_id += 1;
        transaction.id = self.next_id;
        self.by_transaction_id
            .insert(transaction.transaction_id.clone(), transaction.clone());
        transaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TransactionResult, TransactionType};
    use chrono::Utc;

    fn sample_transaction(transaction_id: &str) -> Transaction {
        Transaction {
            id: 0,
            account_id: 1,
            account_number: "1000000012".to_string(),
            transaction_type: TransactionType::Use,
            result: TransactionResult::Success,
            amount: 200,
            balance_snapshot: 9800,
            transaction_id: transaction_id.to_string(),
            transacted_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_assigns_internal_id_and_returns_record() {
        let mut store = MemoryTransactionStore::new();

        let persisted = store.save(sample_transaction("tx-1"));

        assert_eq!(persisted.id, 1);
        assert_eq!(persisted.transaction_id, "tx-1");
    }

    #[test]
    fn test_find_by_transaction_id() {
        let mut store = MemoryTransactionStore::new();
        store.save(sample_transaction("tx-1"));

        let found = store.find_by_transaction_id("tx-1");
        assert!(found.is_some());
        assert_eq!(found.unwrap().amount, 200);

        assert!(store.find_by_transaction_id("missing").is_none());
    }

    #[test]
    fn test_records_are_ordered_by_insertion() {
        let mut store = MemoryTransactionStore::new();
        store.save(sample_transaction("tx-b"));
        store.save(sample_transaction("tx-a"));
        store.save(sample_transaction("tx-c"));

        let ids: Vec<&str> = store
            .records()
            .iter()
            .map(|record| record.transaction_id.as_str())
            .collect();

        assert_eq!(ids, vec!["tx-b", "tx-a", "tx-c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_failed_records_are_kept_alongside_successes() {
        let mut store = MemoryTransactionStore::new();
        store.save(sample_transaction("tx-ok"));

        let mut failed = sample_transaction("tx-fail");
        failed.result = TransactionResult::Fail;
        failed.balance_snapshot = 10000;
        store.save(failed);

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.find_by_transaction_id("tx-fail").unwrap().result,
            TransactionResult::Fail
        );
    }
}
