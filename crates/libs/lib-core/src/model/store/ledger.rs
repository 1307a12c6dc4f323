//! Balance ledger: a single JSON document `{ "<SYMBOL>": <amount> }` under one
//! storage key.
//!
//! The orchestrator is the only writer. Each merge is an unlocked
//! read-modify-write of the whole document, so two tabs settling at the same
//! moment can lose one update (last writer wins).

use super::KeyValueStore;
use crate::error::StorageError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::LedgerDocument;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub type Balances = BTreeMap<String, Decimal>;

pub struct BalanceLedger<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> BalanceLedger<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current balances. Absent, unreadable or malformed data reads as empty;
    /// negative or unrepresentable entries are left out.
    pub fn load(&self) -> Balances {
        self.read_document()
            .iter()
            .filter_map(|(symbol, amount)| {
                let amount = Decimal::try_from(amount).ok()?;
                (amount >= Decimal::ZERO).then(|| (symbol.to_string(), amount))
            })
            .collect()
    }

    /// Balance of one symbol, zero when absent.
    pub fn balance_of(&self, symbol: &str) -> Decimal {
        self.load().get(symbol).copied().unwrap_or(Decimal::ZERO)
    }

    /// Add `delta` to `symbol` and persist the document. Only `symbol` is
    /// rewritten; every other stored entry is kept as found. Balances never
    /// drop below zero. Returns the new balance.
    pub fn merge(&self, symbol: &str, delta: Decimal) -> Result<Decimal, StorageError> {
        let mut document = self.read_document();
        let current = document.get(symbol).map(stored_amount).unwrap_or(Decimal::ZERO);
        let updated = current
            .checked_add(delta)
            .unwrap_or(Decimal::MAX)
            .max(Decimal::ZERO);
        document.insert(symbol, updated.to_f64().unwrap_or(0.0));

        let raw = document
            .to_json()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        self.store.set(&self.key, &raw)?;

        debug!(%symbol, %delta, balance = %updated, "Ledger updated");
        Ok(updated)
    }

    fn read_document(&self) -> LedgerDocument {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LedgerDocument::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Ledger read failed, treating as empty");
                return LedgerDocument::new();
            }
        };

        LedgerDocument::from_json(&raw).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Ledger document is malformed, treating as empty");
            LedgerDocument::new()
        })
    }
}

/// Stored amount as a starting balance: negatives count as zero, values past
/// the decimal range saturate.
fn stored_amount(amount: f64) -> Decimal {
    match Decimal::try_from(amount) {
        Ok(amount) => amount.max(Decimal::ZERO),
        Err(_) if amount > 0.0 => Decimal::MAX,
        Err(_) => Decimal::ZERO,
    }
}
