use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted token balances keyed by symbol.
///
/// Serializes as a bare JSON object (`{"USDC": 7.0}`). There is no version
/// field; readers treat anything that does not parse as an empty document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerDocument(BTreeMap<String, f64>);

impl LedgerDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.0.get(symbol).copied()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, amount: f64) {
        self.0.insert(symbol.into(), amount);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for LedgerDocument {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
