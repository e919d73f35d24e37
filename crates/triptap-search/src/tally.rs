//! Outbound API call accounting.

use std::collections::BTreeMap;

use serde::Serialize;

/// Billing quota an API call draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallCategory {
    /// Places API (new): text search and nearby search.
    Places,
    /// Legacy Maps Places endpoints, such as details by id.
    Maps,
}

impl std::fmt::Display for CallCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallCategory::Places => write!(f, "places"),
            CallCategory::Maps => write!(f, "maps"),
        }
    }
}

/// Number of attempted calls per [`CallCategory`].
///
/// Every attempt counts, whether or not it succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ApiCallTally(BTreeMap<CallCategory, u64>);

impl ApiCallTally {
    pub fn record(&mut self, category: CallCategory) {
        let count = self.0.entry(category).or_insert(0);
        *count = count.saturating_add(1);
    }

    #[must_use]
    pub fn get(&self, category: CallCategory) -> u64 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn merge(&mut self, other: &ApiCallTally) {
        for (category, n) in &other.0 {
            let count = self.0.entry(*category).or_insert(0);
            *count = count.saturating_add(*n);
        }
    }

    /// Sum across all categories.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CallCategory, u64)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}
