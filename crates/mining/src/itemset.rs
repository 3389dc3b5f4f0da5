//! Itemsets and the frequent itemset collection.
//!
//! An `Itemset` is an ordered, deduplicated sequence of item ids, so equality
//! and hashing are well-defined and cheap regardless of how the caller
//! assembled it. Display labels are always derived from the structured set
//! and never parsed back into one.

use crate::matrix::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A set of distinct items, stored as a sorted vector of ids.
///
/// Equality is set equality: `Itemset::new(vec![2, 1])` equals
/// `Itemset::new(vec![1, 2, 2])`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Itemset(Vec<ItemId>);

impl Itemset {
    /// Create an itemset from item ids, sorting and deduplicating them.
    pub fn new(mut items: Vec<ItemId>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    /// The item ids, in ascending order
    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    /// Number of items in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the set has no items
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `item` is a member of the set
    pub fn contains(&self, item: ItemId) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// Human-readable label: comma-joined item names, alphabetical.
    ///
    /// `names` is the matrix's item vocabulary. Ids without a name (out of
    /// range) fall back to the raw id, which only happens if the caller mixes
    /// itemsets across vocabularies.
    pub fn label(&self, names: &[String]) -> String {
        let mut labels: Vec<String> = self
            .0
            .iter()
            .map(|&id| match names.get(id as usize) {
                Some(name) => name.clone(),
                None => id.to_string(),
            })
            .collect();
        labels.sort();
        labels.join(", ")
    }
}

impl From<Vec<ItemId>> for Itemset {
    fn from(items: Vec<ItemId>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<ItemId> for Itemset {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// An itemset paired with its support fraction in the mined matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    pub items: Itemset,
    /// Fraction of transactions containing every item in the set, in [0, 1]
    pub support: f64,
}

/// All frequent itemsets from one mining run, at every size level.
///
/// Keeps a support index keyed by itemset so that rule generation can look up
/// antecedent and consequent supports without re-scanning the matrix. That is
/// why size-1 and intermediate supports are retained rather than discarded.
#[derive(Debug, Clone, Default)]
pub struct FrequentItemsets {
    transactions: usize,
    entries: Vec<FrequentItemset>,
    index: HashMap<Itemset, f64>,
}

impl FrequentItemsets {
    /// Create an empty collection for a matrix with `transactions` rows
    pub(crate) fn new(transactions: usize) -> Self {
        Self {
            transactions,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Record one frequent itemset with its support
    pub(crate) fn insert(&mut self, items: Itemset, support: f64) {
        self.index.insert(items.clone(), support);
        self.entries.push(FrequentItemset { items, support });
    }

    /// Number of transactions in the matrix this collection was mined from
    pub fn transactions(&self) -> usize {
        self.transactions
    }

    /// Number of frequent itemsets found, across all size levels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no itemset met the support threshold
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All frequent itemsets, smallest size level first
    pub fn itemsets(&self) -> &[FrequentItemset] {
        &self.entries
    }

    /// Iterate over all frequent itemsets
    pub fn iter(&self) -> impl Iterator<Item = &FrequentItemset> {
        self.entries.iter()
    }

    /// Frequent itemsets of exactly `size` items
    pub fn of_size(&self, size: usize) -> impl Iterator<Item = &FrequentItemset> {
        self.entries.iter().filter(move |e| e.items.len() == size)
    }

    /// Largest itemset size found (0 for an empty collection)
    pub fn max_size(&self) -> usize {
        self.entries.iter().map(|e| e.items.len()).max().unwrap_or(0)
    }

    /// Recorded support of an itemset, if it is frequent
    pub fn support_of(&self, items: &Itemset) -> Option<f64> {
        self.index.get(items).copied()
    }
}

impl<'a> IntoIterator for &'a FrequentItemsets {
    type Item = &'a FrequentItemset;
    type IntoIter = std::slice::Iter<'a, FrequentItemset>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
