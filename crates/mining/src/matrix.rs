//! Column-wise boolean presence matrix.
//!
//! The matrix records which items (genre labels) apply to which transactions
//! (movies). It is stored column-wise: one bitset per item, one bit per
//! transaction. Support counting for a candidate itemset is then a block-wise
//! AND across the item columns followed by a popcount, which keeps the
//! per-candidate scan cheap even for large catalogs.

use serde::{Deserialize, Serialize};

/// Index of an item (genre) column in the presence matrix
pub type ItemId = u32;

/// Bitset over transactions for a single item column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BitColumn {
    blocks: Vec<u64>,
}

impl BitColumn {
    fn set(&mut self, row: usize) {
        let block = row / 64;
        if block >= self.blocks.len() {
            self.blocks.resize(block + 1, 0);
        }
        self.blocks[block] |= 1 << (row % 64);
    }

    fn count_ones(&self) -> u64 {
        self.blocks.iter().map(|b| b.count_ones() as u64).sum()
    }
}

/// Boolean presence matrix: N transactions x M items.
///
/// Rows are transactions (movies), columns are items (genres). A row may be
/// all-zero (a movie with no listed genre); such rows never satisfy any
/// non-empty itemset and simply lower every support fraction.
///
/// ## Usage
/// ```
/// use mining::PresenceMatrix;
///
/// let mut matrix = PresenceMatrix::new(vec![
///     "Action".to_string(),
///     "Comedy".to_string(),
///     "Drama".to_string(),
/// ]);
/// matrix.push_row(&[1, 2]); // Comedy, Drama
/// matrix.push_row(&[1]);    // Comedy
///
/// assert_eq!(matrix.transactions(), 2);
/// assert_eq!(matrix.support(&[1]), 1.0);
/// assert_eq!(matrix.support(&[1, 2]), 0.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceMatrix {
    /// Item labels, indexed by ItemId
    items: Vec<String>,
    /// One bit column per item, in item order
    columns: Vec<BitColumn>,
    /// Number of transactions (rows) pushed so far
    rows: usize,
}

impl PresenceMatrix {
    /// Create an empty matrix with the given item vocabulary.
    ///
    /// Item labels are expected to be distinct; `ItemId`s are their indices.
    pub fn new(items: Vec<String>) -> Self {
        let columns = vec![BitColumn::default(); items.len()];
        Self {
            items,
            columns,
            rows: 0,
        }
    }

    /// Build a matrix directly from per-transaction item lists.
    ///
    /// Mostly useful in tests and small synthetic scenarios.
    pub fn from_rows(items: Vec<String>, rows: &[Vec<ItemId>]) -> Self {
        let mut matrix = Self::new(items);
        for row in rows {
            matrix.push_row(row);
        }
        matrix
    }

    /// Append one transaction, given the items present in it.
    ///
    /// Duplicate ids within a row are harmless (the bit is set once).
    ///
    /// # Panics
    /// Panics if an id is outside the item vocabulary.
    pub fn push_row(&mut self, present: &[ItemId]) {
        for &item in present {
            assert!(
                (item as usize) < self.columns.len(),
                "item id {} out of range (matrix has {} items)",
                item,
                self.columns.len()
            );
            self.columns[item as usize].set(self.rows);
        }
        self.rows += 1;
    }

    /// Number of transactions (rows)
    pub fn transactions(&self) -> usize {
        self.rows
    }

    /// Number of items (columns)
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Item labels, indexed by `ItemId`
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Label of a single item, if the id is in range
    pub fn item_name(&self, item: ItemId) -> Option<&str> {
        self.items.get(item as usize).map(|s| s.as_str())
    }

    /// Resolve an item label to its id
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.items.iter().position(|n| n == name).map(|i| i as ItemId)
    }

    /// Count transactions containing every item in `items`.
    ///
    /// The empty itemset is contained in every transaction, so an empty slice
    /// returns the full transaction count.
    pub fn support_count(&self, items: &[ItemId]) -> u64 {
        let mut iter = items.iter();
        let first = match iter.next() {
            Some(&item) => &self.columns[item as usize],
            None => return self.rows as u64,
        };
        let mut acc = first.blocks.clone();
        for &item in iter {
            let column = &self.columns[item as usize];
            // Missing trailing blocks are all-zero, so the AND truncates.
            if column.blocks.len() < acc.len() {
                acc.truncate(column.blocks.len());
            }
            for (a, b) in acc.iter_mut().zip(column.blocks.iter()) {
                *a &= *b;
            }
        }
        acc.iter().map(|b| b.count_ones() as u64).sum()
    }

    /// Support fraction of an itemset: containing transactions / total.
    ///
    /// Returns 0.0 for a matrix with no transactions (the miner treats that
    /// case as "support undefined" and never gets this far).
    pub fn support(&self, items: &[ItemId]) -> f64 {
        if self.rows == 0 {
            return 0.0;
        }
        self.support_count(items) as f64 / self.rows as f64
    }

    /// Per-item support counts for all columns (level-1 scan)
    pub(crate) fn column_counts(&self) -> Vec<u64> {
        self.columns.iter().map(|c| c.count_ones()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = PresenceMatrix::new(names(&["A", "B"]));
        assert_eq!(matrix.transactions(), 0);
        assert_eq!(matrix.item_count(), 2);
        assert_eq!(matrix.support_count(&[0]), 0);
        assert_eq!(matrix.support(&[0]), 0.0);
    }

    #[test]
    fn test_support_counting() {
        let matrix = PresenceMatrix::from_rows(
            names(&["Comedy", "Drama", "Action"]),
            &[vec![0, 1], vec![0], vec![1, 2], vec![0, 1, 2]],
        );

        assert_eq!(matrix.transactions(), 4);
        assert_eq!(matrix.support_count(&[0]), 3);
        assert_eq!(matrix.support_count(&[1]), 3);
        assert_eq!(matrix.support_count(&[2]), 2);
        assert_eq!(matrix.support_count(&[0, 1]), 2);
        assert_eq!(matrix.support_count(&[0, 2]), 1);
        assert_eq!(matrix.support_count(&[0, 1, 2]), 1);
    }

    #[test]
    fn test_empty_itemset_has_full_support() {
        let matrix =
            PresenceMatrix::from_rows(names(&["A", "B"]), &[vec![0], vec![1], vec![]]);
        assert_eq!(matrix.support_count(&[]), 3);
        assert_eq!(matrix.support(&[]), 1.0);
    }

    #[test]
    fn test_all_zero_rows_are_tolerated() {
        let matrix =
            PresenceMatrix::from_rows(names(&["A"]), &[vec![], vec![0], vec![]]);
        assert_eq!(matrix.transactions(), 3);
        assert_eq!(matrix.support_count(&[0]), 1);
    }

    #[test]
    fn test_more_than_64_rows() {
        // Crosses the block boundary of the bitset
        let mut matrix = PresenceMatrix::new(names(&["A", "B"]));
        for i in 0..130 {
            if i % 2 == 0 {
                matrix.push_row(&[0, 1]);
            } else {
                matrix.push_row(&[0]);
            }
        }
        assert_eq!(matrix.support_count(&[0]), 130);
        assert_eq!(matrix.support_count(&[1]), 65);
        assert_eq!(matrix.support_count(&[0, 1]), 65);
    }

    #[test]
    fn test_item_lookup() {
        let matrix = PresenceMatrix::new(names(&["Action", "Comedy"]));
        assert_eq!(matrix.item_id("Comedy"), Some(1));
        assert_eq!(matrix.item_id("Western"), None);
        assert_eq!(matrix.item_name(0), Some("Action"));
        assert_eq!(matrix.item_name(7), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_item_panics() {
        let mut matrix = PresenceMatrix::new(names(&["A"]));
        matrix.push_row(&[3]);
    }
}
