//! Level-wise (Apriori) frequent itemset miner.
//!
//! ## Algorithm
//! 1. Level 1: support of every single item from the column popcounts; keep
//!    those at or above `min_support`.
//! 2. Level k: join frequent (k-1)-itemsets sharing a (k-2)-prefix into
//!    k-candidates, then prune any candidate with an infrequent (k-1)-subset
//!    (anti-monotonicity: a superset of an infrequent set cannot be frequent,
//!    so its support is never computed).
//! 3. Count support for the surviving candidates against the matrix; keep
//!    those at or above the threshold.
//! 4. Stop when a level yields nothing, or k exceeds the item count.
//!
//! Support counting within a level is independent across candidates, so step 3
//! is a rayon data-parallel map over the candidates with read-only access to
//! the matrix.

use crate::error::{MiningError, Result, check_fraction};
use crate::itemset::{FrequentItemsets, Itemset};
use crate::matrix::PresenceMatrix;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Mine all itemsets with support >= `min_support` from the matrix.
///
/// The returned collection is complete (every itemset meeting the threshold
/// is present, at every size level) and contains nothing below the threshold.
/// There is no ordering guarantee among itemsets of the same size; consumers
/// sort by whatever key they need.
///
/// # Errors
/// * `InvalidParameter` if `min_support` is outside (0, 1]. A threshold of
///   zero would make every subset of observed items frequent, which is
///   combinatorially intractable and always a caller mistake.
/// * `EmptyInput` if the matrix has no item columns.
///
/// A matrix with zero transactions is not an error: support is undefined
/// there, and the miner returns an empty collection.
#[instrument(skip(matrix), fields(transactions = matrix.transactions(), items = matrix.item_count()))]
pub fn mine(matrix: &PresenceMatrix, min_support: f64) -> Result<FrequentItemsets> {
    check_fraction("min_support", min_support)?;
    if matrix.item_count() == 0 {
        return Err(MiningError::EmptyInput);
    }

    let mut collection = FrequentItemsets::new(matrix.transactions());
    if matrix.transactions() == 0 {
        warn!("presence matrix has no transactions; returning an empty collection");
        return Ok(collection);
    }
    let total = matrix.transactions() as f64;

    // Level 1: one popcount per column
    let mut frontier: Vec<Itemset> = Vec::new();
    for (item, count) in matrix.column_counts().into_iter().enumerate() {
        let support = count as f64 / total;
        if support >= min_support {
            let itemset = Itemset::new(vec![item as u32]);
            collection.insert(itemset.clone(), support);
            frontier.push(itemset);
        }
    }
    debug!(level = 1, frequent = frontier.len(), "level complete");

    // Levels k >= 2
    let mut size = 2;
    while !frontier.is_empty() && size <= matrix.item_count() {
        let candidates = prune(join(&frontier), &frontier);
        debug!(level = size, candidates = candidates.len(), "scoring candidates");

        let frequent: Vec<(Itemset, f64)> = candidates
            .into_par_iter()
            .filter_map(|candidate| {
                let support = matrix.support_count(candidate.items()) as f64 / total;
                (support >= min_support).then_some((candidate, support))
            })
            .collect();

        debug!(level = size, frequent = frequent.len(), "level complete");
        frontier = frequent.iter().map(|(itemset, _)| itemset.clone()).collect();
        for (itemset, support) in frequent {
            collection.insert(itemset, support);
        }
        size += 1;
    }

    debug!(itemsets = collection.len(), "mining complete");
    Ok(collection)
}

/// Join step: combine frequent (k-1)-itemsets that share their first k-2
/// items into candidate k-itemsets.
///
/// Each candidate is generated exactly once, from the pair whose last items
/// are the candidate's two largest.
fn join(frequent: &[Itemset]) -> Vec<Itemset> {
    let mut sorted: Vec<&Itemset> = frequent.iter().collect();
    sorted.sort();

    let mut candidates = Vec::new();
    for i in 0..sorted.len() {
        let a = sorted[i].items();
        let prefix = &a[..a.len() - 1];
        for b in &sorted[i + 1..] {
            let b = b.items();
            // Lexicographic order: once the prefix diverges it stays diverged
            if &b[..b.len() - 1] != prefix {
                break;
            }
            let mut joined = a.to_vec();
            joined.push(b[b.len() - 1]);
            candidates.push(Itemset::new(joined));
        }
    }
    candidates
}

/// Prune step: drop candidates with any (k-1)-subset missing from the
/// frequent (k-1) level.
fn prune(candidates: Vec<Itemset>, frequent: &[Itemset]) -> Vec<Itemset> {
    let known: HashSet<&Itemset> = frequent.iter().collect();
    candidates
        .into_iter()
        .filter(|candidate| {
            (0..candidate.len()).all(|skip| {
                let subset: Itemset = candidate
                    .items()
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != skip)
                    .map(|(_, &item)| item)
                    .collect();
                known.contains(&subset)
            })
        })
        .collect()
}
