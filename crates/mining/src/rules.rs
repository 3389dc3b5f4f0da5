//! Association rule generation from frequent itemsets.
//!
//! For every frequent itemset of size >= 2, every partition into a non-empty
//! antecedent and non-empty consequent is a candidate rule. An itemset of
//! size k has 2^k - 2 such splits; that is exponential in k, but k is bounded
//! by the item vocabulary (typically < 20 genre labels), so full enumeration
//! is both affordable and required — shortcuts that skip splits change the
//! result set.
//!
//! All supports come from the recorded mining output; the matrix is never
//! re-scanned here.

use crate::error::{MiningError, Result, check_fraction};
use crate::itemset::{FrequentItemsets, Itemset};
use crate::matrix::ItemId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A directional rule: antecedent -> consequent.
///
/// Antecedent and consequent are disjoint, non-empty, and their union is a
/// frequent itemset. `support` is the support of that union;
/// `confidence = support(union) / support(antecedent)`;
/// `lift = confidence / support(consequent)`. Lift of 1 means statistical
/// independence, above 1 a positive association, below 1 a negative one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl AssociationRule {
    /// True if `item` appears in the antecedent
    pub fn antecedent_contains(&self, item: ItemId) -> bool {
        self.antecedent.contains(item)
    }

    /// Human-readable "A, B -> C" label against the item vocabulary
    pub fn label(&self, names: &[String]) -> String {
        format!(
            "{} -> {}",
            self.antecedent.label(names),
            self.consequent.label(names)
        )
    }

    /// Value of one scoring metric, for generic sorting
    pub fn metric(&self, metric: RuleMetric) -> f64 {
        match metric {
            RuleMetric::Support => self.support,
            RuleMetric::Confidence => self.confidence,
            RuleMetric::Lift => self.lift,
        }
    }
}

/// Numeric fields a rule collection can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMetric {
    Support,
    Confidence,
    Lift,
}

/// Sort rules by a metric, descending. Ties keep their relative order.
pub fn sort_descending(rules: &mut [AssociationRule], metric: RuleMetric) {
    rules.sort_by(|a, b| {
        b.metric(metric)
            .partial_cmp(&a.metric(metric))
            .expect("rule metrics are never NaN")
    });
}

/// Derive all rules with confidence >= `min_confidence`.
///
/// `frequent` must be a complete mining result including the size-1 itemsets:
/// their supports are the confidence denominators and the lift normalizers.
/// Lift is always computed and attached; it is informational, never a filter
/// here.
///
/// # Errors
/// * `InvalidParameter` if `min_confidence` is outside (0, 1].
/// * `InvariantViolation` if an antecedent or consequent of a frequent
///   itemset has no recorded support, or a recorded support of zero. By
///   anti-monotonicity both are frequent with support >= min_support > 0, so
///   either case is a logic defect in the supplied collection — surfaced
///   loudly rather than turned into a silent NaN.
#[instrument(skip(frequent), fields(itemsets = frequent.len()))]
pub fn generate(
    frequent: &FrequentItemsets,
    min_confidence: f64,
) -> Result<Vec<AssociationRule>> {
    check_fraction("min_confidence", min_confidence)?;

    let mut rules = Vec::new();
    for entry in frequent.iter().filter(|e| e.items.len() >= 2) {
        for (antecedent, consequent) in splits(&entry.items) {
            let antecedent_support = lookup_support(frequent, &antecedent, "antecedent")?;
            let consequent_support = lookup_support(frequent, &consequent, "consequent")?;

            let confidence = entry.support / antecedent_support;
            let lift = confidence / consequent_support;
            if confidence >= min_confidence {
                rules.push(AssociationRule {
                    antecedent,
                    consequent,
                    support: entry.support,
                    confidence,
                    lift,
                });
            }
        }
    }

    debug!(rules = rules.len(), "rule generation complete");
    Ok(rules)
}

fn lookup_support(
    frequent: &FrequentItemsets,
    itemset: &Itemset,
    role: &str,
) -> Result<f64> {
    let support = frequent.support_of(itemset).ok_or_else(|| {
        MiningError::InvariantViolation(format!(
            "no recorded support for {} {:?}",
            role,
            itemset.items()
        ))
    })?;
    if support <= 0.0 {
        return Err(MiningError::InvariantViolation(format!(
            "{} {:?} has support {}; frequent itemsets must have positive support",
            role,
            itemset.items(),
            support
        )));
    }
    Ok(support)
}

/// Enumerate every (antecedent, consequent) partition of an itemset.
///
/// Bitmask enumeration over the members: mask bits select the antecedent,
/// the complement is the consequent. Masks 0 and 2^k - 1 are skipped (empty
/// antecedent or empty consequent).
fn splits(itemset: &Itemset) -> Vec<(Itemset, Itemset)> {
    let items = itemset.items();
    let k = items.len();
    debug_assert!(k >= 2 && k < 64);

    let mut out = Vec::with_capacity((1usize << k) - 2);
    for mask in 1..((1u64 << k) - 1) {
        let mut antecedent = Vec::new();
        let mut consequent = Vec::new();
        for (idx, &item) in items.iter().enumerate() {
            if mask & (1 << idx) != 0 {
                antecedent.push(item);
            } else {
                consequent.push(item);
            }
        }
        out.push((Itemset::new(antecedent), Itemset::new(consequent)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apriori::mine;
    use crate::matrix::PresenceMatrix;

    fn itemset(items: &[ItemId]) -> Itemset {
        Itemset::new(items.to_vec())
    }

    /// The worked example: 4 movies over {Comedy, Drama, Action}
    fn example_matrix() -> PresenceMatrix {
        PresenceMatrix::from_rows(
            vec![
                "Comedy".to_string(),
                "Drama".to_string(),
                "Action".to_string(),
            ],
            &[vec![0, 1], vec![0], vec![1, 2], vec![0, 1, 2]],
        )
    }

    #[test]
    fn test_splits_count() {
        assert_eq!(splits(&itemset(&[0, 1])).len(), 2);
        assert_eq!(splits(&itemset(&[0, 1, 2])).len(), 6);
        assert_eq!(splits(&itemset(&[0, 1, 2, 3])).len(), 14);
    }

    #[test]
    fn test_splits_are_disjoint_partitions() {
        let parent = itemset(&[0, 1, 2]);
        for (antecedent, consequent) in splits(&parent) {
            assert!(!antecedent.is_empty());
            assert!(!consequent.is_empty());
            let union: Itemset = antecedent
                .items()
                .iter()
                .chain(consequent.items())
                .copied()
                .collect();
            assert_eq!(union, parent);
            assert_eq!(antecedent.len() + consequent.len(), parent.len());
        }
    }

    #[test]
    fn test_generate_worked_example() {
        let frequent = mine(&example_matrix(), 0.5).unwrap();
        let rules = generate(&frequent, 0.6).unwrap();

        // Frequent pairs are {Comedy, Drama} and {Drama, Action}, both at
        // support 0.5; every direction clears confidence 0.6
        assert_eq!(rules.len(), 4);

        let find = |ant: &[ItemId], con: &[ItemId]| {
            rules
                .iter()
                .find(|r| r.antecedent == itemset(ant) && r.consequent == itemset(con))
                .expect("expected rule missing")
        };

        // Comedy -> Drama: confidence 0.5 / 0.75 = 2/3, lift (2/3) / 0.75 = 8/9
        let comedy_drama = find(&[0], &[1]);
        assert_eq!(comedy_drama.support, 0.5);
        assert!((comedy_drama.confidence - 2.0 / 3.0).abs() < 1e-12);
        assert!((comedy_drama.lift - 8.0 / 9.0).abs() < 1e-12);

        // Drama -> Comedy: same confidence, same (symmetric) lift
        let drama_comedy = find(&[1], &[0]);
        assert!((drama_comedy.confidence - 2.0 / 3.0).abs() < 1e-12);
        assert!((drama_comedy.lift - 8.0 / 9.0).abs() < 1e-12);

        // Action -> Drama: confidence 0.5 / 0.5 = 1, lift 1 / 0.75 = 4/3
        let action_drama = find(&[2], &[1]);
        assert_eq!(action_drama.confidence, 1.0);
        assert!((action_drama.lift - 4.0 / 3.0).abs() < 1e-12);

        // Drama -> Action: confidence 2/3, lift symmetric with the reverse
        let drama_action = find(&[1], &[2]);
        assert!((drama_action.confidence - 2.0 / 3.0).abs() < 1e-12);
        assert!((drama_action.lift - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_generate_filters_by_confidence() {
        let frequent = mine(&example_matrix(), 0.5).unwrap();
        // At 0.7 only Action -> Drama (confidence 1.0) survives
        let rules = generate(&frequent, 0.7).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].antecedent, itemset(&[2]));
        assert_eq!(rules[0].consequent, itemset(&[1]));
    }

    #[test]
    fn test_generate_rejects_invalid_confidence() {
        let frequent = mine(&example_matrix(), 0.5).unwrap();
        assert!(matches!(
            generate(&frequent, 0.0),
            Err(MiningError::InvalidParameter { .. })
        ));
        assert!(matches!(
            generate(&frequent, 2.0),
            Err(MiningError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_generate_detects_missing_antecedent_support() {
        // A hand-built collection missing its size-1 entries is a contract
        // violation and must fail loudly, not produce NaN metrics.
        let mut broken = FrequentItemsets::new(4);
        broken.insert(itemset(&[0, 1]), 0.5);
        assert!(matches!(
            generate(&broken, 0.5),
            Err(MiningError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_generate_detects_zero_support() {
        let mut broken = FrequentItemsets::new(4);
        broken.insert(itemset(&[0]), 0.0);
        broken.insert(itemset(&[1]), 0.5);
        broken.insert(itemset(&[0, 1]), 0.5);
        assert!(matches!(
            generate(&broken, 0.5),
            Err(MiningError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_sort_descending() {
        let frequent = mine(&example_matrix(), 0.25).unwrap();
        let mut rules = generate(&frequent, 0.1).unwrap();
        assert!(rules.len() > 2);

        sort_descending(&mut rules, RuleMetric::Lift);
        for pair in rules.windows(2) {
            assert!(pair[0].lift >= pair[1].lift);
        }

        sort_descending(&mut rules, RuleMetric::Confidence);
        for pair in rules.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_antecedent_filter_and_label() {
        let matrix = example_matrix();
        let frequent = mine(&matrix, 0.5).unwrap();
        let rules = generate(&frequent, 0.6).unwrap();

        let comedy = matrix.item_id("Comedy").unwrap();
        let from_comedy: Vec<_> = rules
            .iter()
            .filter(|r| r.antecedent_contains(comedy))
            .collect();
        assert_eq!(from_comedy.len(), 1);
        assert_eq!(from_comedy[0].label(matrix.items()), "Comedy -> Drama");
    }
}
