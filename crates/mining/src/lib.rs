//! # Mining Crate
//!
//! Frequent itemset mining and association rule derivation over a boolean
//! presence matrix (movies x genres).
//!
//! ## Main Components
//!
//! - **matrix**: Column-wise bitset presence matrix
//! - **itemset**: Itemsets and the frequent itemset collection
//! - **apriori**: Level-wise miner with anti-monotone pruning
//! - **rules**: Antecedent -> consequent rules scored by support,
//!   confidence, and lift
//! - **error**: Error types for mining
//!
//! ## Example Usage
//!
//! ```
//! use mining::{PresenceMatrix, RuleMetric, generate, mine, sort_descending};
//!
//! let matrix = PresenceMatrix::from_rows(
//!     vec!["Comedy".into(), "Drama".into(), "Action".into()],
//!     &[vec![0, 1], vec![0], vec![1, 2], vec![0, 1, 2]],
//! );
//!
//! let frequent = mine(&matrix, 0.5)?;
//! let mut rules = generate(&frequent, 0.6)?;
//! sort_descending(&mut rules, RuleMetric::Lift);
//!
//! for rule in &rules {
//!     println!(
//!         "{}  support={:.4} confidence={:.2} lift={:.2}",
//!         rule.label(matrix.items()),
//!         rule.support,
//!         rule.confidence,
//!         rule.lift,
//!     );
//! }
//! # Ok::<(), mining::MiningError>(())
//! ```
//!
//! ## Design Note
//!
//! The pipeline is one-directional and stateless: matrix -> frequent itemsets
//! -> rules. Both `mine` and `generate` return fresh immutable values
//! parameterized by their thresholds; nothing is cached between calls, and
//! the caller threads results into whichever view needs them. Itemsets carry
//! structured ids throughout — display labels are derived at the edge and
//! never parsed back into sets.

// Public modules
pub mod apriori;
pub mod error;
pub mod itemset;
pub mod matrix;
pub mod rules;

// Re-export commonly used types for convenience
pub use apriori::mine;
pub use error::{MiningError, Result};
pub use itemset::{FrequentItemset, FrequentItemsets, Itemset};
pub use matrix::{ItemId, PresenceMatrix};
pub use rules::{AssociationRule, RuleMetric, generate, sort_descending};
