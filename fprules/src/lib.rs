//! Frequent itemset mining with FP-growth, plus association rules.
//!
//! Transactions are tallied into distinct itemsets, compressed into a
//! prefix-sharing tree and mined recursively through conditional trees.
//! The resulting itemsets feed a rule generator that keeps every rule above
//! a confidence threshold.
//!
//! ```
//! use fprules::{fp_growth, MiningConfig};
//!
//! let transactions = vec![
//!     vec!["bread", "milk"],
//!     vec!["bread", "butter", "milk"],
//!     vec!["bread", "butter"],
//! ];
//! let outcome = fp_growth(transactions, &MiningConfig::new(2, 0.6)).unwrap();
//! assert_eq!(outcome.frequent_itemsets.support_of(&["bread", "milk"]), Some(2));
//! assert!(!outcome.rules.is_empty());
//! ```

use std::fmt::Debug;
use std::hash::Hash;

pub mod config;
pub mod error;
pub mod fp;
pub mod rules;


pub use config::{MiningConfig, SupportThreshold};
pub use error::{MiningError, Result};
pub use fp::{encode_transactions, FrequentItemsets, FrequentLevel, Itemset};
pub use rules::{generate_rules, AssociationRule};

/// Anything usable as a transaction item.
pub trait Item: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Ord + Debug + Send + Sync> Item for T {}

/// Frequent itemsets together with the rules derived from them.
#[derive(Debug, Clone)]
pub struct MiningOutcome<T> {
    pub frequent_itemsets: FrequentItemsets<T>,
    pub rules: Vec<AssociationRule<T>>,
}

/// Finds every itemset whose support reaches `config.min_support`.
pub fn mine_frequent_itemsets<T, I, Tx>(transactions: I, config: &MiningConfig) -> Result<FrequentItemsets<T>>
where
    T: Item,
    I: IntoIterator<Item = Tx>,
    Tx: IntoIterator<Item = T>,
{
    config.validate()?;
    let (dictionary, db) = encode_transactions(transactions);
    let frequent = fp::fp_growth_algorithm(&db, config)?;
    Ok(frequent.map_items(|&id| dictionary.resolve_id(id)))
}

/// Mines frequent itemsets, then derives the rules reaching
/// `config.min_confidence`.
pub fn fp_growth<T, I, Tx>(transactions: I, config: &MiningConfig) -> Result<MiningOutcome<T>>
where
    T: Item,
    I: IntoIterator<Item = Tx>,
    Tx: IntoIterator<Item = T>,
{
    let frequent_itemsets = mine_frequent_itemsets(transactions, config)?;
    let rules = generate_rules(&frequent_itemsets, config.min_confidence)?;
    Ok(MiningOutcome { frequent_itemsets, rules })
}
