pub mod encoder;
pub mod growth;
pub mod utils;

#[cfg(test)]
mod tests;

pub use encoder::{encode_transactions, EncodedDatabase, ItemDictionary, ItemId, TransactionEncoder};
pub use growth::fp_growth_algorithm;
pub use growth::{FPNode, FPTree, HeaderTable, TreePool};
pub use utils::{FrequentItemsets, FrequentLevel, Itemset};
