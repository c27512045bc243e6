pub mod itemset;
pub mod storage;

pub use itemset::Itemset;
pub use storage::{FrequentItemsets, FrequentLevel};
