pub mod builder;
pub mod combinations;
pub mod mining;
pub mod pool;
pub mod tree;

pub use builder::{build_fp_tree, build_into};
pub use mining::{fp_growth_algorithm, fp_growth_recursive, MiningContext};
pub use pool::TreePool;
pub use tree::{FPNode, FPTree, HeaderEntry, HeaderTable};
