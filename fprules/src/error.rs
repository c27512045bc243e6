//! Error types for the mining engine.
//!
//! Mining is a pure in-memory computation, so everything reported here is
//! either a configuration problem detected before any work starts or an
//! internal invariant that did not hold.

use std::time::Duration;

/// Result type defaulting to [`MiningError`].
pub type Result<T, E = MiningError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MiningError {
    /// The minimum support does not select a positive transaction count.
    #[error("invalid minimum support: {0}")]
    InvalidMinSupport(String),

    /// The minimum confidence is not a number in `[0, 1]`.
    #[error("invalid minimum confidence {0}: expected a value in [0, 1]")]
    InvalidMinConfidence(f64),

    #[error("maximum itemset length must be at least 1")]
    InvalidMaxItemsetLen,

    /// Mining ran past the configured time limit.
    #[error("mining exceeded its time limit of {limit:?}")]
    DeadlineExceeded { limit: Duration },

    /// A subset of a frequent itemset has no recorded support.
    ///
    /// Frequent itemsets are closed under taking subsets, so this means the
    /// itemset collection handed to rule generation is corrupt.
    #[error("itemset {itemset} has no recorded support")]
    MissingSupport { itemset: String },

    /// A subset was recorded with a smaller support than one of its supersets.
    #[error("subset {subset} has support {subset_support}, below the {support} of its superset {itemset}")]
    InconsistentSupport {
        itemset: String,
        support: usize,
        subset: String,
        subset_support: usize,
    },
}
