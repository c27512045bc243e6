use super::builder::build_into;
use super::combinations::emit_path_combinations;
use super::pool::TreePool;
use super::tree::FPTree;
use crate::config::MiningConfig;
use crate::error::{MiningError, Result};
use crate::fp::encoder::{EncodedDatabase, ItemId};
use crate::fp::utils::{FrequentItemsets, Itemset};
use std::time::{Duration, Instant};

/// State shared by every level of one mining run.
pub struct MiningContext {
    pub min_count: usize,
    pub max_len: Option<usize>,
    deadline: Option<(Instant, Duration)>,
    pub pool: TreePool,
}

impl MiningContext {
    pub fn new(min_count: usize, config: &MiningConfig) -> Self {
        Self {
            min_count,
            max_len: config.max_itemset_len,
            // A limit too large to represent as an instant never expires.
            deadline: config
                .time_limit
                .and_then(|limit| Instant::now().checked_add(limit).map(|deadline| (deadline, limit))),
            pool: TreePool::new(),
        }
    }

    pub(crate) fn check_deadline(&self) -> Result<()> {
        match self.deadline {
            Some((deadline, limit)) if Instant::now() >= deadline => {
                log::warn!("fp-growth aborted after exceeding its {:?} time limit", limit);
                Err(MiningError::DeadlineExceeded { limit })
            }
            _ => Ok(()),
        }
    }

    fn at_max_len(&self, len: usize) -> bool {
        self.max_len.is_some_and(|max| len >= max)
    }
}

/// Mines every frequent itemset of an encoded database.
pub fn fp_growth_algorithm(db: &EncodedDatabase, config: &MiningConfig) -> Result<FrequentItemsets<ItemId>> {
    config.validate()?;
    let num_transactions = db.num_transactions();
    let min_count = config.min_support.min_count(num_transactions);
    let mut ctx = MiningContext::new(min_count, config);
    let mut frequent = FrequentItemsets::new(num_transactions);

    let mut fp_tree = ctx.pool.acquire();
    if !build_into(&mut fp_tree, db, min_count) {
        log::debug!(
            "no item reaches the minimum support of {} over {} transactions",
            min_count,
            num_transactions
        );
        return Ok(frequent);
    }
    log::debug!(
        "fp-tree built: {} frequent items, {} nodes, min count {}",
        fp_tree.header.len(),
        fp_tree.node_count(),
        min_count
    );

    let mined = fp_growth_recursive(&fp_tree, &Itemset::empty(), &mut ctx);
    ctx.pool.release(fp_tree);
    frequent.merge(mined?);

    log::debug!(
        "fp-growth found {} frequent itemsets (longest {}), {} trees allocated",
        frequent.len(),
        frequent.max_itemset_len(),
        ctx.pool.created()
    );
    Ok(frequent)
}

/// Mines `fp_tree`, whose itemsets all extend `alpha`, and returns what it
/// found for the caller to fold into its own result.
pub fn fp_growth_recursive(
    fp_tree: &FPTree,
    alpha: &Itemset<ItemId>,
    ctx: &mut MiningContext,
) -> Result<FrequentItemsets<ItemId>> {
    ctx.check_deadline()?;
    let mut found = FrequentItemsets::new(0);

    if fp_tree.header.is_empty() {
        return Ok(found);
    }

    if let Some(path) = fp_tree.single_path() {
        emit_path_combinations(&path, alpha, ctx, &mut found)?;
        return Ok(found);
    }

    // Least frequent items first; their conditional trees are the smallest.
    for (item, entry) in fp_tree.header.iter().rev() {
        let new_pattern = alpha.with_item(item);
        found.insert(new_pattern.clone(), entry.support);

        if ctx.at_max_len(new_pattern.len()) {
            continue;
        }

        let prefix_paths = fp_tree.conditional_pattern_base(item);
        if prefix_paths.is_empty() {
            continue;
        }

        let mut cond_tree = ctx.pool.acquire();
        if build_into(&mut cond_tree, &prefix_paths, ctx.min_count) {
            log::trace!(
                "conditional tree for {:?}: {} items, {} nodes",
                new_pattern.as_slice(),
                cond_tree.header.len(),
                cond_tree.node_count()
            );
            let mined = fp_growth_recursive(&cond_tree, &new_pattern, ctx);
            ctx.pool.release(cond_tree);
            found.merge(mined?);
        } else {
            ctx.pool.release(cond_tree);
        }
    }

    Ok(found)
}
