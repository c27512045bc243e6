use super::mining::MiningContext;
use crate::error::Result;
use crate::fp::encoder::ItemId;
use crate::fp::utils::{FrequentItemsets, Itemset};

/// Combinations emitted between two deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 1 << 12;

/// Records every non-empty combination of a single-path tree's nodes,
/// each extended by `prefix`, as long as it fits within the context's
/// length cap.
///
/// Counts never grow going down a path, so a combination's support is the
/// count of its deepest node. A path of `n` nodes yields up to `2^n - 1`
/// itemsets, so the deadline is checked as they are emitted.
pub fn emit_path_combinations(
    path: &[(ItemId, usize)],
    prefix: &Itemset<ItemId>,
    ctx: &MiningContext,
    found: &mut FrequentItemsets<ItemId>,
) -> Result<()> {
    let room = ctx
        .max_len
        .map_or(path.len(), |max| max.saturating_sub(prefix.len()).min(path.len()));

    let mut emitter = PathEmitter { path, prefix, ctx, found, emitted: 0 };
    let mut chosen = Vec::with_capacity(room);
    for size in 1..=room {
        ctx.check_deadline()?;
        emitter.extend(size, 0, &mut chosen)?;
    }
    Ok(())
}

struct PathEmitter<'a> {
    path: &'a [(ItemId, usize)],
    prefix: &'a Itemset<ItemId>,
    ctx: &'a MiningContext,
    found: &'a mut FrequentItemsets<ItemId>,
    emitted: usize,
}

impl PathEmitter<'_> {
    /// Grows `chosen` (increasing path positions) to `size` positions
    /// starting at `start`, recording each completed combination.
    fn extend(&mut self, size: usize, start: usize, chosen: &mut Vec<usize>) -> Result<()> {
        if chosen.len() == size {
            return self.record(chosen);
        }

        // Leave enough positions after `i` to fill the remaining slots.
        let last_start = self.path.len() + chosen.len() + 1 - size;
        for i in start..last_start {
            chosen.push(i);
            let extended = self.extend(size, i + 1, chosen);
            chosen.pop();
            extended?;
        }
        Ok(())
    }

    fn record(&mut self, chosen: &[usize]) -> Result<()> {
        let support = match chosen.last() {
            Some(&deepest) => self.path[deepest].1,
            None => return Ok(()),
        };
        let mut pattern = self.prefix.to_vec();
        pattern.extend(chosen.iter().map(|&idx| self.path[idx].0));
        self.found.insert(Itemset::new(pattern), support);

        self.emitted += 1;
        if self.emitted % DEADLINE_CHECK_INTERVAL == 0 {
            self.ctx.check_deadline()?;
        }
        Ok(())
    }
}
