use super::tree::FPTree;
use crate::fp::encoder::{EncodedDatabase, ItemId};
use indexmap::IndexMap;
use std::collections::HashMap;

/// First pass: support of every item, weighted by each itemset's count.
/// Items are listed in first-seen order.
pub fn count_item_supports(db: &EncodedDatabase) -> IndexMap<ItemId, usize> {
    let mut item_counts: IndexMap<ItemId, usize> = IndexMap::new();

    for (itemset, count) in db.iter() {
        for &item in itemset.iter() {
            *item_counts.entry(item).or_insert(0) += count;
        }
    }
    item_counts
}

/// Items reaching `min_count`, by descending support. Ties go to the lower
/// item id, i.e. the item seen first.
pub fn rank_frequent_items(item_counts: &IndexMap<ItemId, usize>, min_count: usize) -> Vec<(ItemId, usize)> {
    let mut frequent_items: Vec<(ItemId, usize)> = item_counts
        .iter()
        .filter(|&(_, &count)| count >= min_count)
        .map(|(&item, &count)| (item, count))
        .collect();

    frequent_items.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    frequent_items
}

/// Builds a fresh tree, or `None` if no item reaches `min_count`.
pub fn build_fp_tree(db: &EncodedDatabase, min_count: usize) -> Option<FPTree> {
    let mut fp_tree = FPTree::new();
    build_into(&mut fp_tree, db, min_count).then_some(fp_tree)
}

/// Clears `fp_tree` and rebuilds it from `db`. Returns `false`, leaving the
/// tree empty, if no item reaches `min_count`.
pub fn build_into(fp_tree: &mut FPTree, db: &EncodedDatabase, min_count: usize) -> bool {
    fp_tree.clear();

    let item_counts = count_item_supports(db);
    let frequent_items = rank_frequent_items(&item_counts, min_count);
    if frequent_items.is_empty() {
        return false;
    }

    let item_ranks: HashMap<ItemId, usize> = frequent_items
        .iter()
        .enumerate()
        .map(|(rank, &(item, _))| (item, rank))
        .collect();

    for &(item, _) in &frequent_items {
        fp_tree.header.reserve(item);
    }

    let mut filtered: Vec<(usize, ItemId)> = Vec::new();
    let mut ordered: Vec<ItemId> = Vec::new();
    for (itemset, count) in db.iter() {
        filtered.clear();
        filtered.extend(
            itemset
                .iter()
                .filter_map(|item| item_ranks.get(item).map(|&rank| (rank, *item))),
        );
        if filtered.is_empty() {
            continue;
        }

        filtered.sort_unstable();
        ordered.clear();
        ordered.extend(filtered.iter().map(|&(_, item)| item));
        fp_tree.insert_transaction(&ordered, count);
    }

    true
}
