use super::growth::builder::{build_fp_tree, build_into, count_item_supports};
use super::growth::combinations::emit_path_combinations;
use super::growth::{fp_growth_recursive, MiningContext, TreePool};
use super::*;
use crate::config::MiningConfig;
use crate::error::MiningError;
use crate::tests::textbook_transactions;
use std::collections::HashSet;
use std::time::Duration;

fn db_of(entries: &[(&[ItemId], usize)]) -> EncodedDatabase {
    entries
        .iter()
        .map(|&(items, count)| (Itemset::new(items.to_vec()), count))
        .collect()
}

fn textbook_db() -> (ItemDictionary<&'static str>, EncodedDatabase) {
    encode_transactions(textbook_transactions())
}

#[test]
fn test_itemset_is_canonical() {
    let a = Itemset::new(vec![7, 2, 5, 2]);
    let b: Itemset<usize> = [5, 7, 2].into_iter().collect();

    assert_eq!(a.as_slice(), &[2, 5, 7]);
    assert_eq!(a, b);

    let mut seen = HashSet::new();
    seen.insert(a.clone());
    assert!(seen.contains(&b));

    assert_eq!(a.with_item(3).as_slice(), &[2, 3, 5, 7]);
    assert_eq!(a.without(&5).as_slice(), &[2, 7]);
    assert_eq!(a.difference(&Itemset::new(vec![2])).as_slice(), &[5, 7]);
    assert!(Itemset::new(vec![2, 7]).is_subset(&a));
}

#[test]
fn test_frequent_levels() {
    let mut frequent = FrequentItemsets::new(4);
    frequent.insert(Itemset::new(vec![1]), 3);
    frequent.insert(Itemset::new(vec![2]), 4);
    frequent.insert(Itemset::new(vec![2, 1]), 3);

    let levels = frequent.levels();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].itemset_size(), 1);
    assert_eq!(levels[0].len(), 2);
    // Highest support first within a level.
    assert_eq!(levels[0].get_itemset(0), &[2]);
    assert_eq!(levels[0].support(0), 4);

    let pairs: Vec<_> = levels[1].iter_itemsets().collect();
    assert_eq!(pairs, vec![(&[1, 2][..], 3)]);
    assert_eq!(frequent.support_of(&[2, 1]), Some(3));
    assert_eq!(frequent.max_itemset_len(), 2);
}

#[test]
fn test_encoder_tallies_repeated_transactions() {
    let (dictionary, db) = encode_transactions(vec![
        vec!["a", "b"],
        vec!["b", "a"],
        vec!["a"],
        vec!["b", "a", "a"],
    ]);

    assert_eq!(dictionary.id_of(&"a"), Some(0));
    assert_eq!(dictionary.id_of(&"b"), Some(1));
    assert_eq!(db.len(), 2);
    assert_eq!(db.count(&Itemset::new(vec![0, 1])), 3);
    assert_eq!(db.count(&Itemset::new(vec![0])), 1);
    assert_eq!(db.num_transactions(), 4);
}

#[test]
fn test_encoder_empty_input() {
    let (dictionary, db) = encode_transactions(Vec::<Vec<String>>::new());
    assert!(dictionary.is_empty());
    assert!(db.is_empty());
    assert_eq!(db.num_transactions(), 0);
}

#[test]
fn test_fp_tree_insert() {
    let mut tree = FPTree::new();

    tree.insert_transaction(&[1, 2, 3], 1);

    assert!(tree.nodes[0].children.contains_key(&1));
    assert_eq!(tree.chain(1).count(), 1);
    assert_eq!(tree.chain(2).count(), 1);
    assert_eq!(tree.chain(3).count(), 1);

    // Shares the [1, 2] prefix with the first insertion.
    tree.insert_transaction(&[1, 2, 4], 2);

    let node1_idx = tree.nodes[0].children[&1];
    assert_eq!(tree.nodes[node1_idx].count, 3);
    assert_eq!(tree.header.support(1), Some(3));
    assert_eq!(tree.header.support(4), Some(2));
    assert_eq!(tree.node_count(), 4);
}

#[test]
fn test_chain_appends_at_tail() {
    let mut tree = FPTree::new();
    tree.insert_transaction(&[1, 2], 1);
    tree.insert_transaction(&[3, 2], 2);
    tree.insert_transaction(&[4, 2], 4);

    let chain: Vec<usize> = tree.chain(2).collect();
    assert_eq!(chain.len(), 3);
    let counts: Vec<usize> = chain.iter().map(|&idx| tree.nodes[idx].count).collect();
    assert_eq!(counts, vec![1, 2, 4]);
    assert_eq!(tree.chain_count(2), 7);
    assert_eq!(tree.header.support(2), Some(7));
}

#[test]
fn test_fp_tree_prefix_paths() {
    let mut tree = FPTree::new();

    // root → 1 → 2 → 3
    //           └→ 4
    tree.insert_transaction(&[1, 2, 3], 1);
    tree.insert_transaction(&[1, 2, 4], 1);

    let base = tree.conditional_pattern_base(3);
    assert_eq!(base.len(), 1);
    assert_eq!(base.count(&Itemset::new(vec![1, 2])), 1);

    let base = tree.conditional_pattern_base(4);
    assert_eq!(base.count(&Itemset::new(vec![1, 2])), 1);

    // Direct children of the root have no prefix.
    assert!(tree.conditional_pattern_base(1).is_empty());
}

#[test]
fn test_conditional_base_sums_equal_prefixes() {
    let mut tree = FPTree::new();
    tree.insert_transaction(&[1, 2, 3], 2);
    tree.insert_transaction(&[2, 1, 3], 5);

    let base = tree.conditional_pattern_base(3);
    assert_eq!(base.len(), 1);
    assert_eq!(base.count(&Itemset::new(vec![1, 2])), 7);
}

#[test]
fn test_fp_tree_single_path() {
    let mut tree1 = FPTree::new();
    tree1.insert_transaction(&[1, 2, 3], 2);
    tree1.insert_transaction(&[1, 2], 1);

    let path = tree1.single_path().unwrap();
    assert_eq!(path, vec![(1, 3), (2, 3), (3, 2)]);

    let mut tree2 = FPTree::new();
    tree2.insert_transaction(&[1, 2], 1);
    tree2.insert_transaction(&[1, 3], 1);
    assert!(tree2.single_path().is_none());

    assert_eq!(FPTree::new().single_path(), Some(vec![]));
}

#[test]
fn test_build_conditional_tree() {
    let prefix_paths = db_of(&[(&[1, 2], 2), (&[1], 1)]);

    let cond_tree = build_fp_tree(&prefix_paths, 2).unwrap();

    assert_eq!(cond_tree.header.support(1), Some(3));
    assert_eq!(cond_tree.header.support(2), Some(2));
    assert_eq!(cond_tree.header.items().collect::<Vec<_>>(), vec![1, 2]);

    let cond_tree = build_fp_tree(&prefix_paths, 3).unwrap();
    assert!(!cond_tree.header.contains(2));
    assert_eq!(cond_tree.node_count(), 1);
}

#[test]
fn test_build_without_frequent_items() {
    let db = db_of(&[(&[1, 2], 1), (&[3], 1)]);
    assert!(build_fp_tree(&db, 2).is_none());
    assert!(build_fp_tree(&EncodedDatabase::new(), 1).is_none());

    let mut tree = FPTree::new();
    tree.insert_transaction(&[9], 1);
    assert!(!build_into(&mut tree, &db, 5));
    assert!(tree.is_empty());
    assert!(tree.header.is_empty());
}

#[test]
fn test_header_matches_first_pass() {
    let (_, db) = textbook_db();
    let supports = count_item_supports(&db);
    let tree = build_fp_tree(&db, 2).unwrap();

    assert_eq!(tree.header.len(), 5);
    for (item, entry) in tree.header.iter() {
        assert_eq!(tree.chain_count(item), entry.support);
        assert_eq!(Some(&entry.support), supports.get(&item));
    }
}

#[test]
fn test_paths_follow_support_order() {
    let (_, db) = textbook_db();
    let tree = build_fp_tree(&db, 2).unwrap();
    let rank: Vec<ItemId> = tree.header.items().collect();
    let position = |item: ItemId| rank.iter().position(|&x| x == item).unwrap();

    let supports: Vec<usize> = rank.iter().map(|&item| tree.header.support(item).unwrap()).collect();
    assert!(supports.windows(2).all(|w| w[0] >= w[1]));

    for node in &tree.nodes[1..] {
        let parent = &tree.nodes[node.parent.unwrap()];
        if let (Some(parent_item), Some(item)) = (parent.item, node.item) {
            assert!(position(parent_item) < position(item));
            assert!(parent.count >= node.count);
        }
    }
}

#[test]
fn test_combination_generation() {
    let path = vec![(5, 10), (7, 8), (9, 5)];
    let ctx = MiningContext::new(1, &MiningConfig::new(1, 0.0));

    let mut found = FrequentItemsets::new(0);
    emit_path_combinations(&path, &Itemset::empty(), &ctx, &mut found).unwrap();
    assert_eq!(found.len(), 7);
    assert_eq!(found.support_of(&[5]), Some(10));
    assert_eq!(found.support_of(&[5, 7]), Some(8));
    assert_eq!(found.support_of(&[5, 9]), Some(5));
    assert_eq!(found.support_of(&[5, 7, 9]), Some(5));

    let capped_ctx = MiningContext::new(1, &MiningConfig::new(1, 0.0).with_max_itemset_len(2));
    let mut capped = FrequentItemsets::new(0);
    emit_path_combinations(&path, &Itemset::new(vec![1]), &capped_ctx, &mut capped).unwrap();
    assert_eq!(capped.len(), 3);
    assert_eq!(capped.support_of(&[1, 7]), Some(8));
}

#[test]
fn test_long_single_path_respects_deadline() {
    let path: Vec<(ItemId, usize)> = (0..24).map(|item| (item, 3)).collect();
    let ctx = MiningContext::new(2, &MiningConfig::new(2, 0.0).with_time_limit(Duration::ZERO));

    let mut found = FrequentItemsets::new(0);
    assert_eq!(
        emit_path_combinations(&path, &Itemset::empty(), &ctx, &mut found),
        Err(MiningError::DeadlineExceeded { limit: Duration::ZERO })
    );
    assert!(found.len() < (1 << 24) - 1);
}

#[test]
fn test_unrepresentable_time_limit_never_expires() {
    let (_, db) = textbook_db();
    let config = MiningConfig::new(2, 0.0).with_time_limit(Duration::MAX);
    assert!(config.validate().is_ok());

    let result = fp_growth_algorithm(&db, &config).unwrap();
    assert_eq!(result.len(), 13);
}

#[test]
fn test_fp_growth_textbook() {
    let (dictionary, db) = textbook_db();
    let result = fp_growth_algorithm(&db, &MiningConfig::new(2, 0.0)).unwrap();
    let id = |name: &'static str| dictionary.id_of(&name).unwrap();

    assert_eq!(result.len(), 13);
    assert_eq!(result.num_transactions(), 9);
    assert_eq!(result.support_of(&[id("I2")]), Some(7));
    assert_eq!(result.support_of(&[id("I1"), id("I2"), id("I5")]), Some(2));
    assert_eq!(result.support_of(&[id("I3"), id("I5")]), None);
}

#[test]
fn test_fp_growth_max_itemset_len() {
    let (_, db) = textbook_db();
    let config = MiningConfig::new(2, 0.0).with_max_itemset_len(2);
    let result = fp_growth_algorithm(&db, &config).unwrap();

    assert_eq!(result.len(), 11);
    assert_eq!(result.max_itemset_len(), 2);

    let singles = fp_growth_algorithm(&db, &config.with_max_itemset_len(1)).unwrap();
    assert_eq!(singles.len(), 5);
}

#[test]
fn test_fp_growth_deadline() {
    let (_, db) = textbook_db();
    let config = MiningConfig::new(2, 0.0).with_time_limit(Duration::ZERO);

    assert_eq!(
        fp_growth_algorithm(&db, &config),
        Err(MiningError::DeadlineExceeded { limit: Duration::ZERO })
    );
}

#[test]
fn test_recursive_level_returns_its_increments() {
    let base = db_of(&[(&[1, 2], 2), (&[1, 3], 2), (&[2, 3], 1)]);
    let tree = build_fp_tree(&base, 2).unwrap();
    let alpha = Itemset::new(vec![9]);
    let mut ctx = MiningContext::new(2, &MiningConfig::new(2, 0.0));

    let found = fp_growth_recursive(&tree, &alpha, &mut ctx).unwrap();

    assert!(found.iter().all(|(itemset, _)| itemset.contains(&9)));
    assert_eq!(found.support_of(&[1, 9]), Some(4));
    assert_eq!(found.support_of(&[2, 9]), Some(3));
    assert_eq!(found.support_of(&[3, 9]), Some(3));
    assert_eq!(found.support_of(&[1, 2, 9]), Some(2));
    assert_eq!(found.support_of(&[1, 3, 9]), Some(2));
    assert_eq!(found.support_of(&[2, 3, 9]), None);
    assert_eq!(found.len(), 5);
}

#[test]
fn test_pool_reuses_trees() {
    let mut pool = TreePool::new();
    let db = db_of(&[(&[1, 2], 3)]);

    let mut tree = pool.acquire();
    assert!(build_into(&mut tree, &db, 1));
    assert_eq!(tree.node_count(), 2);
    pool.release(tree);
    assert_eq!(pool.available(), 1);

    let tree = pool.acquire();
    assert!(tree.is_empty());
    assert!(tree.header.is_empty());
    assert_eq!(pool.created(), 1);
}
