use super::itemset::Itemset;
use crate::Item;
use std::collections::HashMap;

/// All frequent itemsets of one size, ordered by support descending and
/// then by items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentLevel<T> {
    itemset_size: usize,
    entries: Vec<(Itemset<T>, usize)>,
}

impl<T> FrequentLevel<T> {
    pub fn itemset_size(&self) -> usize {
        self.itemset_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_itemset(&self, idx: usize) -> &[T] {
        self.entries[idx].0.as_slice()
    }

    pub fn support(&self, idx: usize) -> usize {
        self.entries[idx].1
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = (&[T], usize)> {
        self.entries.iter().map(|(itemset, support)| (itemset.as_slice(), *support))
    }
}

/// Mapping from every discovered frequent itemset to its support count.
///
/// Also records how many transactions the supports were counted over, which
/// rule generation needs for lift.
#[derive(Debug, Clone)]
pub struct FrequentItemsets<T> {
    supports: HashMap<Itemset<T>, usize>,
    num_transactions: usize,
}

impl<T: Item> FrequentItemsets<T> {
    pub fn new(num_transactions: usize) -> Self {
        Self { supports: HashMap::new(), num_transactions }
    }

    /// Records `itemset` with `support`, returning the previous support if
    /// the itemset was already present.
    pub fn insert(&mut self, itemset: Itemset<T>, support: usize) -> Option<usize> {
        self.supports.insert(itemset, support)
    }

    pub fn support(&self, itemset: &Itemset<T>) -> Option<usize> {
        self.supports.get(itemset).copied()
    }

    /// Looks up a support by items in any order.
    pub fn support_of(&self, items: &[T]) -> Option<usize> {
        let mut sorted = items.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        self.supports.get(sorted.as_slice()).copied()
    }

    pub fn contains(&self, itemset: &Itemset<T>) -> bool {
        self.supports.contains_key(itemset)
    }

    pub fn len(&self) -> usize {
        self.supports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supports.is_empty()
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset<T>, usize)> {
        self.supports.iter().map(|(itemset, &support)| (itemset, support))
    }

    pub fn max_itemset_len(&self) -> usize {
        self.supports.keys().map(|itemset| itemset.len()).max().unwrap_or(0)
    }

    /// Folds the itemsets discovered by another (sub)run into this one.
    ///
    /// Keys are unique per conditional branch, so the merge is a plain union.
    pub fn merge(&mut self, other: FrequentItemsets<T>) {
        for (itemset, support) in other.supports {
            let previous = self.supports.insert(itemset, support);
            debug_assert!(previous.map_or(true, |p| p == support));
        }
    }

    /// Maps every item through `f`, e.g. to turn interned ids back into the
    /// caller's items.
    pub fn map_items<U: Item>(&self, mut f: impl FnMut(&T) -> U) -> FrequentItemsets<U> {
        let supports = self
            .supports
            .iter()
            .map(|(itemset, &support)| (itemset.iter().map(&mut f).collect(), support))
            .collect();
        FrequentItemsets { supports, num_transactions: self.num_transactions }
    }

    /// Groups the itemsets by size. Index `k` holds the itemsets of size
    /// `k + 1`, each level sorted by support descending and then by items.
    pub fn levels(&self) -> Vec<FrequentLevel<T>> {
        let mut by_size: Vec<Vec<(&Itemset<T>, usize)>> = Vec::new();
        for (itemset, support) in self.iter() {
            let size = itemset.len();
            if size == 0 {
                continue;
            }
            while by_size.len() < size {
                by_size.push(Vec::new());
            }
            by_size[size - 1].push((itemset, support));
        }

        by_size
            .into_iter()
            .enumerate()
            .map(|(idx, entries)| {
                let mut entries: Vec<(Itemset<T>, usize)> = entries
                    .into_iter()
                    .map(|(itemset, support)| (itemset.clone(), support))
                    .collect();
                entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                FrequentLevel { itemset_size: idx + 1, entries }
            })
            .collect()
    }
}

impl<T: Item> PartialEq for FrequentItemsets<T> {
    fn eq(&self, other: &Self) -> bool {
        self.num_transactions == other.num_transactions && self.supports == other.supports
    }
}

impl<T: Item> Eq for FrequentItemsets<T> {}
