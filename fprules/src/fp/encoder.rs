use super::utils::Itemset;
use crate::Item;
use indexmap::{IndexMap, IndexSet};

/// Dense id assigned to an item by [`ItemDictionary`].
pub type ItemId = usize;

/// Interns items into dense ids in first-seen order.
#[derive(Debug, Clone)]
pub struct ItemDictionary<T> {
    items: IndexSet<T>,
}

impl<T: Item> ItemDictionary<T> {
    pub fn new() -> Self {
        Self { items: IndexSet::new() }
    }

    pub fn intern(&mut self, item: T) -> ItemId {
        self.items.insert_full(item).0
    }

    pub fn id_of(&self, item: &T) -> Option<ItemId> {
        self.items.get_index_of(item)
    }

    pub fn item(&self, id: ItemId) -> Option<&T> {
        self.items.get_index(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item behind an id issued by this dictionary. Panics on
    /// ids from elsewhere.
    pub fn resolve_id(&self, id: ItemId) -> T {
        self.items[id].clone()
    }

    pub fn resolve(&self, itemset: &Itemset<ItemId>) -> Itemset<T> {
        itemset.iter().map(|&id| self.resolve_id(id)).collect()
    }
}

impl<T: Item> Default for ItemDictionary<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct itemsets with the number of transactions that produced each.
///
/// Iteration follows first insertion, which keeps tree construction
/// deterministic for a given input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedDatabase {
    entries: IndexMap<Itemset<ItemId>, usize>,
    num_transactions: usize,
}

impl EncodedDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `itemset`. Counts of equal sets are summed.
    pub fn add(&mut self, itemset: Itemset<ItemId>, count: usize) {
        if count == 0 {
            return;
        }
        *self.entries.entry(itemset).or_insert(0) += count;
        self.num_transactions += count;
    }

    pub fn count(&self, itemset: &Itemset<ItemId>) -> usize {
        self.entries.get(itemset).copied().unwrap_or(0)
    }

    /// Number of distinct itemsets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, empty transactions included.
    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset<ItemId>, usize)> {
        self.entries.iter().map(|(itemset, &count)| (itemset, count))
    }
}

impl FromIterator<(Itemset<ItemId>, usize)> for EncodedDatabase {
    fn from_iter<I: IntoIterator<Item = (Itemset<ItemId>, usize)>>(iter: I) -> Self {
        let mut db = EncodedDatabase::new();
        for (itemset, count) in iter {
            db.add(itemset, count);
        }
        db
    }
}

/// Tallies transactions into an [`EncodedDatabase`], interning items as it goes.
#[derive(Debug, Clone)]
pub struct TransactionEncoder<T> {
    dictionary: ItemDictionary<T>,
    database: EncodedDatabase,
}

impl<T: Item> TransactionEncoder<T> {
    pub fn new() -> Self {
        Self { dictionary: ItemDictionary::new(), database: EncodedDatabase::new() }
    }

    /// Adds one transaction. Repeated items within it are ignored.
    pub fn push<I: IntoIterator<Item = T>>(&mut self, transaction: I) {
        let itemset: Itemset<ItemId> = transaction
            .into_iter()
            .map(|item| self.dictionary.intern(item))
            .collect();
        self.database.add(itemset, 1);
    }

    pub fn dictionary(&self) -> &ItemDictionary<T> {
        &self.dictionary
    }

    pub fn finish(self) -> (ItemDictionary<T>, EncodedDatabase) {
        (self.dictionary, self.database)
    }
}

impl<T: Item> Default for TransactionEncoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn encode_transactions<T, I, Tx>(transactions: I) -> (ItemDictionary<T>, EncodedDatabase)
where
    T: Item,
    I: IntoIterator<Item = Tx>,
    Tx: IntoIterator<Item = T>,
{
    let mut encoder = TransactionEncoder::new();
    for transaction in transactions {
        encoder.push(transaction);
    }
    let (dictionary, database) = encoder.finish();
    log::debug!(
        "encoded {} transactions into {} distinct itemsets over {} items",
        database.num_transactions(),
        database.len(),
        dictionary.len()
    );
    (dictionary, database)
}
