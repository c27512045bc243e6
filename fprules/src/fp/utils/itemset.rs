use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::ops::Deref;

/// A canonical set of items: sorted ascending, without duplicates.
///
/// Two itemsets built from the same items in any order compare and hash
/// equal, so they can be used directly as map keys. Hashing matches the
/// underlying slice, which lets maps keyed by `Itemset<T>` be queried with
/// an already sorted `&[T]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<T>")]
#[serde(bound(deserialize = "T: Ord + Deserialize<'de>"))]
pub struct Itemset<T>(Vec<T>);

impl<T> Itemset<T> {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T: Ord> Itemset<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self(items)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.0.binary_search(item).is_ok()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.iter().all(|item| other.contains(item))
    }
}

impl<T: Ord + Clone> Itemset<T> {
    /// Returns a copy of this set with `item` added.
    pub fn with_item(&self, item: T) -> Self {
        let mut items = self.0.clone();
        if let Err(pos) = items.binary_search(&item) {
            items.insert(pos, item);
        }
        Self(items)
    }

    /// Returns a copy of this set with `item` removed.
    pub fn without(&self, item: &T) -> Self {
        Self(self.0.iter().filter(|&x| x != item).cloned().collect())
    }

    pub fn difference(&self, other: &Self) -> Self {
        Self(self.0.iter().filter(|&x| !other.contains(x)).cloned().collect())
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend_from_slice(&self.0);
        items.extend_from_slice(&other.0);
        Self::new(items)
    }
}

impl<T> Default for Itemset<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Deref for Itemset<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> Borrow<[T]> for Itemset<T> {
    fn borrow(&self) -> &[T] {
        &self.0
    }
}

impl<T: Ord> From<Vec<T>> for Itemset<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: Ord> FromIterator<T> for Itemset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Itemset<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
