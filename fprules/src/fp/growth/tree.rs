use crate::fp::encoder::{EncodedDatabase, ItemId};
use crate::fp::utils::Itemset;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A node in the arena. `parent`, `children` and `next` are arena indices.
#[derive(Debug, Clone)]
pub struct FPNode {
    pub item: Option<ItemId>,
    pub count: usize,
    pub parent: Option<usize>,
    pub children: HashMap<ItemId, usize>,
    /// Next node carrying the same item, in chain order.
    pub next: Option<usize>,
}

/// Support and node chain of one item in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderEntry {
    pub support: usize,
    pub head: Option<usize>,
    tail: Option<usize>,
}

/// Item index of an [`FPTree`], kept in frequency rank order.
#[derive(Debug, Clone, Default)]
pub struct HeaderTable {
    entries: IndexMap<ItemId, HeaderEntry>,
}

#[derive(Debug, Clone)]
pub struct FPTree {
    pub nodes: Vec<FPNode>,
    pub header: HeaderTable,
    pub root_index: usize,
}

/// Walks the chain of nodes that carry one item.
pub struct ChainIter<'a> {
    nodes: &'a [FPNode],
    current: Option<usize>,
}

impl FPNode {
    pub fn new_root() -> Self {
        Self {
            item: None,
            count: 0,
            parent: None,
            children: HashMap::new(),
            next: None,
        }
    }

    pub fn new_item(item: ItemId, count: usize, parent: Option<usize>) -> Self {
        Self {
            item: Some(item),
            count,
            parent,
            children: HashMap::new(),
            next: None,
        }
    }
}

impl HeaderEntry {
    fn new() -> Self {
        Self { support: 0, head: None, tail: None }
    }
}

impl HeaderTable {
    /// Registers `item` without touching its support. Items are listed in
    /// the order they are first registered.
    pub fn reserve(&mut self, item: ItemId) {
        self.entries.entry(item).or_insert_with(HeaderEntry::new);
    }

    pub fn get(&self, item: ItemId) -> Option<&HeaderEntry> {
        self.entries.get(&item)
    }

    pub fn support(&self, item: ItemId) -> Option<usize> {
        self.entries.get(&item).map(|entry| entry.support)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.entries.contains_key(&item)
    }

    /// Items in registration order (descending support for built trees).
    pub fn items(&self) -> impl DoubleEndedIterator<Item = ItemId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ItemId, &HeaderEntry)> + '_ {
        self.entries.iter().map(|(&item, entry)| (item, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for FPTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FPTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![FPNode::new_root()],
            header: HeaderTable::default(),
            root_index: 0,
        }
    }

    /// Drops every node except the root and empties the header, keeping the
    /// allocations for reuse.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[self.root_index] = FPNode::new_root();
        self.header.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of item nodes, root excluded.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Inserts an ordered item sequence occurring `count` times. Shared
    /// prefixes are merged into existing nodes; new nodes are appended to
    /// their item's chain.
    pub fn insert_transaction(&mut self, transaction: &[ItemId], count: usize) {
        let mut current_index = self.root_index;

        for &item in transaction {
            if let Some(&child_index) = self.nodes[current_index].children.get(&item) {
                self.nodes[child_index].count += count;
                current_index = child_index;
            } else {
                let new_index = self.nodes.len();
                self.nodes
                    .push(FPNode::new_item(item, count, Some(current_index)));
                self.nodes[current_index].children.insert(item, new_index);
                self.link(item, new_index);
                current_index = new_index;
            }

            if let Some(entry) = self.header.entries.get_mut(&item) {
                entry.support += count;
            }
        }
    }

    fn link(&mut self, item: ItemId, node_index: usize) {
        let entry = self.header.entries.entry(item).or_insert_with(HeaderEntry::new);
        match entry.tail {
            Some(tail) => self.nodes[tail].next = Some(node_index),
            None => entry.head = Some(node_index),
        }
        entry.tail = Some(node_index);
    }

    pub fn chain(&self, item: ItemId) -> ChainIter<'_> {
        ChainIter {
            nodes: &self.nodes,
            current: self.header.get(item).and_then(|entry| entry.head),
        }
    }

    /// Sum of node counts along `item`'s chain.
    pub fn chain_count(&self, item: ItemId) -> usize {
        self.chain(item).map(|idx| self.nodes[idx].count).sum()
    }

    /// Items on the path from `node_index`'s parent up to the root, root
    /// excluded, nearest ancestor first.
    pub fn prefix_path(&self, node_index: usize) -> Vec<ItemId> {
        let mut path = Vec::new();
        let mut current = self.nodes[node_index].parent;

        while let Some(i) = current {
            if let Some(item) = self.nodes[i].item {
                path.push(item);
            }
            current = self.nodes[i].parent;
        }
        path
    }

    /// Collects the prefix paths of every node carrying `item`, weighted by
    /// that node's count. Equal prefixes reached from different nodes have
    /// their counts summed. Nodes hanging directly off the root contribute
    /// nothing.
    pub fn conditional_pattern_base(&self, item: ItemId) -> EncodedDatabase {
        let mut base = EncodedDatabase::new();
        for idx in self.chain(item) {
            let path = self.prefix_path(idx);
            if !path.is_empty() {
                base.add(Itemset::new(path), self.nodes[idx].count);
            }
        }
        base
    }

    /// Returns the `(item, count)` chain from the root downward if no node
    /// has more than one child.
    pub fn single_path(&self) -> Option<Vec<(ItemId, usize)>> {
        let mut path = Vec::new();
        let mut current_index = self.root_index;

        loop {
            let current_node = &self.nodes[current_index];
            let mut children = current_node.children.values();

            match (children.next(), children.next()) {
                (None, _) => return Some(path),
                (Some(&child_index), None) => {
                    current_index = child_index;
                    let child_node = &self.nodes[child_index];
                    if let Some(item) = child_node.item {
                        path.push((item, child_node.count));
                    }
                }
                (Some(_), Some(_)) => return None,
            }
        }
    }
}

impl Iterator for ChainIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.current?;
        self.current = self.nodes[idx].next;
        Some(idx)
    }
}
