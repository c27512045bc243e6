use super::tree::FPTree;

/// Free list of tree arenas, so that conditional trees reuse the node and
/// header allocations of trees that were already mined.
#[derive(Debug, Default)]
pub struct TreePool {
    free: Vec<FPTree>,
    created: usize,
}

impl TreePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out an empty tree.
    pub fn acquire(&mut self) -> FPTree {
        match self.free.pop() {
            Some(tree) => tree,
            None => {
                self.created += 1;
                FPTree::new()
            }
        }
    }

    pub fn release(&mut self, mut tree: FPTree) {
        tree.clear();
        self.free.push(tree);
    }

    /// Number of trees allocated over the pool's lifetime.
    pub fn created(&self) -> usize {
        self.created
    }

    pub fn available(&self) -> usize {
        self.free.len()
    }
}
