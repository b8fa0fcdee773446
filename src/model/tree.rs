//! Arena of blocks addressed by index.
//!
//! Nodes are pushed in API order and never removed. Parent and child links
//! are indices into the node vector, so the tree needs no `Box` recursion
//! and can be walked without borrowing issues.

use super::{Block, ChildDatabaseBlock};
use crate::types::BlockId;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Index of a node inside a [`BlockTree`].
pub type NodeIndex = usize;

/// Ordered block storage with parent/child references by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockTree {
    nodes: Vec<Block>,
    index_by_id: HashMap<BlockId, NodeIndex>,
    parents: Vec<Option<NodeIndex>>,
    children: Vec<Vec<NodeIndex>>,
    roots: Vec<NodeIndex>,
}

impl BlockTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a flat tree where every block is a root, in the given order.
    pub fn from_roots(blocks: Vec<Block>) -> Self {
        let mut tree = Self::new();
        for block in blocks {
            tree.push_root(block);
        }
        tree
    }

    /// Appends a top-level block.
    pub fn push_root(&mut self, block: Block) -> NodeIndex {
        let index = self.insert(block, None);
        self.roots.push(index);
        index
    }

    /// Appends `block` as the last child of `parent`.
    ///
    /// Returns `None` when `parent` is out of range.
    pub fn push_child(&mut self, parent: NodeIndex, block: Block) -> Option<NodeIndex> {
        if parent >= self.nodes.len() {
            return None;
        }
        let index = self.insert(block, Some(parent));
        self.children[parent].push(index);
        Some(index)
    }

    fn insert(&mut self, block: Block, parent: Option<NodeIndex>) -> NodeIndex {
        let index = self.nodes.len();
        if let Some(id) = block.id() {
            // A duplicate id keeps pointing at its first occurrence.
            self.index_by_id.entry(id.clone()).or_insert(index);
        }
        self.nodes.push(block);
        self.parents.push(parent);
        self.children.push(Vec::new());
        index
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Block> {
        self.nodes.get(index)
    }

    pub fn index_of(&self, id: &BlockId) -> Option<NodeIndex> {
        self.index_by_id.get(id).copied()
    }

    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        self.index_of(id).and_then(|index| self.get(index))
    }

    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.parents.get(index).copied().flatten()
    }

    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.children
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Top-level blocks in API order.
    pub fn roots(&self) -> impl Iterator<Item = &Block> {
        self.roots.iter().filter_map(|&index| self.nodes.get(index))
    }

    /// Top-level blocks whose nested children were not fetched.
    pub fn unexpanded_roots(&self) -> usize {
        self.roots
            .iter()
            .filter(|&&index| {
                self.nodes[index].has_children() && self.children[index].is_empty()
            })
            .count()
    }

    /// Top-level `child_database` blocks in API order.
    pub fn child_databases(&self) -> impl Iterator<Item = &ChildDatabaseBlock> {
        self.roots().filter_map(|block| match block {
            Block::ChildDatabase(database) => Some(database),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Serialize for BlockTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.roots())
    }
}
