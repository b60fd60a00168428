//! Depth-first traversal paired with positional paths
//!
//! Yields every element and comment of the tree in document order (pre-order,
//! children left to right), each with its `ElementPath`. Text nodes are
//! content, not addressable nodes, and are skipped.
//!
//! Paths are computed while walking: when a node is visited, its children are
//! numbered per tag in document order, and each child's path is the parent's
//! path plus one step. No recursion, no second pass.

use ahash::AHashMap;

use crate::arena::DomArena;
use crate::path::ElementPath;
use crate::types::{DomNode, NodeId};

/// Walk the whole tree from its root
pub fn traverse(arena: &DomArena) -> Traversal<'_> {
    Traversal::new(arena)
}

impl DomArena {
    /// See [`traverse`]
    pub fn traverse(&self) -> Traversal<'_> {
        Traversal::new(self)
    }
}

/// Single-pass iterator over `(node, path)` pairs.
/// Call [`traverse`] again to walk the tree again.
#[derive(Debug, Clone)]
pub struct Traversal<'a> {
    arena: &'a DomArena,
    stack: Vec<(NodeId, ElementPath)>,
}

impl<'a> Traversal<'a> {
    fn new(arena: &'a DomArena) -> Self {
        let mut stack = Vec::with_capacity(64);
        if let Ok(root) = arena.root() {
            if let Some(tag) = root.step_tag() {
                stack.push((root.node_id, ElementPath::root(tag)));
            }
        }
        Self { arena, stack }
    }

    /// Queue the addressable children of `node`, numbered per tag
    fn push_children(&mut self, node: &'a DomNode, path: &ElementPath) {
        let mut counters: AHashMap<&str, u32> = AHashMap::new();
        let mut numbered = Vec::with_capacity(node.children_ids.len());

        for &child_id in &node.children_ids {
            let child = self.arena.node(child_id);
            if let Some(tag) = child.step_tag() {
                let counter = counters.entry(tag).or_insert(0);
                *counter += 1;
                numbered.push((child_id, path.child(tag, *counter)));
            }
        }

        // Reverse so the first child is popped first
        self.stack.extend(numbered.into_iter().rev());
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = (&'a DomNode, ElementPath);

    fn next(&mut self) -> Option<Self::Item> {
        let (node_id, path) = self.stack.pop()?;
        let node = self.arena.node(node_id);
        self.push_children(node, &path);
        Some((node, path))
    }
}
