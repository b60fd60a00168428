//! Arena-based DOM tree storage
//!
//! All nodes live in one `Vec<DomNode>` and refer to each other by `NodeId`.
//! No Rc/RefCell, no recursion when walking the tree.
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```
//!
//! Trees produced by the parser are compacted so that node ids follow
//! document order and `Node0` is the root element.

use crate::error::{DomError, Result};
use crate::path::{ElementPath, PathStep};
use crate::types::{DomNode, NodeData, NodeId};

/// Arena allocator for DOM nodes
#[derive(Debug, Clone)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root_id: None,
        }
    }

    /// Add a detached node to the arena, returns its ID
    pub fn add_node(&mut self, data: NodeData) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(DomNode::new(node_id, data));
        node_id
    }

    /// Create a node as the last child of `parent_id`.
    ///
    /// Panics if `parent_id` does not belong to this arena.
    pub fn append_child(&mut self, parent_id: NodeId, data: NodeData) -> NodeId {
        let node_id = self.add_node(data);
        self.nodes[node_id as usize].parent_id = Some(parent_id);
        self.nodes[parent_id as usize].children_ids.push(node_id);
        node_id
    }

    /// Get node by ID
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    pub(crate) fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Infallible lookup for ids handed out by this arena
    pub(crate) fn node(&self, node_id: NodeId) -> &DomNode {
        &self.nodes[node_id as usize]
    }

    /// Get root node
    pub fn root(&self) -> Result<&DomNode> {
        let root_id = self.root_id.ok_or(DomError::MissingRoot)?;
        self.get(root_id)
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Traverse tree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Concatenated text of a node and all of its descendants, in document order.
    /// Comment data is not text content.
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        let mut text = String::new();

        self.traverse_df(node_id, |node| {
            if let NodeData::Text { value } = &node.data {
                text.push_str(value);
            }
            Ok(())
        })?;

        Ok(text)
    }

    /// Compute the positional path of a node by walking its ancestors
    ///
    /// Gives the same result as the path paired with the node during
    /// traversal, without walking the whole tree.
    pub fn path_of(&self, node_id: NodeId) -> Result<ElementPath> {
        let mut steps = Vec::new();
        let mut current_id = Some(node_id);

        while let Some(id) = current_id {
            let node = self.get(id)?;
            let tag = node.step_tag().ok_or(DomError::NotAddressable(id))?;

            // Position among siblings with the same step tag
            let position = match node.parent_id {
                Some(parent_id) => {
                    let parent = self.get(parent_id)?;
                    let mut position = 0;
                    for &child_id in &parent.children_ids {
                        if self.get(child_id)?.step_tag() == Some(tag) {
                            position += 1;
                        }
                        if child_id == id {
                            break;
                        }
                    }
                    position
                }
                None => 1,
            };

            steps.push(PathStep::new(tag, position));
            current_id = node.parent_id;
        }

        steps.reverse();
        Ok(steps.into_iter().collect())
    }

    /// Copy the subtree under `root_id` into a fresh arena whose ids follow
    /// document order, consuming `self`. `root_tag` renames the new root.
    pub(crate) fn into_subtree(mut self, root_id: NodeId, root_tag: Option<&str>) -> DomArena {
        let mut compacted = DomArena::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(root_id, None)];

        while let Some((src_id, dst_parent)) = stack.pop() {
            let src = &mut self.nodes[src_id as usize];
            let children = std::mem::take(&mut src.children_ids);
            let mut data = std::mem::replace(
                &mut src.data,
                NodeData::Text {
                    value: String::new(),
                },
            );

            let dst_id = match dst_parent {
                Some(parent_id) => compacted.append_child(parent_id, data),
                None => {
                    if let (Some(tag), NodeData::Element { tag: old, .. }) = (root_tag, &mut data) {
                        *old = tag.to_string();
                    }
                    compacted.add_node(data)
                }
            };

            for &child_id in children.iter().rev() {
                stack.push((child_id, Some(dst_id)));
            }
        }

        compacted.root_id = Some(0);
        compacted
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
