//! Arena-backed hierarchy tree.
//!
//! Parent/child relations are stored as arena index pairs, so parent
//! back-references are plain weak links with no reference-cycle concerns.

use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// One scaffold node: a name plus its position in the tree.
#[derive(Debug)]
pub struct HierarchyNode {
    /// Node name, unique only within its sibling set
    pub name: String,
    /// Index of the parent node, None for the root and detached nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, insertion order significant
    pub children: Vec<Index>,
}

impl fmt::Display for HierarchyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-based tree structure for one scaffold hierarchy.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. Each arena holds one complete tree.
#[derive(Debug)]
pub struct HierarchyArena {
    /// Arena storage for all tree nodes
    arena: Arena<HierarchyNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for HierarchyArena {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a node under `parent`, appending it to the parent's children.
    /// With no parent the node becomes the tree root.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, name: impl Into<String> + fmt::Debug, parent: Option<Index>) -> Index {
        let node = HierarchyNode {
            name: name.into(),
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Creates a node that belongs to no parent and is not the root.
    /// Attach it later with [`insert_child`](Self::insert_child).
    #[instrument(level = "trace", skip(self))]
    pub fn new_detached(&mut self, name: impl Into<String> + fmt::Debug) -> Index {
        self.arena.insert(HierarchyNode {
            name: name.into(),
            parent: None,
            children: Vec::new(),
        })
    }

    pub fn get_node(&self, idx: Index) -> Option<&HierarchyNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut HierarchyNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn name(&self, idx: Index) -> Option<&str> {
        self.arena.get(idx).map(|n| n.name.as_str())
    }

    /// Renames a node in place; relations are untouched.
    #[instrument(level = "trace", skip(self))]
    pub fn set_name(&mut self, idx: Index, name: impl Into<String> + fmt::Debug) -> DomainResult<()> {
        let node = self.arena.get_mut(idx).ok_or(DomainError::StaleNode)?;
        node.name = name.into();
        Ok(())
    }

    /// Read-only view of a node's children. Stale indices yield an empty
    /// slice, never a failure.
    pub fn children(&self, idx: Index) -> &[Index] {
        self.arena
            .get(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|n| n.parent)
    }

    /// Inserts `child` at `position` in `parent`'s child list.
    ///
    /// Returns `Ok(true)` on success; `Ok(false)` without mutating anything
    /// when `position` is out of range. Positions equal to the current child
    /// count are rejected: appends go through [`insert_node`](Self::insert_node).
    /// A child that is already attached somewhere (or is the root) is refused
    /// with `DuplicateParenting`, and attaching an ancestor of `parent` with
    /// `CycleDetected`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_child(
        &mut self,
        parent: Index,
        position: usize,
        child: Index,
    ) -> DomainResult<bool> {
        let child_name = {
            let node = self.arena.get(child).ok_or(DomainError::StaleNode)?;
            if node.parent.is_some() || self.root == Some(child) {
                return Err(DomainError::DuplicateParenting(node.name.clone()));
            }
            node.name.clone()
        };
        if self.arena.get(parent).is_none() {
            return Err(DomainError::StaleNode);
        }
        if self.is_ancestor(child, parent) {
            return Err(DomainError::CycleDetected(child_name));
        }

        let len = self.children(parent).len();
        if position >= len {
            return Ok(false);
        }
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.insert(position, child);
        }
        if let Some(child_node) = self.arena.get_mut(child) {
            child_node.parent = Some(parent);
        }
        Ok(true)
    }

    /// Removes the child at `position`, clearing its parent link. The node
    /// stays in the arena and can be re-attached. Returns false when the
    /// position (or the parent index) is invalid.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, parent: Index, position: usize) -> bool {
        let removed = match self.arena.get_mut(parent) {
            Some(parent_node) if position < parent_node.children.len() => {
                parent_node.children.remove(position)
            }
            _ => return false,
        };
        if let Some(child_node) = self.arena.get_mut(removed) {
            child_node.parent = None;
        }
        true
    }

    /// Child at `index`, or `InvalidIndex` when out of range.
    pub fn get_child_by_index(&self, parent: Index, index: usize) -> DomainResult<Index> {
        let parent_node = self.arena.get(parent).ok_or(DomainError::StaleNode)?;
        parent_node
            .children
            .get(index)
            .copied()
            .ok_or(DomainError::InvalidIndex {
                index,
                len: parent_node.children.len(),
            })
    }

    /// First direct child named `name`, in traversal order.
    pub fn get_child_by_name(&self, parent: Index, name: &str) -> Option<Index> {
        self.arena.get(parent).and_then(|parent_node| {
            parent_node
                .children
                .iter()
                .copied()
                .find(|&child| self.name(child) == Some(name))
        })
    }

    /// True when `candidate` is `of` itself or one of its ancestors.
    fn is_ancestor(&self, candidate: Index, of: Index) -> bool {
        let mut current = Some(of);
        while let Some(idx) = current {
            if idx == candidate {
                return true;
            }
            current = self.parent(idx);
        }
        false
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Names of all leaf nodes in traversal order.
    /// Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, node_idx: Index, leaves: &mut Vec<String>) {
        if let Some(node) = self.get_node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node.name.clone());
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

/// Pre-order traversal over a hierarchy arena.
pub struct TreeIterator<'a> {
    arena: &'a HierarchyArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a HierarchyArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a HierarchyNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
