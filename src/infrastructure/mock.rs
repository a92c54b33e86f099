//! In-memory scene host.
//!
//! Implements [`SceneHost`] over plain vectors with a per-chunk operation
//! journal, so `undo_last_chunk` genuinely reverts state. Used by the
//! service tests; doubles as the reference for what a real host adapter
//! must guarantee.

use std::collections::BTreeMap;

use crate::domain::Rgb;
use crate::infrastructure::host::{AttrKind, AttrSpec, AttrValue, HostError, NodeHandle, SceneHost};

#[derive(Debug)]
struct MockNode {
    name: String,
    node_type: String,
    parent: Option<usize>,
    children: Vec<usize>,
    attrs: BTreeMap<String, AttrValue>,
    user_attrs: Vec<AttrSpec>,
    /// Locked attributes, value is the hide flag
    locks: BTreeMap<String, bool>,
    color: Option<Rgb>,
    alive: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Connection {
    src: NodeHandle,
    src_attr: String,
    dst: NodeHandle,
    dst_attr: String,
}

#[derive(Debug)]
enum Op {
    Created(usize),
    Parented { child: usize, previous: Option<usize> },
    Renamed { node: usize, previous: String },
    Connected(usize),
    AttrSet { node: usize, attr: String, previous: Option<AttrValue> },
    AttrAdded { node: usize, name: String },
    Locked { node: usize, attr: String, previous: Option<bool> },
    Colored { node: usize, previous: Option<Rgb> },
}

/// Recording scene host with working undo chunks.
#[derive(Debug, Default)]
pub struct MockScene {
    nodes: Vec<MockNode>,
    connections: Vec<Connection>,
    chunk_depth: usize,
    current_chunk: Vec<Op>,
    closed_chunk: Vec<Op>,
}

impl MockScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, handle: NodeHandle) -> Result<usize, HostError> {
        let idx = handle.raw() as usize;
        match self.nodes.get(idx) {
            Some(node) if node.alive => Ok(idx),
            _ => Err(HostError::InvalidHandle),
        }
    }

    fn record(&mut self, op: Op) {
        if self.chunk_depth > 0 {
            self.current_chunk.push(op);
        } else {
            // Ops outside any chunk are individually undoable
            self.closed_chunk = vec![op];
        }
    }

    fn create(&mut self, node_type: &str, name: &str) -> Result<NodeHandle, HostError> {
        if name.is_empty() {
            return Err(HostError::Rejected("empty node name".to_string()));
        }
        if self.find(name).is_some() {
            return Err(HostError::DuplicateName(name.to_string()));
        }
        let idx = self.nodes.len();
        self.nodes.push(MockNode {
            name: name.to_string(),
            node_type: node_type.to_string(),
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            user_attrs: Vec::new(),
            locks: BTreeMap::new(),
            color: None,
            alive: true,
        });
        self.record(Op::Created(idx));
        Ok(NodeHandle::new(idx as u64))
    }

    fn detach(&mut self, child: usize) {
        if let Some(parent) = self.nodes[child].parent.take() {
            self.nodes[parent].children.retain(|&c| c != child);
        }
    }

    // ---- query helpers for assertions ----

    pub fn find(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .position(|n| n.alive && n.name == name)
            .map(|idx| NodeHandle::new(idx as u64))
    }

    pub fn is_alive(&self, handle: NodeHandle) -> bool {
        self.slot(handle).is_ok()
    }

    pub fn live_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }

    pub fn name_of(&self, handle: NodeHandle) -> Option<&str> {
        self.slot(handle).ok().map(|i| self.nodes[i].name.as_str())
    }

    pub fn node_type_of(&self, handle: NodeHandle) -> Option<&str> {
        self.slot(handle)
            .ok()
            .map(|i| self.nodes[i].node_type.as_str())
    }

    pub fn parent_of(&self, handle: NodeHandle) -> Option<NodeHandle> {
        let idx = self.slot(handle).ok()?;
        self.nodes[idx].parent.map(|p| NodeHandle::new(p as u64))
    }

    pub fn children_names(&self, handle: NodeHandle) -> Vec<String> {
        match self.slot(handle) {
            Ok(idx) => self.nodes[idx]
                .children
                .iter()
                .filter(|&&c| self.nodes[c].alive)
                .map(|&c| self.nodes[c].name.clone())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn attr(&self, handle: NodeHandle, name: &str) -> Option<&AttrValue> {
        let idx = self.slot(handle).ok()?;
        self.nodes[idx].attrs.get(name)
    }

    pub fn has_user_attr(&self, handle: NodeHandle, name: &str) -> bool {
        self.slot(handle)
            .map(|i| self.nodes[i].user_attrs.iter().any(|a| a.name == name))
            .unwrap_or(false)
    }

    pub fn color_of(&self, handle: NodeHandle) -> Option<Rgb> {
        let idx = self.slot(handle).ok()?;
        self.nodes[idx].color
    }

    /// `Some(hidden)` when the attribute is locked, `None` otherwise.
    pub fn lock_state(&self, handle: NodeHandle, attr: &str) -> Option<bool> {
        let idx = self.slot(handle).ok()?;
        self.nodes[idx].locks.get(attr).copied()
    }

    pub fn connected(&self, src: &str, src_attr: &str, dst: &str, dst_attr: &str) -> bool {
        let (Some(src), Some(dst)) = (self.find(src), self.find(dst)) else {
            return false;
        };
        self.connections.iter().any(|c| {
            c.src == src && c.src_attr == src_attr && c.dst == dst && c.dst_attr == dst_attr
        })
    }
}

impl SceneHost for MockScene {
    fn create_group(&mut self, name: &str) -> Result<NodeHandle, HostError> {
        self.create("transform", name)
    }

    fn create_node(&mut self, node_type: &str, name: &str) -> Result<NodeHandle, HostError> {
        if node_type.is_empty() {
            return Err(HostError::UnknownNodeType(node_type.to_string()));
        }
        self.create(node_type, name)
    }

    fn set_parent(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<(), HostError> {
        let child_idx = self.slot(child)?;
        let parent_idx = self.slot(parent)?;
        if child_idx == parent_idx {
            return Err(HostError::Rejected(
                "cannot parent a node to itself".to_string(),
            ));
        }
        let previous = self.nodes[child_idx].parent;
        self.detach(child_idx);
        self.nodes[child_idx].parent = Some(parent_idx);
        self.nodes[parent_idx].children.push(child_idx);
        self.record(Op::Parented {
            child: child_idx,
            previous,
        });
        Ok(())
    }

    fn rename(&mut self, node: NodeHandle, name: &str) -> Result<(), HostError> {
        let idx = self.slot(node)?;
        if name.is_empty() {
            return Err(HostError::Rejected("empty node name".to_string()));
        }
        if let Some(existing) = self.find(name) {
            if existing != node {
                return Err(HostError::DuplicateName(name.to_string()));
            }
        }
        let previous = std::mem::replace(&mut self.nodes[idx].name, name.to_string());
        self.record(Op::Renamed {
            node: idx,
            previous,
        });
        Ok(())
    }

    fn connect_attr(
        &mut self,
        src: NodeHandle,
        src_attr: &str,
        dst: NodeHandle,
        dst_attr: &str,
    ) -> Result<(), HostError> {
        self.slot(src)?;
        self.slot(dst)?;
        if src_attr.is_empty() || dst_attr.is_empty() {
            return Err(HostError::Rejected("empty attribute name".to_string()));
        }
        self.connections.push(Connection {
            src,
            src_attr: src_attr.to_string(),
            dst,
            dst_attr: dst_attr.to_string(),
        });
        self.record(Op::Connected(self.connections.len() - 1));
        Ok(())
    }

    fn set_attr(
        &mut self,
        node: NodeHandle,
        attr: &str,
        value: AttrValue,
    ) -> Result<(), HostError> {
        let idx = self.slot(node)?;
        let previous = self.nodes[idx].attrs.insert(attr.to_string(), value);
        self.record(Op::AttrSet {
            node: idx,
            attr: attr.to_string(),
            previous,
        });
        Ok(())
    }

    fn add_attr(&mut self, node: NodeHandle, spec: &AttrSpec) -> Result<(), HostError> {
        let idx = self.slot(node)?;
        if self.nodes[idx].user_attrs.iter().any(|a| a.name == spec.name) {
            return Err(HostError::Rejected(format!(
                "attribute already exists: {}",
                spec.name
            )));
        }
        let initial = match &spec.kind {
            AttrKind::Double { default, .. } => AttrValue::Float(*default),
            AttrKind::Enum { .. } => AttrValue::Int(0),
        };
        self.nodes[idx].attrs.insert(spec.name.clone(), initial);
        self.nodes[idx].user_attrs.push(spec.clone());
        self.record(Op::AttrAdded {
            node: idx,
            name: spec.name.clone(),
        });
        Ok(())
    }

    fn lock_attr(&mut self, node: NodeHandle, attr: &str, hide: bool) -> Result<(), HostError> {
        let idx = self.slot(node)?;
        if attr.is_empty() {
            return Err(HostError::Rejected("empty attribute name".to_string()));
        }
        let previous = self.nodes[idx].locks.insert(attr.to_string(), hide);
        self.record(Op::Locked {
            node: idx,
            attr: attr.to_string(),
            previous,
        });
        Ok(())
    }

    fn set_color(&mut self, node: NodeHandle, color: Rgb) -> Result<(), HostError> {
        let idx = self.slot(node)?;
        let previous = self.nodes[idx].color.replace(color);
        self.record(Op::Colored {
            node: idx,
            previous,
        });
        Ok(())
    }

    fn begin_undo_chunk(&mut self) {
        if self.chunk_depth == 0 {
            self.current_chunk.clear();
        }
        self.chunk_depth += 1;
    }

    fn end_undo_chunk(&mut self) {
        if self.chunk_depth == 0 {
            return;
        }
        self.chunk_depth -= 1;
        if self.chunk_depth == 0 {
            self.closed_chunk = std::mem::take(&mut self.current_chunk);
        }
    }

    fn undo_last_chunk(&mut self) {
        if self.chunk_depth != 0 {
            return;
        }
        let ops = std::mem::take(&mut self.closed_chunk);
        for op in ops.into_iter().rev() {
            match op {
                Op::Created(idx) => {
                    self.detach(idx);
                    self.nodes[idx].alive = false;
                    let dead = NodeHandle::new(idx as u64);
                    self.connections.retain(|c| c.src != dead && c.dst != dead);
                }
                Op::Parented { child, previous } => {
                    self.detach(child);
                    if let Some(parent) = previous {
                        self.nodes[child].parent = Some(parent);
                        self.nodes[parent].children.push(child);
                    }
                }
                Op::Renamed { node, previous } => {
                    self.nodes[node].name = previous;
                }
                Op::Connected(idx) => {
                    if idx < self.connections.len() {
                        self.connections.remove(idx);
                    }
                }
                Op::AttrSet {
                    node,
                    attr,
                    previous,
                } => match previous {
                    Some(value) => {
                        self.nodes[node].attrs.insert(attr, value);
                    }
                    None => {
                        self.nodes[node].attrs.remove(&attr);
                    }
                },
                Op::AttrAdded { node, name } => {
                    self.nodes[node].user_attrs.retain(|a| a.name != name);
                    self.nodes[node].attrs.remove(&name);
                }
                Op::Locked {
                    node,
                    attr,
                    previous,
                } => match previous {
                    Some(hide) => {
                        self.nodes[node].locks.insert(attr, hide);
                    }
                    None => {
                        self.nodes[node].locks.remove(&attr);
                    }
                },
                Op::Colored { node, previous } => {
                    self.nodes[node].color = previous;
                }
            }
        }
    }
}
