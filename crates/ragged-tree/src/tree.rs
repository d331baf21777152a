//! Arena-backed node model for ragged nested data.
//!
//! Nodes live in a `Vec` owned by the [`Tree`] and are referenced through
//! stable [`NodeId`] handles, so structural edits are index swaps that never
//! invalidate sibling handles. The parent back-reference is an id, not an
//! owning pointer; ownership only flows parent to children.

use serde_json::Value;

use crate::TreeError;

/// Stable handle to a node within a [`Tree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// Closed node variant: a leaf holding one scalar, or an array of children.
#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Leaf(Value),
    Array(Vec<NodeId>),
}

#[derive(Clone, Debug)]
pub(crate) struct NodeEntry {
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: i32,
    pub(crate) index: u32,
    pub(crate) kind: NodeKind,
}

/// A tree over an arbitrarily deep, ragged, heterogeneous nested value.
///
/// Built once from host data with [`Tree::from_data`], optionally mutated in
/// place, and read back out with [`Tree::data`]. Entries detached by
/// structural edits (replaced subtrees, pre-wrap roots) stay in the arena as
/// garbage until the tree is dropped; no node is ever shared between trees.
#[derive(Clone, Debug)]
pub struct Tree {
    pub(crate) nodes: Vec<NodeEntry>,
    pub(crate) root: NodeId,
}

impl Tree {
    /// Build a tree from a nested value.
    ///
    /// `Value::Array` becomes an array node whose children are built
    /// recursively in order; any other value (strings included — they are
    /// never decomposed into characters) becomes a leaf holding the value
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`TreeError::NullData`] when `data` is `Value::Null` at the top
    /// level. Nested nulls are ordinary leaf values.
    ///
    /// # Example
    ///
    /// ```
    /// use ragged_tree::Tree;
    /// use serde_json::json;
    ///
    /// let tree = Tree::from_data(&json!(["foo", ["A", "B", "C"], [0, 1, 2]])).unwrap();
    /// assert_eq!(tree.depth(tree.root()), 3);
    /// assert_eq!(tree.leaf_nodes(tree.root()).len(), 7);
    /// ```
    pub fn from_data(data: &Value) -> Result<Self, TreeError> {
        if data.is_null() {
            return Err(TreeError::NullData);
        }
        let mut tree = Tree {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        let root = tree.build(data, None, 0, 0);
        tree.root = root;
        Ok(tree)
    }

    fn build(&mut self, data: &Value, parent: Option<NodeId>, level: i32, index: u32) -> NodeId {
        match data {
            Value::Array(items) => {
                let id = self.alloc(NodeEntry {
                    parent,
                    level,
                    index,
                    kind: NodeKind::Array(Vec::with_capacity(items.len())),
                });
                let children: Vec<NodeId> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.build(item, Some(id), level + 1, i as u32))
                    .collect();
                if let NodeKind::Array(slots) = &mut self.entry_mut(id).kind {
                    *slots = children;
                }
                id
            }
            scalar => self.alloc(NodeEntry {
                parent,
                level,
                index,
                kind: NodeKind::Leaf(scalar.clone()),
            }),
        }
    }

    pub(crate) fn alloc(&mut self, entry: NodeEntry) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(entry);
        id
    }

    pub(crate) fn entry(&self, id: NodeId) -> &NodeEntry {
        &self.nodes[id.0 as usize]
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> &mut NodeEntry {
        &mut self.nodes[id.0 as usize]
    }

    /// The current root of the tree.
    ///
    /// Reflects synthetic re-rooting performed by negative-level resolution
    /// (see [`Tree::wrap_in_synthetic_roots`]).
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.entry(id).kind, NodeKind::Leaf(_))
    }

    pub fn is_array(&self, id: NodeId) -> bool {
        matches!(self.entry(id).kind, NodeKind::Array(_))
    }

    /// Parent of the node; `None` marks the root (or a detached entry).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entry(id).parent
    }

    /// Distance from the root. Root nodes are at level 0.
    pub fn level(&self, id: NodeId) -> i32 {
        self.entry(id).level
    }

    /// Position of the node within its parent's child sequence.
    pub fn index(&self, id: NodeId) -> u32 {
        self.entry(id).index
    }

    /// Children of an array node; empty for leaves.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.entry(id).kind {
            NodeKind::Array(children) => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    /// Reconstruct the nested value rooted at `id`.
    ///
    /// For a leaf this is the stored scalar; for an array it is the
    /// recursive, order-preserving collection of each child's data. Always
    /// rebuilt from the current tree state, never cached.
    pub fn data(&self, id: NodeId) -> Value {
        match &self.entry(id).kind {
            NodeKind::Leaf(value) => value.clone(),
            NodeKind::Array(children) => {
                Value::Array(children.iter().map(|&child| self.data(child)).collect())
            }
        }
    }

    /// Depth of the subtree rooted at `id`: one more than the deepest leaf
    /// descendant, relative to `id`. A bare leaf has depth 1.
    pub fn depth(&self, id: NodeId) -> i32 {
        let base = self.level(id);
        self.leaf_nodes(id)
            .iter()
            .map(|&leaf| self.level(leaf) - base + 1)
            .max()
            .unwrap_or(1)
    }

    /// All leaf descendants of `id` in document order; `id` itself when it
    /// is a leaf.
    pub fn leaf_nodes(&self, id: NodeId) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.collect_leaves(id, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, id: NodeId, leaves: &mut Vec<NodeId>) {
        match &self.entry(id).kind {
            NodeKind::Leaf(_) => leaves.push(id),
            NodeKind::Array(children) => {
                for &child in children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }

    /// The scalar values of all leaf descendants, in document order.
    pub fn leaf_data(&self, id: NodeId) -> Vec<Value> {
        self.leaf_nodes(id)
            .into_iter()
            .map(|leaf| self.data(leaf))
            .collect()
    }

    /// Deep-copy the subtree rooted at `src_id` in `src` into this tree's
    /// arena, returning the copy's root. The copy is detached (no parent)
    /// until attached with [`Tree::add_child`] or [`Tree::replace_child`],
    /// which also settle its levels. Nodes are never shared between trees.
    pub fn adopt(&mut self, src: &Tree, src_id: NodeId) -> NodeId {
        self.adopt_node(src, src_id, None, src.level(src_id), src.index(src_id))
    }

    fn adopt_node(
        &mut self,
        src: &Tree,
        src_id: NodeId,
        parent: Option<NodeId>,
        level: i32,
        index: u32,
    ) -> NodeId {
        match &src.entry(src_id).kind {
            NodeKind::Leaf(value) => self.alloc(NodeEntry {
                parent,
                level,
                index,
                kind: NodeKind::Leaf(value.clone()),
            }),
            NodeKind::Array(src_children) => {
                let id = self.alloc(NodeEntry {
                    parent,
                    level,
                    index,
                    kind: NodeKind::Array(Vec::with_capacity(src_children.len())),
                });
                let children: Vec<NodeId> = src_children
                    .iter()
                    .enumerate()
                    .map(|(i, &child)| self.adopt_node(src, child, Some(id), level + 1, i as u32))
                    .collect();
                if let NodeKind::Array(slots) = &mut self.entry_mut(id).kind {
                    *slots = children;
                }
                id
            }
        }
    }

    /// Recompute levels of the whole subtree rooted at `id`, assigning
    /// `level` to `id` itself. Called on every reattachment so the
    /// `child.level == parent.level + 1` invariant holds transitively.
    pub(crate) fn set_levels_from(&mut self, id: NodeId, level: i32) {
        self.entry_mut(id).level = level;
        if let NodeKind::Array(children) = &self.entry(id).kind {
            for child in children.clone() {
                self.set_levels_from(child, level + 1);
            }
        }
    }
}
