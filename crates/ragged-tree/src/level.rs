//! Level navigation.
//!
//! A level is a depth coordinate over the tree: non-negative levels count
//! down from the root (root = 0), negative levels count up from the leaves
//! (-1 = the leaves themselves). The dual addressing lets callers ask for
//! "the row just above the leaves" without knowing a ragged tree's absolute
//! depth.

use serde_json::Value;

use crate::tree::{NodeEntry, NodeId, NodeKind, Tree};
use crate::TreeError;

impl Tree {
    /// Nodes at `level`, starting from `id`.
    ///
    /// Non-negative levels resolve by pure descent
    /// ([`Tree::descendants_at_level`]). Negative levels are leaf-relative
    /// and resolve by synthetic re-rooting: this is a structural side
    /// effect, not a pure query — see [`Tree::wrap_in_synthetic_roots`].
    pub fn nodes_at_level(&mut self, id: NodeId, level: i32) -> Vec<NodeId> {
        if level < 0 {
            return vec![self.wrap_in_synthetic_roots(id, level)];
        }
        self.descendants_at_level(id, level)
    }

    /// Nodes at a non-negative `level`, starting from `id`, in document
    /// order. A node above `level` contributes its matching descendants;
    /// leaves shallower than `level` contribute nothing.
    pub fn descendants_at_level(&self, id: NodeId, level: i32) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        self.collect_at_level(id, level, &mut nodes);
        nodes
    }

    fn collect_at_level(&self, id: NodeId, level: i32, nodes: &mut Vec<NodeId>) {
        let node_level = self.level(id);
        if node_level == level {
            nodes.push(id);
            return;
        }
        if node_level > level {
            return;
        }
        if let NodeKind::Array(children) = &self.entry(id).kind {
            for &child in children {
                self.collect_at_level(child, level, nodes);
            }
        }
    }

    /// Resolve a negative, leaf-relative `level` by wrapping `id` in
    /// synthetic single-child array roots, one per step, and return the
    /// final synthetic root.
    ///
    /// This mutates the tree: the wrapped node's parent pointer is aimed at
    /// the wrapper, the wrapped subtree shifts down one level per wrap, and
    /// when `id` was the root the tree's root changes. Callers passing
    /// negative levels to [`Tree::nodes_at_level`] must expect the new
    /// effective root. For `level >= 0` this is a no-op returning `id`.
    pub fn wrap_in_synthetic_roots(&mut self, id: NodeId, level: i32) -> NodeId {
        let mut current = id;
        let mut count = 0;
        while count > level {
            current = self.wrap_once(current);
            count -= 1;
        }
        current
    }

    fn wrap_once(&mut self, id: NodeId) -> NodeId {
        let level = self.level(id);
        let index = self.index(id);
        let wrapper = self.alloc(NodeEntry {
            parent: None,
            level,
            index,
            kind: NodeKind::Array(vec![id]),
        });
        let entry = self.entry_mut(id);
        entry.parent = Some(wrapper);
        entry.index = 0;
        // The wrapper takes the wrapped node's old level; the subtree moves
        // down one, keeping child levels consistent all the way.
        self.set_levels_from(id, level + 1);
        if self.root == id {
            self.root = wrapper;
        }
        wrapper
    }

    /// Data of the nodes at `level`, starting from `id`.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidLevel`] when `level` is not shallower than the
    /// subtree's depth.
    ///
    /// # Example
    ///
    /// ```
    /// use ragged_tree::Tree;
    /// use serde_json::json;
    ///
    /// let mut tree = Tree::from_data(&json!(["foo", ["A", "B", "C"]])).unwrap();
    /// let root = tree.root();
    /// let row = tree.data_at_level(root, 1).unwrap();
    /// assert_eq!(row, vec![json!("foo"), json!(["A", "B", "C"])]);
    /// ```
    pub fn data_at_level(&mut self, id: NodeId, level: i32) -> Result<Vec<Value>, TreeError> {
        let depth = self.depth(id);
        if level >= depth {
            return Err(TreeError::InvalidLevel { level, depth });
        }
        Ok(self
            .nodes_at_level(id, level)
            .into_iter()
            .map(|node| self.data(node))
            .collect())
    }
}
