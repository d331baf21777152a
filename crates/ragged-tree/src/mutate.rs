//! In-place structural edits: child replacement, child append, and the
//! recursive null-fill used to mask a sub-region before a merge.

use serde_json::Value;

use crate::tree::{NodeId, NodeKind, Tree};
use crate::TreeError;

impl Tree {
    /// Substitute `new` for `old` among `parent`'s children, at the same
    /// position.
    ///
    /// `old` is located by identity. The replaced subtree is detached and
    /// left behind in the arena; `new` is reparented, reindexed, and has
    /// the levels of its entire subtree recomputed from
    /// `parent.level + 1`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StructuralConflict`] when `parent` is a leaf or does
    /// not contain `old`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        old: NodeId,
        new: NodeId,
    ) -> Result<(), TreeError> {
        let parent_level = self.level(parent);
        let position = match &self.entry(parent).kind {
            NodeKind::Array(children) => children.iter().position(|&child| child == old),
            NodeKind::Leaf(_) => {
                return Err(TreeError::StructuralConflict(
                    "cannot replace a child of a leaf node".into(),
                ))
            }
        };
        let Some(position) = position else {
            return Err(TreeError::StructuralConflict(
                "node is not a child of the given parent".into(),
            ));
        };
        if let NodeKind::Array(children) = &mut self.entry_mut(parent).kind {
            children[position] = new;
        }
        self.entry_mut(old).parent = None;
        let entry = self.entry_mut(new);
        entry.parent = Some(parent);
        entry.index = position as u32;
        self.set_levels_from(new, parent_level + 1);
        Ok(())
    }

    /// Append `child` to `parent`'s children, reparenting it and
    /// recomputing its subtree's levels from `parent.level + 1`.
    ///
    /// # Errors
    ///
    /// [`TreeError::StructuralConflict`] when `parent` is a leaf.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let parent_level = self.level(parent);
        let position = match &mut self.entry_mut(parent).kind {
            NodeKind::Array(children) => {
                children.push(child);
                children.len() - 1
            }
            NodeKind::Leaf(_) => {
                return Err(TreeError::StructuralConflict(
                    "cannot add a child to a leaf node".into(),
                ))
            }
        };
        let entry = self.entry_mut(child);
        entry.parent = Some(parent);
        entry.index = position as u32;
        self.set_levels_from(child, parent_level + 1);
        Ok(())
    }

    /// Null the scalar of every leaf at or below `level`, starting from
    /// `id`.
    ///
    /// Resolves [`Tree::nodes_at_level`] (so a negative `level` re-roots
    /// the tree first), then sets each resolved node's leaf descendants —
    /// or the node itself when it is already a leaf — to `Value::Null`.
    /// Purely a value edit: the shape and leaf count are unchanged.
    pub fn null_at_level_and_below(&mut self, id: NodeId, level: i32) {
        for node in self.nodes_at_level(id, level) {
            for leaf in self.leaf_nodes(node) {
                self.entry_mut(leaf).kind = NodeKind::Leaf(Value::Null);
            }
        }
    }
}
