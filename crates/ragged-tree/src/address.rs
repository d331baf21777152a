//! Address navigation over a built tree: resolve a path of child indices
//! to a node, and rebuild the address of any node.
//!
//! The data-level walk (no tree required) lives in the
//! `ragged-tree-address` crate and is re-exported at the crate root.

use ragged_tree_address::{AddressError, AddressStep};

use crate::tree::{NodeId, NodeKind, Tree};
use crate::TreeError;

impl Tree {
    /// Resolve an address to a node, starting at the root.
    ///
    /// Each step selects a child by index. Reaching a leaf before the
    /// address is exhausted stops the walk at that leaf; surplus trailing
    /// indices are ignored.
    ///
    /// # Errors
    ///
    /// [`TreeError::Address`] when a step indexes past an array's width.
    pub fn node_at_address(&self, address: &[AddressStep]) -> Result<NodeId, TreeError> {
        let mut current = self.root;
        for &step in address {
            match &self.entry(current).kind {
                NodeKind::Array(children) => match children.get(step) {
                    Some(&child) => current = child,
                    None => {
                        return Err(TreeError::Address(AddressError::OutOfRange {
                            index: step,
                            len: children.len(),
                        }))
                    }
                },
                NodeKind::Leaf(_) => return Ok(current),
            }
        }
        Ok(current)
    }

    /// Rebuild the address of `id`: the path of child indices from the
    /// root down to it.
    ///
    /// Positions are recovered by identity among each parent's children,
    /// so the result is correct even after structural edits. A detached
    /// node yields the address of its own (dangling) subtree root.
    pub fn address_of(&self, id: NodeId) -> Vec<AddressStep> {
        let mut address = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if let NodeKind::Array(children) = &self.entry(parent).kind {
                if let Some(position) = children.iter().position(|&child| child == current) {
                    address.push(position);
                }
            }
            current = parent;
        }
        address.reverse();
        address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_at_address_walks_children() {
        let tree = Tree::from_data(&json!(["foo", ["A", "B", "C"], [0, 1, 2]])).unwrap();
        let node = tree.node_at_address(&[1, 2]).unwrap();
        assert_eq!(tree.data(node), json!("C"));
        assert_eq!(tree.node_at_address(&[]).unwrap(), tree.root());
    }

    #[test]
    fn node_at_address_stops_at_leaves() {
        let tree = Tree::from_data(&json!(["foo", ["A"]])).unwrap();
        let node = tree.node_at_address(&[0, 4, 4]).unwrap();
        assert_eq!(tree.data(node), json!("foo"));
    }

    #[test]
    fn node_at_address_out_of_range() {
        let tree = Tree::from_data(&json!([["A", "B"]])).unwrap();
        let err = tree.node_at_address(&[0, 2]).unwrap_err();
        assert!(matches!(
            err,
            TreeError::Address(AddressError::OutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn address_of_inverts_resolution() {
        let tree = Tree::from_data(&json!(["foo", ["A", ["B", "C"]], [0, 1]])).unwrap();
        for address in [vec![], vec![0], vec![1, 1, 0], vec![2, 1]] {
            let node = tree.node_at_address(&address).unwrap();
            assert_eq!(tree.address_of(node), address);
        }
    }

    #[test]
    fn address_of_survives_structural_edits() {
        let mut tree = Tree::from_data(&json!(["a", "b"])).unwrap();
        let root = tree.root();
        let old = tree.children(root)[0];
        let donor = Tree::from_data(&json!(["x", "y"])).unwrap();
        let new = tree.adopt(&donor, donor.root());
        tree.replace_child(root, old, new).unwrap();

        assert_eq!(tree.address_of(new), vec![0]);
        assert_eq!(tree.address_of(tree.children(new)[1]), vec![0, 1]);
        // The detached node no longer has an address below the root.
        assert_eq!(tree.address_of(old), Vec::<usize>::new());
    }
}
