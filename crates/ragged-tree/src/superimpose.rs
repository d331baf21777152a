//! Structural merge: overlay one tree onto another.
//!
//! Superimposing copies overlay scalars onto target leaves, widens target
//! leaves into overlay subtrees, and walks matching array positions
//! recursively. It never narrows: an array position overwritten by a scalar
//! would silently discard data and is a structural conflict.

use serde_json::Value;

use crate::tree::{NodeId, NodeKind, Tree};
use crate::TreeError;

impl Tree {
    /// Merge the overlay subtree at `overlay_id` onto the target subtree at
    /// `target_id`, in place.
    ///
    /// - leaf onto leaf: the overlay scalar is copied over.
    /// - array onto leaf: the leaf is replaced by a copy of the overlay
    ///   subtree (structural widening). A leaf at the tree root is widened
    ///   by re-rooting.
    /// - leaf onto array: [`TreeError::StructuralConflict`].
    /// - array onto array: positions are walked pairwise; overlay children
    ///   past the target's width are appended, target children past the
    ///   overlay's width are left untouched.
    pub fn superimpose(
        &mut self,
        target_id: NodeId,
        overlay: &Tree,
        overlay_id: NodeId,
    ) -> Result<(), TreeError> {
        match (self.is_leaf(target_id), overlay.is_leaf(overlay_id)) {
            (true, true) => {
                self.entry_mut(target_id).kind = NodeKind::Leaf(overlay.data(overlay_id));
                Ok(())
            }
            (true, false) => {
                let widened = self.adopt(overlay, overlay_id);
                match self.parent(target_id) {
                    Some(parent) => self.replace_child(parent, target_id, widened),
                    None => {
                        // The whole target is a bare leaf: the overlay
                        // subtree becomes the new root.
                        let entry = self.entry_mut(widened);
                        entry.index = 0;
                        self.set_levels_from(widened, 0);
                        self.entry_mut(target_id).parent = None;
                        self.root = widened;
                        Ok(())
                    }
                }
            }
            (false, true) => Err(TreeError::StructuralConflict(
                "cannot superimpose a scalar onto an array position".into(),
            )),
            (false, false) => {
                let target_children = self.children(target_id).to_vec();
                let overlay_children = overlay.children(overlay_id).to_vec();
                let width = target_children.len().max(overlay_children.len());
                for i in 0..width {
                    if i >= overlay_children.len() {
                        // Overlay exhausted: remaining target children stay.
                        break;
                    }
                    if i >= target_children.len() {
                        let widened = self.adopt(overlay, overlay_children[i]);
                        self.add_child(target_id, widened)?;
                    } else {
                        self.superimpose(target_children[i], overlay, overlay_children[i])?;
                    }
                }
                Ok(())
            }
        }
    }

    /// Superimpose the overlay's nodes onto the groups of `self` that sit
    /// at `level` below `id`.
    ///
    /// The overlay is always entered at the fixed level 1 below its own
    /// root — one overlay child per target group, paired in order — never
    /// at `overlay.depth() - 1`. The zip stops when the overlay runs out;
    /// excess target groups are left unmerged.
    pub fn overwrite_at_level(
        &mut self,
        id: NodeId,
        overlay: &Tree,
        level: i32,
    ) -> Result<(), TreeError> {
        let target_nodes = self.nodes_at_level(id, level);
        let overlay_nodes = overlay.descendants_at_level(overlay.root(), 1);
        for (target_node, overlay_node) in target_nodes.into_iter().zip(overlay_nodes) {
            self.superimpose(target_node, overlay, overlay_node)?;
        }
        Ok(())
    }
}

/// Merge `overlay_data` onto `data` at a leaf-relative `level` and return
/// the resulting nested value.
///
/// The base is built into a tree; a negative `level` first re-roots it with
/// one synthetic wrapper per step (the wrappers are part of the output
/// shape), then the level is converted to the absolute row
/// `depth(effective root) + level`. With `clear_below` set, every leaf at
/// or below that row is nulled before the overlay is merged in, so target
/// values not reached by the overlay read back as null.
///
/// A non-negative `level` resolves to a row at or past the leaves, selects
/// no target groups, and returns the base unchanged (the clear pass is
/// likewise a no-op there).
///
/// # Errors
///
/// - [`TreeError::NullData`] when either input is null.
/// - [`TreeError::StructuralConflict`] when the overlay would narrow an
///   array position into a scalar.
///
/// # Example
///
/// ```
/// use ragged_tree::superimpose_data_at_level;
/// use serde_json::json;
///
/// let base = json!([["A", "B", "C"], ["A", "B", "C"]]);
/// let overlay = json!([0, 1, [2, 3]]);
/// let merged = superimpose_data_at_level(&base, &overlay, -1, false).unwrap();
/// assert_eq!(merged, json!([[[0, 1, [2, 3]], ["A", "B", "C"]]]));
/// ```
pub fn superimpose_data_at_level(
    data: &Value,
    overlay_data: &Value,
    level: i32,
    clear_below: bool,
) -> Result<Value, TreeError> {
    let mut target = Tree::from_data(data)?;
    let overlay = Tree::from_data(overlay_data)?;

    let base_root = target.root();
    let root = target.wrap_in_synthetic_roots(base_root, level);
    let absolute = target.depth(root) + level;
    if clear_below {
        target.null_at_level_and_below(root, absolute);
    }
    target.overwrite_at_level(root, &overlay, absolute)?;
    Ok(target.data(target.root()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jagged() -> Value {
        json!(["foo", ["A", "B", "C"], [0, 1, 2]])
    }

    #[test]
    fn leaf_onto_leaf_copies_the_scalar() {
        let mut target = Tree::from_data(&json!(["a", "b"])).unwrap();
        let overlay = Tree::from_data(&json!(["x", "y"])).unwrap();
        let root = target.root();
        target.superimpose(root, &overlay, overlay.root()).unwrap();
        assert_eq!(target.data(root), json!(["x", "y"]));
    }

    #[test]
    fn array_onto_leaf_widens() {
        let mut target = Tree::from_data(&json!(["a", "b"])).unwrap();
        let overlay = Tree::from_data(&json!([["x", "y"], "z"])).unwrap();
        let root = target.root();
        target.superimpose(root, &overlay, overlay.root()).unwrap();
        assert_eq!(target.data(root), json!([["x", "y"], "z"]));
        // The widened position carries correct levels.
        let widened = target.children(root)[0];
        assert_eq!(target.level(widened), 1);
        assert_eq!(target.level(target.children(widened)[0]), 2);
    }

    #[test]
    fn leaf_onto_array_is_a_conflict() {
        let mut target = Tree::from_data(&json!([["a"], "b"])).unwrap();
        let overlay = Tree::from_data(&json!(["x", "y"])).unwrap();
        let root = target.root();
        let err = target.superimpose(root, &overlay, overlay.root()).unwrap_err();
        assert!(matches!(err, TreeError::StructuralConflict(_)));
    }

    #[test]
    fn wider_overlay_appends_children() {
        let mut target = Tree::from_data(&json!(["a"])).unwrap();
        let overlay = Tree::from_data(&json!(["x", "y", ["z"]])).unwrap();
        let root = target.root();
        target.superimpose(root, &overlay, overlay.root()).unwrap();
        assert_eq!(target.data(root), json!(["x", "y", ["z"]]));
    }

    #[test]
    fn narrower_overlay_leaves_the_rest() {
        let mut target = Tree::from_data(&json!(["a", "b", "c"])).unwrap();
        let overlay = Tree::from_data(&json!(["x"])).unwrap();
        let root = target.root();
        target.superimpose(root, &overlay, overlay.root()).unwrap();
        assert_eq!(target.data(root), json!(["x", "b", "c"]));
    }

    #[test]
    fn self_superimpose_is_idempotent() {
        let mut target = Tree::from_data(&jagged()).unwrap();
        let clone = target.clone();
        let root = target.root();
        target.superimpose(root, &clone, clone.root()).unwrap();
        assert_eq!(target.data(root), jagged());
    }

    #[test]
    fn bare_leaf_root_widens_by_rerooting() {
        let mut target = Tree::from_data(&json!("scalar")).unwrap();
        let overlay = Tree::from_data(&json!(["x", "y"])).unwrap();
        let root = target.root();
        target.superimpose(root, &overlay, overlay.root()).unwrap();
        assert_eq!(target.data(target.root()), json!(["x", "y"]));
        assert_eq!(target.level(target.root()), 0);
    }

    #[test]
    fn overwrite_with_smaller_overlay() {
        let mut target = Tree::from_data(&jagged()).unwrap();
        let root = target.root();
        target.null_at_level_and_below(root, 2);
        let overlay = Tree::from_data(&json!(["foobar", "foobuzz"])).unwrap();
        target.overwrite_at_level(root, &overlay, 2).unwrap();
        let row = target.data_at_level(root, 2).unwrap();
        assert_eq!(row[0], json!("foobar"));
        assert_eq!(row[1], json!("foobuzz"));
        assert!(row[2..].iter().all(Value::is_null));
    }

    #[test]
    fn overwrite_with_larger_overlay() {
        let mut target = Tree::from_data(&jagged()).unwrap();
        let root = target.root();
        target.null_at_level_and_below(root, 2);
        let overlay =
            Tree::from_data(&json!(["foobar", "foobuzz", "foobarbuzz", "foobuzzbar"])).unwrap();
        target.overwrite_at_level(root, &overlay, 2).unwrap();
        let row = target.data_at_level(root, 2).unwrap();
        assert_eq!(row[0], json!("foobar"));
        assert_eq!(row[3], json!("foobuzzbar"));
    }

    #[test]
    fn overwrite_with_two_dimensional_overlay_widens_leaves() {
        let mut target = Tree::from_data(&jagged()).unwrap();
        let root = target.root();
        target.null_at_level_and_below(root, 2);
        let overlay = Tree::from_data(&json!([["foobar", "foobuzz"], ["foobarbuzz", "foobuzzbar"]]))
            .unwrap();
        target.overwrite_at_level(root, &overlay, 2).unwrap();
        // The first two level-2 leaves are widened into arrays.
        assert_eq!(
            target.data(root),
            json!([
                "foo",
                [["foobar", "foobuzz"], ["foobarbuzz", "foobuzzbar"], null],
                [null, null, null]
            ])
        );
    }

    #[test]
    fn overwrite_pairs_equal_shapes() {
        let data = json!([
            [["A", "B", "C"], ["D", "E", "F"]],
            [["a", "b", "c"], ["d", "e", "f"]]
        ]);
        let mut target = Tree::from_data(&data).unwrap();
        let root = target.root();
        target.null_at_level_and_below(root, 2);
        let overlay = Tree::from_data(&json!([["A0", "B1"], ["D5", "E6"]])).unwrap();
        target.overwrite_at_level(root, &overlay, 2).unwrap();
        // Two overlay groups merge into the first two target groups; the
        // third leaf of each merged group and the whole second half stay
        // nulled.
        assert_eq!(
            target.data(root),
            json!([
                [["A0", "B1", null], ["D5", "E6", null]],
                [[null, null, null], [null, null, null]]
            ])
        );
    }
}
