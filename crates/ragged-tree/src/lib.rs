//! ragged-tree — a tree model for arbitrarily deep, ragged, heterogeneous
//! nested data, with level- and address-based navigation, masking, and
//! structural "superimpose" merges.
//!
//! Host data is `serde_json::Value`: arrays are ordered collections, and
//! everything else (strings included) is an atomic scalar. Sibling
//! subtrees may differ in depth and width. Levels address rows either
//! absolutely from the root (non-negative, root = 0) or relative to the
//! leaves (negative, -1 = the leaves); addresses are flat paths of child
//! indices.
//!
//! # Example
//!
//! ```
//! use ragged_tree::{get_data_at_address, superimpose_data_at_level};
//! use serde_json::json;
//!
//! let base = json!(["foo", ["A", "B", "C"], [0, 1, 2]]);
//! let overlay = json!(["foobar", "foobuzz", "foobarbuzz", "foobuzzbar"]);
//!
//! // Merge the overlay over the leaves, nulling whatever it misses.
//! let merged = superimpose_data_at_level(&base, &overlay, -1, true).unwrap();
//! assert_eq!(get_data_at_address(&merged, &[0, 1, 0]).unwrap(), json!("foobar"));
//! assert_eq!(get_data_at_address(&merged, &[0, 2, 0]).unwrap(), json!("foobuzzbar"));
//! ```
//!
//! The tree itself ([`Tree`]) is single-threaded and mutated in place; a
//! failed merge leaves it in an unspecified intermediate state, so callers
//! needing atomicity should clone first.

use serde_json::Value;
use thiserror::Error;

mod address;
mod level;
mod mutate;
mod superimpose;
mod tree;

pub use ragged_tree_address::{Address, AddressError, AddressStep};
pub use superimpose::superimpose_data_at_level;
pub use tree::{NodeId, Tree};

/// Rows of data at a level of a nested value.
///
/// Builds the tree and resolves `level` (leaf-relative when negative; a
/// negative level's synthetic re-rooting happens on the internal tree and
/// shapes the returned row).
///
/// # Errors
///
/// - [`TreeError::NullData`] when `data` is null.
/// - [`TreeError::InvalidLevel`] when `level` is not shallower than the
///   tree's depth.
///
/// # Example
///
/// ```
/// use ragged_tree::get_data_at_level;
/// use serde_json::json;
///
/// let data = json!(["foo", ["A", "B", "C"], [0, 1, 2]]);
/// let row = get_data_at_level(&data, 1).unwrap();
/// assert_eq!(row[0], json!("foo"));
/// ```
pub fn get_data_at_level(data: &Value, level: i32) -> Result<Vec<Value>, TreeError> {
    let mut tree = Tree::from_data(data)?;
    let root = tree.root();
    tree.data_at_level(root, level)
}

/// The value selected by an address path in a nested value.
///
/// # Errors
///
/// [`TreeError::Address`] when a step indexes past an array's width.
///
/// # Example
///
/// ```
/// use ragged_tree::get_data_at_address;
/// use serde_json::json;
///
/// let data = json!(["foo", ["A", "B", "C"]]);
/// assert_eq!(get_data_at_address(&data, &[1, 2]).unwrap(), json!("C"));
/// ```
pub fn get_data_at_address(data: &Value, address: &[AddressStep]) -> Result<Value, TreeError> {
    Ok(ragged_tree_address::get_data_at_address(data, address)?)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A required input value is null.
    #[error("cannot build a tree from null data")]
    NullData,
    /// A requested level is not shallower than the tree's depth.
    #[error("level {level} is not shallower than the tree depth {depth}")]
    InvalidLevel { level: i32, depth: i32 },
    /// An edit would discard structure, or a node is absent from its
    /// claimed parent.
    #[error("structural conflict: {0}")]
    StructuralConflict(String),
    /// An address path indexes beyond a node's child count.
    #[error(transparent)]
    Address(#[from] AddressError),
}
