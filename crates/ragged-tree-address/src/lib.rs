//! Flat child-index addresses over nested JSON data.
//!
//! An *address* is an ordered sequence of non-negative child indices, read
//! root-first, selecting one element of an arbitrarily nested (possibly
//! ragged) array value. Strings are atomic: an address never indexes into
//! the characters of a string.
//!
//! # Example
//!
//! ```
//! use ragged_tree_address::{get, format_address, parse_address};
//! use serde_json::json;
//!
//! let doc = json!(["foo", ["A", "B", "C"], [0, 1, 2]]);
//!
//! assert_eq!(get(&doc, &[1, 2]), Some(&json!("C")));
//! assert_eq!(format_address(&[1, 2]), "/1/2");
//! assert_eq!(parse_address("/1/2").unwrap(), vec![1, 2]);
//! ```

use serde_json::Value;
use thiserror::Error;

/// A step in an address: a child index within an array value.
pub type AddressStep = usize;

/// An address: a path of child indices from the root.
pub type Address = Vec<AddressStep>;

/// Resolve an address against a nested value.
///
/// Walks the value array by array. If a scalar is reached before the
/// address is exhausted the walk stops early and that scalar is returned:
/// the surplus trailing indices are ignored. Returns `None` when an index
/// is past the end of an array.
///
/// # Example
///
/// ```
/// use ragged_tree_address::get;
/// use serde_json::json;
///
/// let doc = json!([[1, 2], "leaf"]);
/// assert_eq!(get(&doc, &[0, 1]), Some(&json!(2)));
/// // Scalar reached early: remaining steps are ignored.
/// assert_eq!(get(&doc, &[1, 0, 0]), Some(&json!("leaf")));
/// assert_eq!(get(&doc, &[0, 5]), None);
/// ```
pub fn get<'a>(val: &'a Value, address: &[AddressStep]) -> Option<&'a Value> {
    let mut current = val;
    for &step in address {
        match current {
            Value::Array(arr) => current = arr.get(step)?,
            // Scalar reached before the address is exhausted.
            _ => return Some(current),
        }
    }
    Some(current)
}

/// Resolve an address against a nested value, returning the selected value
/// by clone.
///
/// Same walk as [`get`], but an index past the end of an array is reported
/// as [`AddressError::OutOfRange`] with the offending index and the array
/// length.
///
/// # Example
///
/// ```
/// use ragged_tree_address::{get_data_at_address, AddressError};
/// use serde_json::json;
///
/// let doc = json!(["foo", ["A", "B", "C"]]);
/// assert_eq!(get_data_at_address(&doc, &[1, 0]).unwrap(), json!("A"));
///
/// let err = get_data_at_address(&doc, &[1, 9]).unwrap_err();
/// assert_eq!(err, AddressError::OutOfRange { index: 9, len: 3 });
/// ```
pub fn get_data_at_address(val: &Value, address: &[AddressStep]) -> Result<Value, AddressError> {
    let mut current = val;
    for &step in address {
        match current {
            Value::Array(arr) => match arr.get(step) {
                Some(v) => current = v,
                None => {
                    return Err(AddressError::OutOfRange {
                        index: step,
                        len: arr.len(),
                    })
                }
            },
            _ => return Ok(current.clone()),
        }
    }
    Ok(current.clone())
}

/// Format an address as a `/`-separated string.
///
/// The root (empty) address formats as the empty string.
///
/// # Example
///
/// ```
/// use ragged_tree_address::format_address;
///
/// assert_eq!(format_address(&[]), "");
/// assert_eq!(format_address(&[0, 12, 3]), "/0/12/3");
/// ```
pub fn format_address(address: &[AddressStep]) -> String {
    let mut out = String::new();
    for step in address {
        out.push('/');
        out.push_str(&step.to_string());
    }
    out
}

/// Parse a `/`-separated address string.
///
/// The empty string parses to the root (empty) address.
///
/// # Errors
///
/// [`AddressError::InvalidStep`] when a component is not a non-negative
/// integer.
///
/// # Example
///
/// ```
/// use ragged_tree_address::parse_address;
///
/// assert_eq!(parse_address("").unwrap(), Vec::<usize>::new());
/// assert_eq!(parse_address("/0/12/3").unwrap(), vec![0, 12, 3]);
/// assert!(parse_address("/a").is_err());
/// ```
pub fn parse_address(address: &str) -> Result<Address, AddressError> {
    if address.is_empty() {
        return Ok(Vec::new());
    }
    address[1..]
        .split('/')
        .map(|step| {
            step.parse()
                .map_err(|_| AddressError::InvalidStep(step.to_string()))
        })
        .collect()
}

/// Check whether `prefix` addresses an ancestor of (or the same node as)
/// the node addressed by `address`.
pub fn is_prefix(prefix: &[AddressStep], address: &[AddressStep]) -> bool {
    if prefix.len() > address.len() {
        return false;
    }
    prefix.iter().zip(address).all(|(a, b)| a == b)
}

/// Get the parent address of a given address.
///
/// # Errors
///
/// [`AddressError::NoParent`] for the root (empty) address.
pub fn parent(address: &[AddressStep]) -> Result<Address, AddressError> {
    if address.is_empty() {
        return Err(AddressError::NoParent);
    }
    Ok(address[..address.len() - 1].to_vec())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("address index {index} is out of range for an array of {len} children")]
    OutOfRange { index: usize, len: usize },
    #[error("invalid address step: {0:?}")]
    InvalidStep(String),
    #[error("the root address has no parent")]
    NoParent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_root() {
        let doc = json!([1, 2, 3]);
        assert_eq!(get(&doc, &[]), Some(&doc));
        assert_eq!(get(&json!("scalar"), &[]), Some(&json!("scalar")));
    }

    #[test]
    fn get_nested() {
        let doc = json!([["A", "B"], ["C", ["D", "E"]]]);
        assert_eq!(get(&doc, &[0, 1]), Some(&json!("B")));
        assert_eq!(get(&doc, &[1, 1, 0]), Some(&json!("D")));
    }

    #[test]
    fn get_scalar_reached_early() {
        let doc = json!(["foo", ["A", "B"]]);
        assert_eq!(get(&doc, &[0, 3, 7]), Some(&json!("foo")));
    }

    #[test]
    fn get_string_is_atomic() {
        // Never index into the characters of a string.
        let doc = json!(["abc"]);
        assert_eq!(get(&doc, &[0, 1]), Some(&json!("abc")));
    }

    #[test]
    fn get_out_of_range() {
        let doc = json!([[1, 2], [3]]);
        assert_eq!(get(&doc, &[2]), None);
        assert_eq!(get(&doc, &[1, 1]), None);
    }

    #[test]
    fn get_data_at_address_ok() {
        let doc = json!(["foo", ["A", "B", "C"], [0, 1, 2]]);
        assert_eq!(get_data_at_address(&doc, &[1, 2]).unwrap(), json!("C"));
        assert_eq!(get_data_at_address(&doc, &[2]).unwrap(), json!([0, 1, 2]));
        assert_eq!(get_data_at_address(&doc, &[]).unwrap(), doc);
    }

    #[test]
    fn get_data_at_address_out_of_range() {
        let doc = json!([["A", "B"]]);
        assert_eq!(
            get_data_at_address(&doc, &[0, 2]).unwrap_err(),
            AddressError::OutOfRange { index: 2, len: 2 }
        );
        assert_eq!(
            get_data_at_address(&doc, &[5]).unwrap_err(),
            AddressError::OutOfRange { index: 5, len: 1 }
        );
    }

    #[test]
    fn get_data_at_address_null_element() {
        let doc = json!([null, 1]);
        assert_eq!(get_data_at_address(&doc, &[0]).unwrap(), Value::Null);
    }

    #[test]
    fn format_parse_roundtrip() {
        let addresses: Vec<Address> = vec![vec![], vec![0], vec![0, 12, 3]];
        for address in addresses {
            let formatted = format_address(&address);
            assert_eq!(parse_address(&formatted).unwrap(), address);
        }
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!(matches!(
            parse_address("/x"),
            Err(AddressError::InvalidStep(_))
        ));
        assert!(matches!(
            parse_address("/-1"),
            Err(AddressError::InvalidStep(_))
        ));
    }

    #[test]
    fn prefix_and_parent() {
        assert!(is_prefix(&[], &[0, 1]));
        assert!(is_prefix(&[0], &[0, 1]));
        assert!(is_prefix(&[0, 1], &[0, 1]));
        assert!(!is_prefix(&[1], &[0, 1]));
        assert!(!is_prefix(&[0, 1, 2], &[0, 1]));

        assert_eq!(parent(&[0, 1]).unwrap(), vec![0]);
        assert_eq!(parent(&[0]).unwrap(), Vec::<usize>::new());
        assert_eq!(parent(&[]).unwrap_err(), AddressError::NoParent);
    }
}
