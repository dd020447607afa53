//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! Defines `CanonicalBytes`, the sole construction path for bytes that get
//! signed or used to derive transaction identifiers.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which rejects floats and
//! then serializes via RFC 8785 (JSON Canonicalization Scheme): sorted keys,
//! compact separators, deterministic byte sequence.
//!
//! Two clients signing the same transaction payload must produce the same
//! bytes, and a transaction id derived from a signed envelope must be
//! recomputable by the node byte-for-byte. Any function that signs or hashes
//! a structured payload accepts `&CanonicalBytes`, so a non-canonical
//! serialization path cannot exist.
//!
//! Evidence file content is deliberately NOT routed through this type — it
//! is opaque binary, hashed exactly as stored.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - All numeric values are integers, never floats.
/// - Serialization uses sorted keys with compact separators (RFC 8785).
///
/// These invariants are enforced by the constructor and cannot be violated
/// by downstream code because the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All signing and
    /// transaction-id derivation in the stack must flow through it.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// float numbers, or `CanonicalizationError::SerializationFailed` if JCS
    /// serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for signing or digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively reject float values anywhere in the JSON tree.
///
/// Floats have non-deterministic JCS number serialization edge cases; fees,
/// balances, and timestamps in this stack are all integers. A payload that
/// smuggles a float in is a bug, not data to be coerced.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_object_sorted_compact() {
        let data = serde_json::json!({"b": 2, "a": 1, "c": "hello"});
        let cb = CanonicalBytes::new(&data).expect("should canonicalize");
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert_eq!(s, r#"{"a":1,"b":2,"c":"hello"}"#);
    }

    #[test]
    fn nested_objects_sorted() {
        let data = serde_json::json!({
            "outer": {"b": 2, "a": 1},
            "list": [3, 2, 1]
        });
        let cb = CanonicalBytes::new(&data).expect("should canonicalize");
        let s = std::str::from_utf8(cb.as_bytes()).unwrap();
        assert_eq!(s, r#"{"list":[3,2,1],"outer":{"a":1,"b":2}}"#);
    }

    #[test]
    fn float_rejection() {
        let data = serde_json::json!({"fee": 1.5});
        match CanonicalBytes::new(&data) {
            Err(CanonicalizationError::FloatRejected(f)) => assert_eq!(f, 1.5),
            other => panic!("expected FloatRejected, got {other:?}"),
        }
    }

    #[test]
    fn nested_float_rejection() {
        let data = serde_json::json!({"payload": {"amounts": [1, 2, 0.5]}});
        assert!(CanonicalBytes::new(&data).is_err());
    }

    #[test]
    fn integers_pass() {
        let data = serde_json::json!({"fee": 10, "nonce": 18446744073709551615u64});
        assert!(CanonicalBytes::new(&data).is_ok());
    }

    #[test]
    fn deterministic_across_calls() {
        let data = serde_json::json!({"z": 1, "m": [true, null], "a": "x"});
        let cb1 = CanonicalBytes::new(&data).unwrap();
        let cb2 = CanonicalBytes::new(&data).unwrap();
        assert_eq!(cb1, cb2);
    }

    #[test]
    fn empty_object() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        assert_eq!(cb.as_bytes(), b"{}");
        assert!(!cb.is_empty());
        assert_eq!(cb.len(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeMap;

        proptest! {
            /// Key insertion order never changes the canonical bytes.
            #[test]
            fn insertion_order_irrelevant(entries in proptest::collection::btree_map(
                "[a-z]{1,8}", any::<i64>(), 1..8)
            ) {
                let forward: &BTreeMap<String, i64> = &entries;
                let mut reversed = serde_json::Map::new();
                for (k, v) in entries.iter().rev() {
                    reversed.insert(k.clone(), serde_json::json!(v));
                }
                let a = CanonicalBytes::new(forward).unwrap();
                let b = CanonicalBytes::new(&serde_json::Value::Object(reversed)).unwrap();
                prop_assert_eq!(a, b);
            }

            /// Integer-only payloads always canonicalize.
            #[test]
            fn integers_never_rejected(n in any::<u64>(), s in "[a-zA-Z0-9 ]{0,32}") {
                let data = serde_json::json!({"n": n, "s": s});
                prop_assert!(CanonicalBytes::new(&data).is_ok());
            }
        }
    }
}
