//! Content fingerprints of value tuples.
//!
//! A [`Fingerprint`] is a SHA-256 digest of a tuple's canonical encoding. It
//! exists to make equality tests between snapshots cheap; it is not an
//! identity and is never persisted. Callers that need certainty confirm a
//! matching fingerprint by comparing the tuples themselves.

use core::fmt;

use sha2::{Digest, Sha256};

use crate::value::{Value, encode_tuple};

/// SHA-256 digest of a value tuple.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint an ordered tuple of values.
    #[must_use]
    pub fn of(values: &[Value]) -> Self {
        let digest = Sha256::digest(encode_tuple(values));
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Twelve hex digits are plenty to tell fingerprints apart in logs.
        write!(f, "Fingerprint({})", &hex::encode(self.0)[..12])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_tuples_share_a_fingerprint() {
        let a = Fingerprint::of(&[Value::Integer(1), Value::from("a")]);
        let b = Fingerprint::of(&[Value::Integer(1), Value::from("a")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_and_type_matter() {
        let ab = Fingerprint::of(&[Value::Integer(1), Value::Integer(2)]);
        let ba = Fingerprint::of(&[Value::Integer(2), Value::Integer(1)]);
        assert_ne!(ab, ba);
        assert_ne!(
            Fingerprint::of(&[Value::Integer(1)]),
            Fingerprint::of(&[Value::Real(1.0)])
        );
        assert_ne!(Fingerprint::of(&[]), Fingerprint::of(&[Value::Null]));
    }

    #[test]
    fn test_display_is_full_hex() {
        let fp = Fingerprint::of(&[]);
        let shown = fp.to_string();
        assert_eq!(shown.len(), 64);
        assert_eq!(hex::decode(&shown).unwrap(), fp.0.to_vec());
    }
}
