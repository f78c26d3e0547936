use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Number of bytes in a [`ContentHash`].
pub const HASH_LEN: usize = 20;

/// Number of hex characters in the textual form of a [`ContentHash`].
pub const HASH_HEX_LEN: usize = HASH_LEN * 2;

/// Immutable identifier of one stored object (a content blob or a commit).
///
/// The textual form is always 40 lowercase hex characters. Identical input
/// always produces the same hash, so a hash names one exact version
/// regardless of which document produced it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; HASH_LEN]);

impl ContentHash {
    /// Build a hash from the leading bytes of a longer digest.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let mut arr = [0u8; HASH_LEN];
        arr.copy_from_slice(&digest[..HASH_LEN]);
        Self(arr)
    }

    /// Hex-encoded string representation (40 lowercase characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Returns `true` if `s` has the textual shape of a hash: exactly 40
    /// characters, each one of `0-9a-f`.
    ///
    /// Uppercase hex is deliberately rejected.
    pub fn is_hash_shaped(s: &str) -> bool {
        s.len() == HASH_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Parse from the canonical 40-character lowercase hex form.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        if s.len() != HASH_HEX_LEN {
            return Err(TypeError::InvalidLength {
                expected: HASH_HEX_LEN,
                actual: s.len(),
            });
        }
        if !Self::is_hash_shaped(s) {
            return Err(TypeError::InvalidHex(s.to_string()));
        }
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let mut arr = [0u8; HASH_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short_hex())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ContentHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(seed: u8) -> ContentHash {
        let mut digest = [0u8; 32];
        for (i, byte) in digest.iter_mut().enumerate() {
            *byte = seed.wrapping_mul(31).wrapping_add(i as u8);
        }
        ContentHash::from_digest(&digest)
    }

    #[test]
    fn from_digest_keeps_leading_bytes() {
        let digest: [u8; 32] = std::array::from_fn(|i| i as u8);
        assert_eq!(ContentHash::from_digest(&digest).to_hex(), hex::encode(&digest[..HASH_LEN]));
    }

    #[test]
    fn hex_is_40_lowercase_chars() {
        let hex = sample(1).to_hex();
        assert_eq!(hex.len(), 40);
        assert!(ContentHash::is_hash_shaped(&hex));
    }

    #[test]
    fn hex_roundtrip() {
        let id = sample(1);
        let parsed: ContentHash = id.to_hex().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn uppercase_is_not_hash_shaped() {
        let upper = sample(2).to_hex().to_uppercase();
        assert!(!ContentHash::is_hash_shaped(&upper));
        assert!(ContentHash::from_hex(&upper).is_err());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = ContentHash::from_hex("abc").unwrap_err();
        assert_eq!(err, TypeError::InvalidLength { expected: 40, actual: 3 });
    }

    #[test]
    fn serializes_as_hex_string() {
        let id = sample(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
        let parsed: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn short_hex_is_8_chars() {
        assert_eq!(sample(1).short_hex().len(), 8);
    }

    proptest! {
        #[test]
        fn lowercase_hex_of_length_40_is_hash_shaped(s in "[0-9a-f]{40}") {
            prop_assert!(ContentHash::is_hash_shaped(&s));
        }

        #[test]
        fn other_lengths_are_not_hash_shaped(s in "[0-9a-f]{0,39}|[0-9a-f]{41,60}") {
            prop_assert!(!ContentHash::is_hash_shaped(&s));
        }
    }
}
