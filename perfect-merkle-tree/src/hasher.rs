//! Node hashing.
//!
//! Parents are `H(left || right)` with no separator or domain tag, and the
//! filler node used for padding is `H("")`.

use sha3::{Digest, Keccak256 as Keccak256Core};

/// Output of the tree hash function.
pub type Hash = [u8; 32];

/// Hash function bound to a tree instance.
pub trait MerkleHasher {
    /// Hash an arbitrary byte string.
    fn hash(&self, data: &[u8]) -> Hash;

    /// Fold two sibling nodes into their parent: `H(left || right)`.
    fn merge(&self, left: &[u8], right: &[u8]) -> Hash {
        let mut input = Vec::with_capacity(left.len() + right.len());
        input.extend_from_slice(left);
        input.extend_from_slice(right);
        self.hash(&input)
    }

    /// The filler node appended when padding to a power of two.
    fn empty_hash(&self) -> Hash {
        self.hash(&[])
    }
}

/// Keccak-256 with the original (pre-SHA3) padding, as used by Ethereum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256;

impl MerkleHasher for Keccak256 {
    fn hash(&self, data: &[u8]) -> Hash {
        Keccak256Core::digest(data).into()
    }

    fn merge(&self, left: &[u8], right: &[u8]) -> Hash {
        let mut hasher = Keccak256Core::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_keccak_empty_hash() {
        assert_eq!(
            Keccak256.empty_hash(),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn test_merge_is_hash_of_concatenation() {
        let merged = Keccak256.merge(&[0x00], &[0x01]);
        assert_eq!(merged, Keccak256.hash(&[0x00, 0x01]));
        assert_eq!(
            merged,
            hex!("49d03a195e239b52779866b33024210fc7dc66e9c2998975c0aa45c1702549d5")
        );
    }

    #[test]
    fn test_merge_is_order_sensitive() {
        let a = Keccak256.hash(b"left");
        let b = Keccak256.hash(b"right");
        assert_ne!(Keccak256.merge(&a, &b), Keccak256.merge(&b, &a));
    }

    #[test]
    fn test_default_merge_matches_streaming_merge() {
        struct Plain;
        impl MerkleHasher for Plain {
            fn hash(&self, data: &[u8]) -> Hash {
                Keccak256.hash(data)
            }
        }
        let a = Keccak256.hash(b"a");
        let b = Keccak256.hash(b"b");
        assert_eq!(Plain.merge(&a, &b), Keccak256.merge(&a, &b));
    }
}
