//! Perfect binary Merkle tree with inclusion proofs.
//!
//! Leaves are padded with `H("")` to the next power of two and folded level
//! by level as `H(left || right)` until a single root remains. The default
//! hash is Keccak-256.
//!
//! # Core types
//!
//! - [`MerkleTree`] — owns the leaves, builds levels, derives proofs.
//! - [`MerkleProof`] / [`ProofStep`] — leaf-to-root sibling path.
//! - [`validate_proof`] — standalone check of a proof against a root.
//! - [`MerkleHasher`] / [`Keccak256`] — the per-tree hash function.

mod error;
mod hasher;
pub mod node;
mod proof;
mod tree;
#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use hasher::{Hash, Keccak256, MerkleHasher};
pub use proof::{Direction, MerkleProof, ProofStep, validate_proof, validate_proof_with};
pub use tree::{MerkleTree, padded_len};
