//! Inclusion proofs and their validation.
//!
//! A proof is the ordered list of siblings met on the way from a leaf to the
//! root, each tagged with the side it is concatenated on. Validation replays
//! the path and needs nothing but the proof, the leaf and the claimed root.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, Hash, Keccak256, MerkleHasher, Result,
    node::{node_from_hex, node_to_hex},
};

/// Side a sibling occupies when it is folded with the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Sibling is the left operand: `H(sibling || running)`.
    Left,
    /// Sibling is the right operand: `H(running || sibling)`.
    Right,
}

/// One level of an inclusion proof.
///
/// With the `serde` feature a step is the record `{"left": "<hex>"}` or
/// `{"right": "<hex>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ProofStep {
    /// The node being proved is a right child; its sibling sits on the left.
    Left(#[cfg_attr(feature = "serde", serde(with = "hex"))] Vec<u8>),
    /// The node being proved is a left child; its sibling sits on the right.
    Right(#[cfg_attr(feature = "serde", serde(with = "hex"))] Vec<u8>),
}

impl ProofStep {
    /// Left step from a hex-encoded sibling.
    pub fn left_hex(sibling: &str) -> Result<Self> {
        Ok(ProofStep::Left(node_from_hex(sibling)?))
    }

    /// Right step from a hex-encoded sibling.
    pub fn right_hex(sibling: &str) -> Result<Self> {
        Ok(ProofStep::Right(node_from_hex(sibling)?))
    }

    pub fn direction(&self) -> Direction {
        match self {
            ProofStep::Left(_) => Direction::Left,
            ProofStep::Right(_) => Direction::Right,
        }
    }

    pub fn sibling(&self) -> &[u8] {
        match self {
            ProofStep::Left(sibling) | ProofStep::Right(sibling) => sibling,
        }
    }

    /// Hex form of the sibling.
    pub fn sibling_hex(&self) -> String {
        node_to_hex(self.sibling())
    }

    /// Fold the sibling with `running` on the side this step names.
    pub fn apply<H: MerkleHasher>(&self, hasher: &H, running: &[u8]) -> Hash {
        match self {
            ProofStep::Left(sibling) => hasher.merge(sibling, running),
            ProofStep::Right(sibling) => hasher.merge(running, sibling),
        }
    }
}

impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofStep::Left(sibling) => write!(f, "left:{}", node_to_hex(sibling)),
            ProofStep::Right(sibling) => write!(f, "right:{}", node_to_hex(sibling)),
        }
    }
}

/// An inclusion proof ordered from the leaf level towards the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct MerkleProof {
    steps: Vec<ProofStep>,
}

impl MerkleProof {
    pub fn new(steps: Vec<ProofStep>) -> Self {
        MerkleProof { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in leaf-to-root order.
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ProofStep> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }

    /// Replay the proof from `leaf` and return the resulting root.
    ///
    /// Fails with [`Error::EmptyProof`] when there are no steps.
    pub fn calculate_root<H: MerkleHasher>(&self, hasher: &H, leaf: &[u8]) -> Result<Hash> {
        let (first, rest) = self.steps.split_first().ok_or(Error::EmptyProof)?;
        let mut running = first.apply(hasher, leaf);
        for step in rest {
            running = step.apply(hasher, &running);
        }
        Ok(running)
    }

    /// Whether replaying the proof from `leaf` yields exactly `root`.
    pub fn verify<H: MerkleHasher>(&self, hasher: &H, leaf: &[u8], root: &[u8]) -> Result<bool> {
        let calculated = self.calculate_root(hasher, leaf)?;
        Ok(calculated.as_slice() == root)
    }
}

impl From<Vec<ProofStep>> for MerkleProof {
    fn from(steps: Vec<ProofStep>) -> Self {
        MerkleProof::new(steps)
    }
}

impl FromIterator<ProofStep> for MerkleProof {
    fn from_iter<I: IntoIterator<Item = ProofStep>>(iter: I) -> Self {
        MerkleProof::new(iter.into_iter().collect())
    }
}

impl IntoIterator for MerkleProof {
    type Item = ProofStep;
    type IntoIter = std::vec::IntoIter<ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a MerkleProof {
    type Item = &'a ProofStep;
    type IntoIter = core::slice::Iter<'a, ProofStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Validate `proof` for the hex-encoded `target_hex` leaf against the
/// hex-encoded `root_hex`, hashing with Keccak-256.
///
/// A mismatch is `Ok(false)`. Errors are reserved for an empty proof and
/// undecodable hex.
pub fn validate_proof(proof: &MerkleProof, target_hex: &str, root_hex: &str) -> Result<bool> {
    validate_proof_with(&Keccak256, proof, target_hex, root_hex)
}

/// [`validate_proof`] with an explicit hash function.
pub fn validate_proof_with<H: MerkleHasher>(
    hasher: &H,
    proof: &MerkleProof,
    target_hex: &str,
    root_hex: &str,
) -> Result<bool> {
    if proof.is_empty() {
        return Err(Error::EmptyProof);
    }
    let target = node_from_hex(target_hex)?;
    let root = node_from_hex(root_hex)?;
    let valid = proof.verify(hasher, &target, &root)?;
    log::trace!(
        "validated {}-step proof for leaf {}: {}",
        proof.len(),
        target_hex,
        valid
    );
    Ok(valid)
}
