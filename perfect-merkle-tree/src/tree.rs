use log::{debug, trace};

use crate::{
    Error, Hash, Keccak256, MerkleHasher, MerkleProof, ProofStep, Result,
    node::{node_from_hex, node_to_hex},
};

/// Number of leaves after padding: the smallest power of two `>= count`,
/// with an empty tree padded to a single filler leaf.
pub fn padded_len(count: usize) -> usize {
    count.max(1).next_power_of_two()
}

/// A perfect binary Merkle tree over caller-supplied leaves.
///
/// Leaves are stored verbatim and never hashed on their own. `make` pads the
/// leaf list with `H("")` filler nodes up to a power of two and folds it into
/// levels of `H(left || right)` parents. Any call to `add_node` discards the
/// built levels; `get_root` and `get_proof` fail with [`Error::NotReady`]
/// until `make` runs again.
#[derive(Debug, Clone)]
pub struct MerkleTree<H = Keccak256> {
    hasher: H,
    nodes: Vec<Vec<u8>>,
    /// Levels above the leaves, lowest first. The last level holds only the
    /// root. Empty for a single-leaf tree. `None` while unbuilt.
    levels: Option<Vec<Vec<Hash>>>,
}

impl MerkleTree<Keccak256> {
    /// Create an empty, unbuilt tree hashing with Keccak-256.
    pub fn new() -> Self {
        Self::with_hasher(Keccak256)
    }

    /// Validate a proof against hex-encoded leaf and root using Keccak-256.
    ///
    /// Needs no tree instance; see [`crate::validate_proof`].
    pub fn validate_proof(proof: &MerkleProof, target_hex: &str, root_hex: &str) -> Result<bool> {
        crate::validate_proof(proof, target_hex, root_hex)
    }
}

impl<H: MerkleHasher + Default> Default for MerkleTree<H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Create an empty, unbuilt tree bound to `hasher` for its whole life.
    pub fn with_hasher(hasher: H) -> Self {
        MerkleTree {
            hasher,
            nodes: Vec::new(),
            levels: None,
        }
    }

    /// Create an unbuilt tree holding `leaves` in iteration order.
    pub fn from_leaves<I, V>(hasher: H, leaves: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vec<u8>>,
    {
        let mut tree = Self::with_hasher(hasher);
        tree.extend(leaves);
        tree
    }

    /// The hash function this tree was created with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Append a node. Invalidates any previously built levels.
    pub fn add_node(&mut self, value: impl Into<Vec<u8>>) {
        self.levels = None;
        self.nodes.push(value.into());
    }

    /// Decode a hex-encoded node and append it.
    pub fn add_node_hex(&mut self, value: &str) -> Result<()> {
        let node = node_from_hex(value)?;
        self.add_node(node);
        Ok(())
    }

    /// Hex form of the node at `index`. Filler nodes follow the caller's
    /// nodes once the tree has been built.
    pub fn get_node(&self, index: usize) -> Result<String> {
        self.node(index)
            .map(node_to_hex)
            .ok_or(Error::IndexOutOfRange {
                index,
                node_count: self.node_count(),
            })
    }

    /// Raw bytes of the node at `index`, if any.
    pub fn node(&self, index: usize) -> Option<&[u8]> {
        self.nodes.get(index).map(Vec::as_slice)
    }

    /// All stored nodes in insertion order, padding included once built.
    pub fn nodes(&self) -> &[Vec<u8>] {
        &self.nodes
    }

    /// Number of stored nodes. Reflects padding once `make` has run.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether levels are built for the current node list.
    pub fn is_ready(&self) -> bool {
        self.levels.is_some()
    }

    /// Pad the node list to a power of two and compute every level up to the
    /// root.
    ///
    /// The filler nodes become real stored nodes and stay in the list.
    pub fn make(&mut self) -> Result<()> {
        self.levels = None;

        let supplied = self.nodes.len();
        let target = padded_len(supplied);
        let filler = self.hasher.empty_hash();
        self.nodes.resize(target, filler.to_vec());

        let mut levels: Vec<Vec<Hash>> = Vec::new();
        if self.nodes.len() > 1 {
            let mut current = fold_level(&self.hasher, &self.nodes, 0)?;
            while current.len() > 1 {
                let parents = fold_level(&self.hasher, &current, levels.len() + 1)?;
                levels.push(current);
                current = parents;
            }
            levels.push(current);
        }

        debug!(
            "built merkle tree: {} supplied nodes, {} after padding, depth {}",
            supplied,
            target,
            levels.len()
        );
        self.levels = Some(levels);
        Ok(())
    }

    fn built_levels(&self) -> Result<&[Vec<Hash>]> {
        self.levels.as_deref().ok_or(Error::NotReady)
    }

    /// Number of folding steps between the leaves and the root, which is also
    /// the length of every proof.
    pub fn depth(&self) -> Result<usize> {
        Ok(self.built_levels()?.len())
    }

    /// Raw root bytes. For a single-leaf tree this is the leaf itself.
    pub fn root(&self) -> Result<&[u8]> {
        let levels = self.built_levels()?;
        let root = match levels.last() {
            Some(top) => top.first().map(|hash| hash.as_slice()),
            None => self.node(0),
        };
        root.ok_or(Error::InternalInconsistency {
            level: levels.len(),
            len: 0,
        })
    }

    /// Hex-encoded root.
    pub fn get_root(&self) -> Result<String> {
        self.root().map(node_to_hex)
    }

    /// Inclusion proof for the node at `index` of the padded node list.
    ///
    /// Steps run from the leaf level up to the level just below the root.
    /// Each step names the side the sibling sits on during replay.
    pub fn get_proof(&self, index: usize) -> Result<MerkleProof> {
        let levels = self.built_levels()?;
        if index >= self.node_count() {
            return Err(Error::IndexOutOfRange {
                index,
                node_count: self.node_count(),
            });
        }
        trace!("deriving proof for index {} at depth {}", index, levels.len());

        let mut steps = Vec::with_capacity(levels.len());
        let mut position = index;
        if !levels.is_empty() {
            steps.push(sibling_step(&self.nodes, position));
            position /= 2;
        }
        // The root level has no sibling.
        for level in levels.iter().take(levels.len().saturating_sub(1)) {
            steps.push(sibling_step(level, position));
            position /= 2;
        }
        Ok(MerkleProof::from(steps))
    }

    /// Proof for the first stored node equal to `value`.
    ///
    /// Duplicates (including a leaf equal to the filler node) resolve to the
    /// lowest index.
    pub fn get_proof_for_hash(&self, value: &[u8]) -> Result<MerkleProof> {
        let index = self
            .nodes
            .iter()
            .position(|node| node.as_slice() == value)
            .ok_or(Error::NotFound)?;
        debug!("proof lookup by value resolved to first match at index {}", index);
        self.get_proof(index)
    }

    /// Proof for the first stored node equal to the hex-decoded `value`.
    pub fn get_proof_for_hex(&self, value: &str) -> Result<MerkleProof> {
        self.get_proof_for_hash(&node_from_hex(value)?)
    }
}

impl<H: MerkleHasher, V: Into<Vec<u8>>> Extend<V> for MerkleTree<H> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.add_node(value);
        }
    }
}

impl<H: MerkleHasher + Default, V: Into<Vec<u8>>> FromIterator<V> for MerkleTree<H> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_leaves(H::default(), iter)
    }
}

/// Pair up `(0, 1), (2, 3), ...` and hash each pair into its parent.
fn fold_level<H: MerkleHasher, N: AsRef<[u8]>>(
    hasher: &H,
    level: &[N],
    depth: usize,
) -> Result<Vec<Hash>> {
    if level.len() % 2 == 1 {
        return Err(Error::InternalInconsistency {
            level: depth,
            len: level.len(),
        });
    }
    Ok(level
        .chunks_exact(2)
        .map(|pair| hasher.merge(pair[0].as_ref(), pair[1].as_ref()))
        .collect())
}

/// Sibling of `position` within an even-length `level`.
fn sibling_step<N: AsRef<[u8]>>(level: &[N], position: usize) -> ProofStep {
    if position % 2 == 1 {
        ProofStep::Left(level[position - 1].as_ref().to_vec())
    } else {
        ProofStep::Right(level[position + 1].as_ref().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 1);
        assert_eq!(padded_len(1), 1);
        assert_eq!(padded_len(2), 2);
        assert_eq!(padded_len(3), 4);
        assert_eq!(padded_len(5), 8);
        assert_eq!(padded_len(8), 8);
        assert_eq!(padded_len(1025), 2048);
    }

    #[test]
    fn test_fold_level_rejects_odd_length() {
        let level = vec![[0u8; 32]; 3];
        let result = fold_level(&Keccak256, &level, 2);
        assert!(matches!(
            result,
            Err(Error::InternalInconsistency { level: 2, len: 3 })
        ));
    }

    #[test]
    fn test_sibling_step_direction() {
        let level = vec![vec![0u8], vec![1u8], vec![2u8], vec![3u8]];
        assert_eq!(sibling_step(&level, 0), ProofStep::Right(vec![1u8]));
        assert_eq!(sibling_step(&level, 1), ProofStep::Left(vec![0u8]));
        assert_eq!(sibling_step(&level, 2), ProofStep::Right(vec![3u8]));
        assert_eq!(sibling_step(&level, 3), ProofStep::Left(vec![2u8]));
    }
}
