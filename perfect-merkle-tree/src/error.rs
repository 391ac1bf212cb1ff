use thiserror::Error;

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from Merkle tree construction, proof derivation and validation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Root or proof requested before `make` ran after the latest mutation.
    #[error("the tree is not ready, call `make` to build the tree")]
    NotReady,
    /// Node or proof index outside the padded node list.
    #[error("index {index} out of range, specify the correct index (from 0 to {})", .node_count.saturating_sub(1))]
    IndexOutOfRange { index: usize, node_count: usize },
    /// Hash-based proof lookup found no stored node with that value.
    #[error("no stored node matches the requested value")]
    NotFound,
    /// An empty proof never proves inclusion.
    #[error("proof is empty")]
    EmptyProof,
    /// A hex-encoded node, leaf or root could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// A level with an odd number of nodes was met while folding. Padding to a
    /// power of two makes this unreachable, so it indicates a defect.
    #[error("internal inconsistency: level {level} has odd length {len}")]
    InternalInconsistency { level: usize, len: usize },
}
