
/// Keccak-256 of the empty string, the filler node.
const EMPTY_STR_HASH: &str = "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tree over the reference leaves `00`, `01`, `02`, already built.
fn reference_tree() -> crate::MerkleTree {
    init_logger();
    let mut tree = crate::MerkleTree::new();
    tree.add_node_hex("00").expect("valid hex");
    tree.add_node(vec![0x01]);
    tree.add_node_hex("02").expect("valid hex");
    tree.make().expect("make");
    // One filler node completes the power of two.
    assert_eq!(tree.node_count(), 4);
    tree
}

/// Create a leaf from an integer (for test convenience).
fn leaf_from_u32(i: u32) -> Vec<u8> {
    i.to_le_bytes().to_vec()
}
