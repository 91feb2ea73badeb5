use crate::engine::core::block::BlockGeometry;

#[test]
fn default_data_geometry_is_sixteen_mib() {
    let geo = BlockGeometry::new(24);
    assert_eq!(geo.block_len(), 16 * 1024 * 1024);
    assert_eq!(geo.block_index(geo.block_len() - 1), 0);
    assert_eq!(geo.block_index(geo.block_len()), 1);
}

#[test]
fn addressing_splits_position_into_block_and_offset() {
    let geo = BlockGeometry::new(2);
    assert_eq!(geo.block_len(), 4);
    assert_eq!(geo.block_index(5), 1);
    assert_eq!(geo.block_offset(5), 1);
    assert_eq!(geo.space_left(5), 3);
    assert_eq!(geo.space_left(4), 4);
    assert_eq!(geo.space_left(3), 1);
}

#[test]
fn blocks_for_rounds_up_and_clamps_non_positive() {
    let geo = BlockGeometry::new(2);
    assert_eq!(geo.blocks_for(-10), 0);
    assert_eq!(geo.blocks_for(0), 0);
    assert_eq!(geo.blocks_for(1), 1);
    assert_eq!(geo.blocks_for(4), 1);
    assert_eq!(geo.blocks_for(5), 2);
    assert_eq!(geo.blocks_for(8), 2);
    assert_eq!(geo.blocks_for(9), 3);
}

#[test]
#[should_panic(expected = "block bits out of range")]
fn zero_bits_are_rejected() {
    let _ = BlockGeometry::new(0);
}
