pub mod block_store;
pub mod geometry;
pub mod meta_index;

pub use block_store::{BlockStore, DEFAULT_BLOCK_LENGTH_BITS};
pub use geometry::BlockGeometry;
pub use meta_index::{DEFAULT_META_BLOCK_LENGTH_BITS, MetaIndex, MetaSlot, NULL_LENGTH};

#[cfg(test)]
mod geometry_test;
