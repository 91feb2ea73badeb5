pub mod arrow_chunk;
pub mod descriptor;
pub mod result_chunk;
pub mod reusable_chunk;

pub use arrow_chunk::ArrowResultChunk;
pub use descriptor::{ChunkDescriptor, ResultFormat};
pub use result_chunk::ResultChunk;
pub use reusable_chunk::ReusableChunk;

#[cfg(test)]
mod result_chunk_test;
