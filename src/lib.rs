//! Storage and cell extraction for chunked query results.
//!
//! A result set arrives as independently downloaded chunks. Each chunk body
//! is decoded once into fixed-size memory blocks and then read row by row,
//! cell by cell, without per-cell allocation in the common case.

pub mod engine;
pub mod logging;
pub mod shared;

pub use engine::core::{
    ArrowResultChunk, ChunkCursor, ChunkDescriptor, ResultChunk, ResultFormat, ReusableChunk,
    Utf8Buffer,
};
pub use engine::errors::{ChunkError, ConvertError, FetchError};
pub use engine::fetch::{ChunkFetcher, ChunkIngestor, ChunkLoader, ChunkPool, load_chunks};

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
