use crate::engine::core::cursor::Utf8Buffer;
use crate::engine::core::parse::parse_json_chunk;
use crate::engine::errors::ChunkError;
use crate::shared::config::ChunkConfig;

use super::arrow_chunk::ArrowResultChunk;
use super::descriptor::{ChunkDescriptor, ResultFormat};
use super::reusable_chunk::ReusableChunk;

/// One chunk of a result set, in whichever encoding the service returned.
///
/// Lifecycle: `reset` for a descriptor, `ingest` the downloaded body (after
/// `reset_for_retry` if a previous attempt failed), then hand the chunk to a
/// reader that drives `next` / `rewind` / `extract_cell`.
#[derive(Debug)]
pub enum ResultChunk {
    Json(ReusableChunk),
    Arrow(ArrowResultChunk),
}

macro_rules! dispatch {
    ($self:expr, $chunk:ident => $body:expr) => {
        match $self {
            ResultChunk::Json($chunk) => $body,
            ResultChunk::Arrow($chunk) => $body,
        }
    };
}

impl ResultChunk {
    pub fn new(format: ResultFormat, column_count: usize, config: &ChunkConfig) -> Self {
        match format {
            ResultFormat::Json => ResultChunk::Json(ReusableChunk::with_bits(
                column_count,
                config.block_length_bits,
                config.meta_block_length_bits,
            )),
            ResultFormat::Arrow => ResultChunk::Arrow(ArrowResultChunk::new(column_count)),
        }
    }

    pub fn format(&self) -> ResultFormat {
        match self {
            ResultChunk::Json(_) => ResultFormat::Json,
            ResultChunk::Arrow(_) => ResultFormat::Arrow,
        }
    }

    pub fn reset(&mut self, descriptor: &ChunkDescriptor, chunk_index: usize) {
        dispatch!(self, chunk => chunk.reset(descriptor, chunk_index))
    }

    /// Decodes a downloaded, decompressed chunk body into this chunk.
    pub fn ingest(&mut self, bytes: &[u8]) -> Result<(), ChunkError> {
        match self {
            ResultChunk::Json(chunk) => parse_json_chunk(bytes, chunk),
            ResultChunk::Arrow(chunk) => chunk.ingest_ipc(bytes),
        }
    }

    pub fn next(&mut self) -> bool {
        dispatch!(self, chunk => chunk.next())
    }

    pub fn rewind(&mut self) -> bool {
        dispatch!(self, chunk => chunk.rewind())
    }

    pub fn extract_cell(&self, column_index: usize) -> Option<Utf8Buffer<'_>> {
        dispatch!(self, chunk => chunk.extract_cell(column_index))
    }

    pub fn reset_for_retry(&mut self) {
        dispatch!(self, chunk => chunk.reset_for_retry())
    }

    pub fn is_complete(&self) -> bool {
        dispatch!(self, chunk => chunk.is_complete())
    }

    pub fn row_count(&self) -> usize {
        dispatch!(self, chunk => chunk.row_count())
    }

    pub fn column_count(&self) -> usize {
        dispatch!(self, chunk => chunk.column_count())
    }

    pub fn chunk_index(&self) -> usize {
        dispatch!(self, chunk => chunk.chunk_index())
    }

    pub fn current_row_index(&self) -> i64 {
        dispatch!(self, chunk => chunk.current_row_index())
    }

    /// Descriptor this chunk was last reset with.
    pub fn descriptor(&self) -> ChunkDescriptor {
        dispatch!(self, chunk => ChunkDescriptor {
            row_count: chunk.row_count(),
            url: chunk.url().to_string(),
            compressed_size: chunk.compressed_size(),
            uncompressed_size: chunk.uncompressed_size(),
        })
    }
}
