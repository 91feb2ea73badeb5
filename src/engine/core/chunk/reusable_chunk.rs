use tracing::debug;

use crate::engine::core::cursor::{ChunkCursor, Utf8Buffer};

use super::descriptor::ChunkDescriptor;

/// JSON result chunk whose cells live in a [`ChunkCursor`].
///
/// The chunk is meant to be recycled: `reset` for the next chunk keeps the
/// cursor's blocks, so steady-state downloads do not reallocate.
#[derive(Debug)]
pub struct ReusableChunk {
    cursor: ChunkCursor,
    row_count: usize,
    column_count: usize,
    chunk_index: usize,
    current_row_index: i64,
    url: String,
    compressed_size: usize,
    uncompressed_size: usize,
}

impl ReusableChunk {
    pub fn new(column_count: usize) -> Self {
        Self::with_cursor(column_count, ChunkCursor::default())
    }

    pub fn with_bits(column_count: usize, block_bits: u32, meta_block_bits: u32) -> Self {
        Self::with_cursor(column_count, ChunkCursor::with_bits(block_bits, meta_block_bits))
    }

    fn with_cursor(column_count: usize, cursor: ChunkCursor) -> Self {
        Self {
            cursor,
            row_count: 0,
            column_count,
            chunk_index: 0,
            current_row_index: -1,
            url: String::new(),
            compressed_size: 0,
            uncompressed_size: 0,
        }
    }

    pub fn reset(&mut self, descriptor: &ChunkDescriptor, chunk_index: usize) {
        self.row_count = descriptor.row_count;
        self.url.clone_from(&descriptor.url);
        self.compressed_size = descriptor.compressed_size;
        self.uncompressed_size = descriptor.uncompressed_size;
        self.chunk_index = chunk_index;
        self.current_row_index = -1;
        self.cursor.reset(
            descriptor.row_count,
            self.column_count,
            descriptor.uncompressed_size,
        );
        debug!(
            target: "reusable_chunk::reset",
            chunk_index,
            rows = self.row_count,
            columns = self.column_count,
            "Reset JSON chunk"
        );
    }

    /// Ingests the next cell in row-major order.
    #[inline]
    pub fn add(&mut self, value: Option<&[u8]>) {
        self.cursor.add(value);
    }

    #[inline]
    pub fn next(&mut self) -> bool {
        self.current_row_index += 1;
        self.current_row_index < self.row_count as i64
    }

    #[inline]
    pub fn rewind(&mut self) -> bool {
        self.current_row_index -= 1;
        self.current_row_index >= 0
    }

    /// Cell of `column_index` in the current row.
    pub fn extract_cell(&self, column_index: usize) -> Option<Utf8Buffer<'_>> {
        let row = usize::try_from(self.current_row_index).ok()?;
        self.extract_cell_at(row, column_index)
    }

    /// Cell at an explicit position, independent of the row cursor.
    pub fn extract_cell_at(&self, row: usize, column_index: usize) -> Option<Utf8Buffer<'_>> {
        if row >= self.row_count || column_index >= self.column_count {
            return None;
        }
        self.cursor.get(row * self.column_count + column_index)
    }

    /// Restarts ingestion; the row cursor is left where the reader put it.
    pub fn reset_for_retry(&mut self) {
        self.cursor.reset_for_retry();
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.cursor.is_filled()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[inline]
    pub fn chunk_index(&self) -> usize {
        self.chunk_index
    }

    #[inline]
    pub fn current_row_index(&self) -> i64 {
        self.current_row_index
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn compressed_size(&self) -> usize {
        self.compressed_size
    }

    pub fn uncompressed_size(&self) -> usize {
        self.uncompressed_size
    }

    pub fn cursor(&self) -> &ChunkCursor {
        &self.cursor
    }
}
