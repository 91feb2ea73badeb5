use tracing::debug;

use crate::engine::core::block::{
    BlockStore, DEFAULT_BLOCK_LENGTH_BITS, DEFAULT_META_BLOCK_LENGTH_BITS, MetaIndex, MetaSlot,
};

use super::cell::Utf8Buffer;

/// Framing bytes the JSON row encoding spends per row (`[` and `]`).
pub const ROW_FRAMING_BYTES: i64 = 2;
/// Framing bytes the JSON row encoding spends per cell (the separator).
pub const CELL_FRAMING_BYTES: i64 = 1;

/// Ingestion and read façade over one chunk's [`BlockStore`] and [`MetaIndex`].
///
/// Cells are added once, in row-major order, then read any number of times.
/// Capacity (the allocated blocks) is kept apart from position (the two
/// ingestion cursors) so a retried download reuses the same memory.
#[derive(Debug)]
pub struct ChunkCursor {
    data: BlockStore,
    meta: MetaIndex,
    block_count: usize,
    meta_block_count: usize,
    next_index: usize,
    saved_row_count: usize,
    saved_column_count: usize,
}

impl Default for ChunkCursor {
    fn default() -> Self {
        Self::with_bits(DEFAULT_BLOCK_LENGTH_BITS, DEFAULT_META_BLOCK_LENGTH_BITS)
    }
}

impl ChunkCursor {
    pub fn with_bits(block_length_bits: u32, meta_block_length_bits: u32) -> Self {
        Self {
            data: BlockStore::with_bits(block_length_bits),
            meta: MetaIndex::with_bits(meta_block_length_bits),
            block_count: 0,
            meta_block_count: 0,
            next_index: 0,
            saved_row_count: 0,
            saved_column_count: 0,
        }
    }

    /// Sizes the cursor for a new chunk. Nothing is allocated until the first
    /// [`add`](Self::add).
    ///
    /// The payload estimate takes the declared uncompressed size and removes
    /// the row and cell framing of the JSON encoding.
    pub fn reset(&mut self, row_count: usize, column_count: usize, uncompressed_size: usize) {
        let rows = row_count as i64;
        let cells = rows * column_count as i64;
        let bytes_needed =
            uncompressed_size as i64 - rows * ROW_FRAMING_BYTES - cells * CELL_FRAMING_BYTES;

        self.saved_row_count = row_count;
        self.saved_column_count = column_count;
        self.block_count = self.data.geometry().blocks_for(bytes_needed);
        self.meta_block_count = self.meta.geometry().blocks_for(cells);
        self.next_index = 0;
        self.data.rewind();

        debug!(
            target: "chunk_cursor::reset",
            rows = row_count,
            columns = column_count,
            uncompressed_size,
            bytes_needed,
            blocks = self.block_count,
            meta_blocks = self.meta_block_count,
            "Sized chunk storage"
        );
    }

    /// Stores the next cell; `None` records SQL NULL.
    pub fn add(&mut self, value: Option<&[u8]>) {
        debug_assert!(
            self.next_index < self.cell_count(),
            "more cells added than declared ({} x {})",
            self.saved_row_count,
            self.saved_column_count
        );
        if self.data.block_count() < self.block_count
            || self.meta.block_count() < self.meta_block_count
        {
            self.allocate();
        }

        match value {
            None => self.meta.record_null(self.next_index),
            Some(bytes) => {
                let offset = self.data.append(bytes);
                self.meta.record_value(self.next_index, offset, bytes.len());
            }
        }
        self.next_index += 1;
    }

    /// Cell at linear `index`, or `None` for NULL and for cells not ingested.
    pub fn get(&self, index: usize) -> Option<Utf8Buffer<'_>> {
        if index >= self.next_index {
            return None;
        }
        match self.meta.lookup(index) {
            MetaSlot::Value { offset, length } => Some(self.data.read(offset, length).into()),
            MetaSlot::Null | MetaSlot::OutOfRange => None,
        }
    }

    /// Rewinds both ingestion cursors. Allocated blocks stay and are
    /// overwritten by the retried ingestion.
    pub fn reset_for_retry(&mut self) {
        self.next_index = 0;
        self.data.rewind();
    }

    #[inline]
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Next free byte offset in the data blocks.
    #[inline]
    pub fn current_data_offset(&self) -> usize {
        self.data.write_offset()
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.saved_row_count * self.saved_column_count
    }

    /// True once every declared cell has been added.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.next_index == self.cell_count()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.saved_row_count
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.saved_column_count
    }

    /// Data blocks the current chunk needs.
    #[inline]
    pub fn required_blocks(&self) -> usize {
        self.block_count
    }

    #[inline]
    pub fn required_meta_blocks(&self) -> usize {
        self.meta_block_count
    }

    #[inline]
    pub fn allocated_blocks(&self) -> usize {
        self.data.block_count()
    }

    #[inline]
    pub fn allocated_meta_blocks(&self) -> usize {
        self.meta.block_count()
    }

    fn allocate(&mut self) {
        self.data.ensure_capacity(self.block_count);
        self.meta.ensure_capacity(self.meta_block_count);
    }
}
