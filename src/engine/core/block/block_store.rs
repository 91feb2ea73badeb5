use std::borrow::Cow;

use tracing::debug;

use super::geometry::BlockGeometry;

pub const DEFAULT_BLOCK_LENGTH_BITS: u32 = 24;

/// Append-only byte arena made of fixed-size blocks.
///
/// Values are packed back to back across block boundaries. Reads that stay
/// inside one block borrow from it; reads that straddle a boundary are
/// reassembled into one owned buffer.
#[derive(Debug)]
pub struct BlockStore {
    geometry: BlockGeometry,
    blocks: Vec<Box<[u8]>>,
    write_offset: usize,
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::with_bits(DEFAULT_BLOCK_LENGTH_BITS)
    }
}

impl BlockStore {
    pub fn with_bits(block_length_bits: u32) -> Self {
        Self {
            geometry: BlockGeometry::new(block_length_bits),
            blocks: Vec::new(),
            write_offset: 0,
        }
    }

    #[inline]
    pub fn geometry(&self) -> BlockGeometry {
        self.geometry
    }

    /// Number of blocks currently allocated.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks.len() * self.geometry.block_len()
    }

    /// Next free global byte offset.
    #[inline]
    pub fn write_offset(&self) -> usize {
        self.write_offset
    }

    /// Grows the block list to at least `required_blocks`. Existing blocks are
    /// never dropped or reallocated.
    pub fn ensure_capacity(&mut self, required_blocks: usize) {
        if self.blocks.len() >= required_blocks {
            return;
        }
        let block_len = self.geometry.block_len();
        debug!(
            target: "block_store::ensure_capacity",
            have = self.blocks.len(),
            want = required_blocks,
            block_len,
            "Allocating data blocks"
        );
        self.blocks.reserve(required_blocks - self.blocks.len());
        while self.blocks.len() < required_blocks {
            self.blocks.push(vec![0u8; block_len].into_boxed_slice());
        }
    }

    /// Copies `bytes` at the write offset and returns where they start.
    ///
    /// # Panics
    /// When the allocated blocks cannot hold the value. Capacity is derived
    /// from the declared chunk size before ingestion, so this only happens
    /// when that declaration was wrong.
    pub fn append(&mut self, bytes: &[u8]) -> usize {
        let start = self.write_offset;
        let end = start + bytes.len();
        assert!(
            end <= self.capacity(),
            "chunk payload exceeds declared capacity: need {} bytes, have {}",
            end,
            self.capacity()
        );

        let mut copied = 0;
        while copied < bytes.len() {
            let pos = start + copied;
            let block = self.geometry.block_index(pos);
            let at = self.geometry.block_offset(pos);
            let n = (bytes.len() - copied).min(self.geometry.space_left(pos));
            self.blocks[block][at..at + n].copy_from_slice(&bytes[copied..copied + n]);
            copied += n;
        }

        self.write_offset = end;
        start
    }

    /// Returns the `len` bytes stored at `offset`.
    pub fn read(&self, offset: usize, len: usize) -> Cow<'_, [u8]> {
        if len == 0 {
            return Cow::Borrowed(&[]);
        }
        let block = self.geometry.block_index(offset);
        let at = self.geometry.block_offset(offset);
        if len <= self.geometry.space_left(offset) {
            return Cow::Borrowed(&self.blocks[block][at..at + len]);
        }

        let mut cell = Vec::with_capacity(len);
        while cell.len() < len {
            let pos = offset + cell.len();
            let block = self.geometry.block_index(pos);
            let at = self.geometry.block_offset(pos);
            let n = (len - cell.len()).min(self.geometry.space_left(pos));
            cell.extend_from_slice(&self.blocks[block][at..at + n]);
        }
        Cow::Owned(cell)
    }

    /// Moves the write offset back to zero. Blocks and their bytes stay.
    pub fn rewind(&mut self) {
        self.write_offset = 0;
    }

    #[cfg(test)]
    pub(crate) fn block_ptr(&self, index: usize) -> *const u8 {
        self.blocks[index].as_ptr()
    }
}
