use tracing::debug;

use super::geometry::BlockGeometry;

pub const DEFAULT_META_BLOCK_LENGTH_BITS: u32 = 15;

/// Length recorded for a SQL NULL cell. Real lengths are never negative.
pub const NULL_LENGTH: i32 = -100;

/// Result of looking a cell up in the [`MetaIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaSlot {
    Value { offset: usize, length: usize },
    Null,
    OutOfRange,
}

/// Per-cell `(offset, length)` side table stored in fixed-size parallel blocks.
#[derive(Debug)]
pub struct MetaIndex {
    geometry: BlockGeometry,
    offsets: Vec<Box<[usize]>>,
    lengths: Vec<Box<[i32]>>,
}

impl Default for MetaIndex {
    fn default() -> Self {
        Self::with_bits(DEFAULT_META_BLOCK_LENGTH_BITS)
    }
}

impl MetaIndex {
    pub fn with_bits(meta_block_length_bits: u32) -> Self {
        Self {
            geometry: BlockGeometry::new(meta_block_length_bits),
            offsets: Vec::new(),
            lengths: Vec::new(),
        }
    }

    #[inline]
    pub fn geometry(&self) -> BlockGeometry {
        self.geometry
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.lengths.len()
    }

    /// Slots addressable without growing.
    #[inline]
    pub fn slot_capacity(&self) -> usize {
        self.lengths.len() * self.geometry.block_len()
    }

    pub fn ensure_capacity(&mut self, required_meta_blocks: usize) {
        if self.lengths.len() >= required_meta_blocks {
            return;
        }
        let slots = self.geometry.block_len();
        debug!(
            target: "meta_index::ensure_capacity",
            have = self.lengths.len(),
            want = required_meta_blocks,
            slots,
            "Allocating meta blocks"
        );
        while self.lengths.len() < required_meta_blocks {
            self.offsets.push(vec![0usize; slots].into_boxed_slice());
            self.lengths.push(vec![0i32; slots].into_boxed_slice());
        }
    }

    pub fn record_null(&mut self, index: usize) {
        let (block, slot) = self.locate(index);
        self.lengths[block][slot] = NULL_LENGTH;
    }

    pub fn record_value(&mut self, index: usize, offset: usize, length: usize) {
        assert!(length <= i32::MAX as usize, "cell length {} too large", length);
        let (block, slot) = self.locate(index);
        self.offsets[block][slot] = offset;
        self.lengths[block][slot] = length as i32;
    }

    pub fn lookup(&self, index: usize) -> MetaSlot {
        let (block, slot) = self.locate(index);
        if block >= self.lengths.len() {
            return MetaSlot::OutOfRange;
        }
        match self.lengths[block][slot] {
            NULL_LENGTH => MetaSlot::Null,
            length => MetaSlot::Value {
                offset: self.offsets[block][slot],
                length: length as usize,
            },
        }
    }

    #[inline]
    fn locate(&self, index: usize) -> (usize, usize) {
        (
            self.geometry.block_index(index),
            self.geometry.block_offset(index),
        )
    }
}
