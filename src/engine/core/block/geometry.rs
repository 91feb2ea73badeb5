/// Shift/mask addressing for a sequence of equally sized blocks.
///
/// Both the data arena and the meta index split a flat address space into
/// blocks of `1 << bits` units; a flat position maps to `(block, offset)` with
/// pure integer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGeometry {
    bits: u32,
}

impl BlockGeometry {
    pub const fn new(bits: u32) -> Self {
        assert!(bits > 0 && bits < usize::BITS, "block bits out of range");
        Self { bits }
    }

    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Units held by one block.
    #[inline]
    pub const fn block_len(&self) -> usize {
        1 << self.bits
    }

    #[inline]
    pub const fn block_index(&self, pos: usize) -> usize {
        pos >> self.bits
    }

    #[inline]
    pub const fn block_offset(&self, pos: usize) -> usize {
        pos & (self.block_len() - 1)
    }

    /// Units remaining in the block that contains `pos`, counting `pos` itself.
    #[inline]
    pub const fn space_left(&self, pos: usize) -> usize {
        self.block_len() - self.block_offset(pos)
    }

    /// Blocks needed to hold `units` units. Zero or negative needs no block.
    #[inline]
    pub fn blocks_for(&self, units: i64) -> usize {
        if units <= 0 {
            0
        } else {
            self.block_index((units - 1) as usize) + 1
        }
    }
}
