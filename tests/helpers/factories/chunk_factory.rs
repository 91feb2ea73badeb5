use crate::engine::core::block::{DEFAULT_BLOCK_LENGTH_BITS, DEFAULT_META_BLOCK_LENGTH_BITS};
use crate::engine::core::chunk::{ChunkDescriptor, ResultChunk, ReusableChunk};
use crate::engine::core::cursor::ChunkCursor;
use crate::shared::config::ChunkConfig;

/// Builds JSON chunks from rows of optional strings.
#[derive(Clone)]
pub struct ChunkFactory {
    rows: Vec<Vec<Option<String>>>,
    block_bits: u32,
    meta_bits: u32,
    url: String,
}

impl ChunkFactory {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            block_bits: DEFAULT_BLOCK_LENGTH_BITS,
            meta_bits: DEFAULT_META_BLOCK_LENGTH_BITS,
            url: "https://results.example.com/chunk_0".into(),
        }
    }

    pub fn with_row(mut self, cells: &[Option<&str>]) -> Self {
        self.rows
            .push(cells.iter().map(|c| c.map(str::to_string)).collect());
        self
    }

    pub fn with_block_bits(mut self, bits: u32) -> Self {
        self.block_bits = bits;
        self
    }

    pub fn with_meta_bits(mut self, bits: u32) -> Self {
        self.meta_bits = bits;
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Cells in row-major order, as the producer feeds them.
    pub fn cells(&self) -> impl Iterator<Item = Option<&[u8]>> + '_ {
        self.rows
            .iter()
            .flatten()
            .map(|c| c.as_deref().map(str::as_bytes))
    }

    /// Chunk body as the service sends it: rows without an outer array.
    pub fn json_body(&self) -> String {
        let full = serde_json::to_string(&self.rows).unwrap();
        full[1..full.len() - 1].to_string()
    }

    pub fn descriptor(&self) -> ChunkDescriptor {
        let body = self.json_body();
        ChunkDescriptor {
            row_count: self.row_count(),
            url: self.url.clone(),
            compressed_size: body.len() / 2,
            uncompressed_size: body.len(),
        }
    }

    pub fn config(&self) -> ChunkConfig {
        ChunkConfig {
            block_length_bits: self.block_bits,
            meta_block_length_bits: self.meta_bits,
        }
    }

    /// Cursor reset for this chunk, nothing added yet.
    pub fn cursor(&self) -> ChunkCursor {
        let mut cursor = ChunkCursor::with_bits(self.block_bits, self.meta_bits);
        cursor.reset(
            self.row_count(),
            self.column_count(),
            self.descriptor().uncompressed_size,
        );
        cursor
    }

    /// Reusable chunk reset for this chunk and filled with its cells.
    pub fn create_reusable(&self, chunk_index: usize) -> ReusableChunk {
        let mut chunk = ReusableChunk::with_bits(self.column_count(), self.block_bits, self.meta_bits);
        chunk.reset(&self.descriptor(), chunk_index);
        for cell in self.cells() {
            chunk.add(cell);
        }
        chunk
    }

    /// Empty JSON result chunk reset for this chunk's descriptor.
    pub fn create_result_chunk(&self, chunk_index: usize) -> ResultChunk {
        let mut chunk = ResultChunk::new(
            crate::engine::core::chunk::ResultFormat::Json,
            self.column_count(),
            &self.config(),
        );
        chunk.reset(&self.descriptor(), chunk_index);
        chunk
    }
}
