pub mod cell;
pub mod chunk_cursor;

pub use cell::Utf8Buffer;
pub use chunk_cursor::{CELL_FRAMING_BYTES, ChunkCursor, ROW_FRAMING_BYTES};
