pub mod block;
pub mod chunk;
pub mod convert;
pub mod cursor;
pub mod parse;

pub use block::{BlockGeometry, BlockStore, MetaIndex, MetaSlot, NULL_LENGTH};
pub use chunk::{ArrowResultChunk, ChunkDescriptor, ResultChunk, ResultFormat, ReusableChunk};
pub use cursor::{ChunkCursor, Utf8Buffer};
