pub mod fetcher;
pub mod ingest;
pub mod parallel;
pub mod pool;

pub use fetcher::ChunkFetcher;
pub use ingest::ChunkIngestor;
pub use parallel::{ChunkLoader, load_chunks};
pub use pool::ChunkPool;
