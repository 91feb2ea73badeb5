use once_cell::sync::OnceCell;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::info;

use crate::engine::core::chunk::ResultChunk;
use crate::engine::errors::ChunkError;
use crate::shared::config::{CONFIG, FetchConfig};

use super::fetcher::ChunkFetcher;
use super::ingest::ChunkIngestor;

static SHARED_LOADER: OnceCell<ChunkLoader> = OnceCell::new();

/// Worker pool that ingests chunks in parallel. Built once and reused for
/// every result set.
pub struct ChunkLoader {
    pool: ThreadPool,
    parallelism: usize,
}

impl ChunkLoader {
    pub fn new(parallelism: usize) -> Result<Self, ChunkError> {
        let parallelism = parallelism.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .thread_name(|i| format!("chunk-loader-{}", i))
            .build()
            .map_err(|e| ChunkError::WorkerPool(e.to_string()))?;
        info!(
            target: "chunk_loader::new",
            parallelism,
            "Chunk loader pool started"
        );
        Ok(Self { pool, parallelism })
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self, ChunkError> {
        Self::new(config.prefetch_threads)
    }

    /// Process-wide loader sized from `fetch.prefetch_threads`.
    pub fn shared() -> Result<&'static ChunkLoader, ChunkError> {
        SHARED_LOADER.get_or_try_init(|| Self::from_config(&CONFIG.fetch))
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Ingests every chunk. Each chunk is written by exactly one worker, and
    /// all writes are visible to the caller once this returns.
    pub fn load<F: ChunkFetcher>(
        &self,
        chunks: &mut [ResultChunk],
        ingestor: &ChunkIngestor<F>,
    ) -> Result<(), ChunkError> {
        info!(
            target: "chunk_loader::load",
            chunks = chunks.len(),
            parallelism = self.parallelism,
            "Loading chunks"
        );
        self.pool.install(|| {
            chunks
                .par_iter_mut()
                .try_for_each(|chunk| ingestor.ingest(chunk))
        })
    }
}

/// Ingests every chunk on the shared loader.
pub fn load_chunks<F: ChunkFetcher>(
    chunks: &mut [ResultChunk],
    ingestor: &ChunkIngestor<F>,
) -> Result<(), ChunkError> {
    ChunkLoader::shared()?.load(chunks, ingestor)
}
