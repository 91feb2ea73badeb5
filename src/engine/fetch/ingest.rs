use tracing::{debug, info, warn};

use crate::engine::core::chunk::ResultChunk;
use crate::engine::errors::ChunkError;
use crate::shared::config::FetchConfig;

use super::fetcher::ChunkFetcher;

/// Downloads chunk bodies and decodes them into chunks, retrying failures.
///
/// Each retry starts with `reset_for_retry`, so a retried chunk reuses the
/// memory of the failed attempt.
pub struct ChunkIngestor<F> {
    fetcher: F,
    max_retries: usize,
}

impl<F: ChunkFetcher> ChunkIngestor<F> {
    pub fn new(fetcher: F, config: &FetchConfig) -> Self {
        Self {
            fetcher,
            max_retries: config.max_retries,
        }
    }

    pub fn with_max_retries(fetcher: F, max_retries: usize) -> Self {
        Self {
            fetcher,
            max_retries,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fills `chunk`, which must already be `reset` for its descriptor.
    pub fn ingest(&self, chunk: &mut ResultChunk) -> Result<(), ChunkError> {
        let descriptor = chunk.descriptor();
        let chunk_index = chunk.chunk_index();
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                chunk.reset_for_retry();
            }
            attempt += 1;

            let outcome = self
                .fetcher
                .fetch(&descriptor)
                .map_err(|source| ChunkError::Fetch {
                    chunk_index,
                    source,
                })
                .and_then(|body| chunk.ingest(&body));

            let err = match outcome {
                Ok(()) => {
                    info!(
                        target: "chunk_ingestor::ingest",
                        chunk_index,
                        rows = chunk.row_count(),
                        attempts = attempt,
                        "Chunk ready"
                    );
                    return Ok(());
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                err.log_error();
                return Err(err);
            }
            if attempt > self.max_retries {
                let exhausted = ChunkError::RetriesExhausted {
                    chunk_index,
                    attempts: attempt,
                    last: Box::new(err),
                };
                exhausted.log_error();
                return Err(exhausted);
            }
            warn!(
                target: "chunk_ingestor::ingest",
                chunk_index,
                attempt,
                err = %err,
                "Chunk load failed, retrying"
            );
            debug!(
                target: "chunk_ingestor::ingest",
                chunk_index,
                url = %descriptor.url,
                "Resetting chunk for retry"
            );
        }
    }
}
