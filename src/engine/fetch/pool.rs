use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::debug;

use crate::engine::core::chunk::{ResultChunk, ResultFormat};
use crate::shared::config::ChunkConfig;

/// Keeps released chunks so the next chunk of the same shape reuses their
/// blocks instead of allocating new ones.
#[derive(Debug)]
pub struct ChunkPool {
    config: ChunkConfig,
    max_idle: usize,
    free: Mutex<VecDeque<ResultChunk>>,
}

impl ChunkPool {
    pub fn new(config: ChunkConfig, max_idle: usize) -> Self {
        Self {
            config,
            max_idle,
            free: Mutex::new(VecDeque::new()),
        }
    }

    /// Returns an idle chunk with the given shape, or a fresh one.
    pub fn acquire(&self, format: ResultFormat, column_count: usize) -> ResultChunk {
        let mut free = self.free.lock();
        let reusable = free
            .iter()
            .position(|c| c.format() == format && c.column_count() == column_count)
            .and_then(|idx| free.remove(idx));
        match reusable {
            Some(chunk) => {
                debug!(
                    target: "chunk_pool::acquire",
                    ?format,
                    column_count,
                    idle = free.len(),
                    "Reusing pooled chunk"
                );
                chunk
            }
            None => ResultChunk::new(format, column_count, &self.config),
        }
    }

    /// Hands a chunk back. Chunks beyond `max_idle` are dropped.
    pub fn release(&self, chunk: ResultChunk) {
        let mut free = self.free.lock();
        if free.len() < self.max_idle {
            free.push_back(chunk);
        }
    }

    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}
