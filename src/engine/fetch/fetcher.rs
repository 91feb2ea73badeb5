use crate::engine::core::chunk::ChunkDescriptor;
use crate::engine::errors::FetchError;

/// Network side of chunk loading.
///
/// Implementations download the chunk named by the descriptor and return its
/// decompressed body. They decide whether a failure is worth retrying.
pub trait ChunkFetcher: Send + Sync {
    fn fetch(&self, descriptor: &ChunkDescriptor) -> Result<Vec<u8>, FetchError>;
}

impl<F> ChunkFetcher for F
where
    F: Fn(&ChunkDescriptor) -> Result<Vec<u8>, FetchError> + Send + Sync,
{
    fn fetch(&self, descriptor: &ChunkDescriptor) -> Result<Vec<u8>, FetchError> {
        self(descriptor)
    }
}
