pub mod arrow_batch_factory;
pub mod chunk_factory;
pub mod fetcher_factory;

pub use arrow_batch_factory::ArrowBatchFactory;
pub use chunk_factory::ChunkFactory;
pub use fetcher_factory::{FetchFailure, FetcherFactory, ScriptedFetcher};
