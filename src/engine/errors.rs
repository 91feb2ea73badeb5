use arrow_schema::ArrowError;
use thiserror::Error;
use tracing::{debug, error};

/// Errors raised while turning downloaded chunk bytes into a readable chunk.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("JSON chunk decode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow chunk decode failed: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Row count mismatch: expected {expected}, got {got}")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("Column count mismatch in row {row}: expected {expected}, got {got}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Unsupported Arrow type: {0}")]
    UnsupportedArrowType(String),

    #[error("Chunk {chunk_index} fetch failed: {source}")]
    Fetch {
        chunk_index: usize,
        #[source]
        source: FetchError,
    },

    #[error("Chunk {chunk_index} still failing after {attempts} attempts: {last}")]
    RetriesExhausted {
        chunk_index: usize,
        attempts: usize,
        #[source]
        last: Box<ChunkError>,
    },

    #[error("Worker pool setup failed: {0}")]
    WorkerPool(String),
}

impl ChunkError {
    /// True for decode failures and transient fetch failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChunkError::Json(_)
            | ChunkError::Arrow(_)
            | ChunkError::RowCountMismatch { .. }
            | ChunkError::ColumnCountMismatch { .. } => true,
            ChunkError::Fetch { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    pub fn log_error(&self) {
        match self {
            ChunkError::Json(e) => {
                error!("JSON chunk decode failed: {}", e);
                debug!("JSON decode error details: {:?}", e);
            }
            ChunkError::Arrow(e) => {
                error!("Arrow chunk decode failed: {}", e);
                debug!("Arrow decode error details: {:?}", e);
            }
            ChunkError::Fetch { chunk_index, source } => {
                error!("Fetch of chunk {} failed: {}", chunk_index, source);
                debug!("Fetch error details: {:?}", source);
            }
            other => {
                error!("{}", other);
            }
        }
    }
}

/// Failures reported by the network layer. Classification is its job.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transient fetch failure: {0}")]
    Transient(String),

    #[error("fatal fetch failure: {0}")]
    Fatal(String),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient(_))
    }
}

/// Errors from the text-to-number fast paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("empty numeric value")]
    Empty,

    #[error("invalid byte {byte:#04x} at position {position}")]
    InvalidByte { position: usize, byte: u8 },

    #[error("numeric value out of range")]
    Overflow,

    #[error("cell is not valid UTF-8")]
    Utf8,
}
