use serde::{Deserialize, Serialize};

/// One entry of the service's chunk manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkDescriptor {
    pub row_count: usize,
    pub url: String,
    #[serde(default)]
    pub compressed_size: usize,
    pub uncompressed_size: usize,
}

/// Encoding of the chunk bodies of a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    #[default]
    Json,
    Arrow,
}
