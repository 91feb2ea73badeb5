use std::env;

use serde::Deserialize;

use crate::engine::core::block::{DEFAULT_BLOCK_LENGTH_BITS, DEFAULT_META_BLOCK_LENGTH_BITS};

pub const CONFIG_PATH_ENV: &str = "RESULT_CHUNKS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/result_chunks";
pub const ENV_PREFIX: &str = "RESULT_CHUNKS";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chunk: ChunkConfig,
    pub fetch: FetchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Data block size as a power of two (24 = 16 MiB)
    pub block_length_bits: u32,
    /// Meta block size in slots as a power of two (15 = 32768 cells)
    pub meta_block_length_bits: u32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            block_length_bits: DEFAULT_BLOCK_LENGTH_BITS,
            meta_block_length_bits: DEFAULT_META_BLOCK_LENGTH_BITS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub max_retries: usize,
    /// Chunks ingested concurrently by the loader
    pub prefetch_threads: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 7,
            prefetch_threads: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if !(1..=30).contains(&self.chunk.block_length_bits) {
            return Err(config::ConfigError::Message(format!(
                "chunk.block_length_bits must be within 1..=30, got {}",
                self.chunk.block_length_bits
            )));
        }
        if !(1..=24).contains(&self.chunk.meta_block_length_bits) {
            return Err(config::ConfigError::Message(format!(
                "chunk.meta_block_length_bits must be within 1..=24, got {}",
                self.chunk.meta_block_length_bits
            )));
        }
        if self.fetch.prefetch_threads == 0 {
            return Err(config::ConfigError::Message(
                "fetch.prefetch_threads must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_settings_from(&config_path)
}

/// Reads the optional file at `path` (any extension `config` understands)
/// and applies `RESULT_CHUNKS__SECTION__KEY` environment overrides.
pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    Ok(settings)
}
