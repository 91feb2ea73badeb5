use std::io::Write;

use tempfile::tempdir;

use crate::shared::config::{Settings, load_settings_from};

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent");
    let settings = load_settings_from(path.to_str().unwrap()).expect("defaults load");
    assert_eq!(settings.chunk.block_length_bits, 24);
    assert_eq!(settings.chunk.meta_block_length_bits, 15);
    assert_eq!(settings.fetch.max_retries, 7);
    assert_eq!(settings.fetch.prefetch_threads, 4);
    assert_eq!(settings.logging.stdout_level, "info");
}

#[test]
fn partial_toml_overrides_only_given_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chunks.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "[chunk]\nblock_length_bits = 20\n\n[fetch]\nprefetch_threads = 8\n"
    )
    .unwrap();

    let settings = load_settings_from(path.to_str().unwrap()).expect("file loads");
    assert_eq!(settings.chunk.block_length_bits, 20);
    assert_eq!(settings.chunk.meta_block_length_bits, 15);
    assert_eq!(settings.fetch.prefetch_threads, 8);
    assert_eq!(settings.fetch.max_retries, 7);
}

#[test]
fn out_of_range_bits_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[chunk]\nblock_length_bits = 0\n").unwrap();

    let err = load_settings_from(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("block_length_bits"));
}

#[test]
fn zero_prefetch_threads_is_invalid() {
    let mut settings = Settings::default();
    assert!(settings.validate().is_ok());
    settings.fetch.prefetch_threads = 0;
    assert!(settings.validate().is_err());
}
