use crate::engine::core::chunk::{ResultChunk, ResultFormat};
use crate::engine::errors::ChunkError;
use crate::shared::config::ChunkConfig;
use crate::test_helpers::factories::{ArrowBatchFactory, ChunkFactory};

#[test]
fn json_chunk_ingests_body_and_reads_cells() {
    let factory = ChunkFactory::new()
        .with_row(&[Some("1"), Some("alice")])
        .with_row(&[Some("2"), None]);
    let mut chunk = factory.create_result_chunk(4);
    assert_eq!(chunk.format(), ResultFormat::Json);

    chunk.ingest(factory.json_body().as_bytes()).unwrap();
    assert!(chunk.is_complete());
    assert_eq!(chunk.chunk_index(), 4);
    assert_eq!(chunk.descriptor(), factory.descriptor());

    assert!(chunk.next());
    assert_eq!(chunk.extract_cell(1).unwrap(), "alice");
    assert!(chunk.next());
    assert_eq!(chunk.extract_cell(0).unwrap().to_i32(), Ok(2));
    assert_eq!(chunk.extract_cell(1), None);
    assert!(!chunk.next());
}

#[test]
fn arrow_chunk_ingests_ipc_stream() {
    let bytes = ArrowBatchFactory::ipc_bytes(&[ArrowBatchFactory::new().with_rows(2).create()]);
    let mut chunk = ResultChunk::new(ResultFormat::Arrow, 2, &ChunkConfig::default());
    let mut descriptor = ChunkFactory::new().descriptor();
    descriptor.row_count = 2;
    chunk.reset(&descriptor, 0);

    chunk.ingest(&bytes).unwrap();
    assert!(chunk.is_complete());
    assert!(chunk.next());
    assert!(chunk.next());
    assert_eq!(chunk.extract_cell(0).unwrap(), "1");
    assert_eq!(chunk.extract_cell(1).unwrap(), "name_1");
    assert!(chunk.rewind());
    assert!(!chunk.rewind());
}

#[test]
fn arrow_body_in_json_chunk_is_a_decode_error() {
    let bytes = ArrowBatchFactory::ipc_bytes(&[ArrowBatchFactory::new().create()]);
    let factory = ChunkFactory::new()
        .with_row(&[Some("a"), Some("b")])
        .with_row(&[Some("c"), Some("d")])
        .with_row(&[Some("e"), Some("f")]);
    let mut chunk = factory.create_result_chunk(0);
    let err = chunk.ingest(&bytes).unwrap_err();
    assert!(matches!(err, ChunkError::Json(_)));
    assert!(err.is_retryable());
}

#[test]
fn retry_after_truncated_body_succeeds() {
    let factory = ChunkFactory::new()
        .with_row(&[Some("x"), Some("y")])
        .with_row(&[Some("z"), Some("w")]);
    let body = factory.json_body();
    let mut chunk = factory.create_result_chunk(0);

    assert!(chunk.ingest(&body.as_bytes()[..body.len() - 4]).is_err());
    chunk.reset_for_retry();
    chunk.ingest(body.as_bytes()).unwrap();

    chunk.next();
    chunk.next();
    assert_eq!(chunk.extract_cell(1).unwrap(), "w");
}
