use std::io::Cursor;

use arrow_array::RecordBatch;
use arrow_ipc::reader::StreamReader;
use tracing::debug;

use crate::engine::errors::ChunkError;

/// Decodes an Arrow IPC stream body into its record batches.
///
/// A chunk may carry several batches; an empty stream yields none.
pub fn decode_ipc_stream(bytes: &[u8]) -> Result<Vec<RecordBatch>, ChunkError> {
    let reader = StreamReader::try_new(Cursor::new(bytes), None)?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    debug!(
        target: "arrow_ipc::decode",
        bytes = bytes.len(),
        batches = batches.len(),
        rows = batches.iter().map(RecordBatch::num_rows).sum::<usize>(),
        "Decoded Arrow IPC stream"
    );
    Ok(batches)
}
