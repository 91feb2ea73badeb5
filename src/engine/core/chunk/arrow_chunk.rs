use arrow_array::cast::AsArray;
use arrow_array::types::{
    Date32Type, Decimal128Type, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type,
    Int64Type, TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType, UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};
use arrow_array::{Array, RecordBatch};
use arrow_schema::{DataType, TimeUnit};
use tracing::debug;

use crate::engine::core::cursor::Utf8Buffer;
use crate::engine::core::parse::decode_ipc_stream;
use crate::engine::errors::ChunkError;

use super::descriptor::ChunkDescriptor;

/// Result chunk delivered as Arrow record batches.
///
/// The row cursor is global to the chunk and may cross batch boundaries in
/// both directions. Cells are rendered as the text the JSON encoding would
/// have carried, borrowing string data straight from the Arrow buffers.
#[derive(Debug)]
pub struct ArrowResultChunk {
    batches: Vec<RecordBatch>,
    batch_starts: Vec<usize>,
    ingested_rows: usize,
    row_count: usize,
    column_count: usize,
    chunk_index: usize,
    current_row_index: i64,
    url: String,
    compressed_size: usize,
    uncompressed_size: usize,
}

macro_rules! int_cell {
    ($column:expr, $ty:ty, $row:expr) => {{
        let mut buf = itoa::Buffer::new();
        let text = buf.format($column.as_primitive::<$ty>().value($row));
        Utf8Buffer::owned(text.as_bytes().to_vec())
    }};
}

macro_rules! float_cell {
    ($column:expr, $ty:ty, $row:expr) => {{
        let mut buf = ryu::Buffer::new();
        let text = buf.format($column.as_primitive::<$ty>().value($row));
        Utf8Buffer::owned(text.as_bytes().to_vec())
    }};
}

impl ArrowResultChunk {
    pub fn new(column_count: usize) -> Self {
        Self {
            batches: Vec::new(),
            batch_starts: Vec::new(),
            ingested_rows: 0,
            row_count: 0,
            column_count,
            chunk_index: 0,
            current_row_index: -1,
            url: String::new(),
            compressed_size: 0,
            uncompressed_size: 0,
        }
    }

    pub fn reset(&mut self, descriptor: &ChunkDescriptor, chunk_index: usize) {
        self.clear_batches();
        self.row_count = descriptor.row_count;
        self.url.clone_from(&descriptor.url);
        self.compressed_size = descriptor.compressed_size;
        self.uncompressed_size = descriptor.uncompressed_size;
        self.chunk_index = chunk_index;
        self.current_row_index = -1;
        debug!(
            target: "arrow_chunk::reset",
            chunk_index,
            rows = self.row_count,
            columns = self.column_count,
            "Reset Arrow chunk"
        );
    }

    /// Decodes an Arrow IPC stream and appends its batches. The stream must
    /// carry exactly the declared number of rows.
    pub fn ingest_ipc(&mut self, bytes: &[u8]) -> Result<(), ChunkError> {
        for batch in decode_ipc_stream(bytes)? {
            self.add_batch(batch)?;
        }
        if self.ingested_rows != self.row_count {
            return Err(ChunkError::RowCountMismatch {
                expected: self.row_count,
                got: self.ingested_rows,
            });
        }
        Ok(())
    }

    pub fn add_batch(&mut self, batch: RecordBatch) -> Result<(), ChunkError> {
        if batch.num_columns() != self.column_count {
            return Err(ChunkError::ColumnCountMismatch {
                row: self.ingested_rows,
                expected: self.column_count,
                got: batch.num_columns(),
            });
        }
        let got = self.ingested_rows + batch.num_rows();
        if got > self.row_count {
            return Err(ChunkError::RowCountMismatch {
                expected: self.row_count,
                got,
            });
        }
        for field in batch.schema().fields() {
            check_supported(field.data_type())?;
        }
        if batch.num_rows() == 0 {
            return Ok(());
        }
        self.batch_starts.push(self.ingested_rows);
        self.ingested_rows = got;
        self.batches.push(batch);
        Ok(())
    }

    #[inline]
    pub fn next(&mut self) -> bool {
        self.current_row_index += 1;
        self.current_row_index < self.row_count as i64
    }

    #[inline]
    pub fn rewind(&mut self) -> bool {
        self.current_row_index -= 1;
        self.current_row_index >= 0
    }

    pub fn extract_cell(&self, column_index: usize) -> Option<Utf8Buffer<'_>> {
        let row = usize::try_from(self.current_row_index).ok()?;
        self.extract_cell_at(row, column_index)
    }

    pub fn extract_cell_at(&self, row: usize, column_index: usize) -> Option<Utf8Buffer<'_>> {
        if row >= self.ingested_rows || column_index >= self.column_count {
            return None;
        }
        let batch_index = self.batch_starts.partition_point(|&start| start <= row) - 1;
        let batch = &self.batches[batch_index];
        render_cell(
            batch.column(column_index).as_ref(),
            row - self.batch_starts[batch_index],
        )
    }

    /// Drops the decoded batches; the retried download decodes them again.
    pub fn reset_for_retry(&mut self) {
        self.clear_batches();
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.ingested_rows == self.row_count
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[inline]
    pub fn chunk_index(&self) -> usize {
        self.chunk_index
    }

    #[inline]
    pub fn current_row_index(&self) -> i64 {
        self.current_row_index
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn compressed_size(&self) -> usize {
        self.compressed_size
    }

    pub fn uncompressed_size(&self) -> usize {
        self.uncompressed_size
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    fn clear_batches(&mut self) {
        self.batches.clear();
        self.batch_starts.clear();
        self.ingested_rows = 0;
    }
}

fn check_supported(data_type: &DataType) -> Result<(), ChunkError> {
    match data_type {
        DataType::Null
        | DataType::Boolean
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64
        | DataType::Decimal128(_, _)
        | DataType::Date32
        | DataType::Timestamp(_, _)
        | DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Utf8View
        | DataType::Binary
        | DataType::LargeBinary => Ok(()),
        other => Err(ChunkError::UnsupportedArrowType(other.to_string())),
    }
}

fn render_cell(column: &dyn Array, row: usize) -> Option<Utf8Buffer<'_>> {
    if column.is_null(row) {
        return None;
    }
    let cell = match column.data_type() {
        DataType::Utf8 => Utf8Buffer::borrowed(column.as_string::<i32>().value(row).as_bytes()),
        DataType::LargeUtf8 => {
            Utf8Buffer::borrowed(column.as_string::<i64>().value(row).as_bytes())
        }
        DataType::Utf8View => Utf8Buffer::borrowed(column.as_string_view().value(row).as_bytes()),
        DataType::Binary => {
            Utf8Buffer::owned(hex::encode(column.as_binary::<i32>().value(row)).into_bytes())
        }
        DataType::LargeBinary => {
            Utf8Buffer::owned(hex::encode(column.as_binary::<i64>().value(row)).into_bytes())
        }
        DataType::Boolean => {
            let text: &'static [u8] = if column.as_boolean().value(row) {
                b"true"
            } else {
                b"false"
            };
            Utf8Buffer::borrowed(text)
        }
        DataType::Int8 => int_cell!(column, Int8Type, row),
        DataType::Int16 => int_cell!(column, Int16Type, row),
        DataType::Int32 => int_cell!(column, Int32Type, row),
        DataType::Int64 => int_cell!(column, Int64Type, row),
        DataType::UInt8 => int_cell!(column, UInt8Type, row),
        DataType::UInt16 => int_cell!(column, UInt16Type, row),
        DataType::UInt32 => int_cell!(column, UInt32Type, row),
        DataType::UInt64 => int_cell!(column, UInt64Type, row),
        DataType::Date32 => int_cell!(column, Date32Type, row),
        DataType::Float32 => float_cell!(column, Float32Type, row),
        DataType::Float64 => float_cell!(column, Float64Type, row),
        DataType::Decimal128(_, scale) => {
            let value = column.as_primitive::<Decimal128Type>().value(row);
            Utf8Buffer::owned(format_scaled(value, *scale).into_bytes())
        }
        DataType::Timestamp(unit, _) => {
            let (value, scale) = match unit {
                TimeUnit::Second => (column.as_primitive::<TimestampSecondType>().value(row), 0),
                TimeUnit::Millisecond => {
                    (column.as_primitive::<TimestampMillisecondType>().value(row), 3)
                }
                TimeUnit::Microsecond => {
                    (column.as_primitive::<TimestampMicrosecondType>().value(row), 6)
                }
                TimeUnit::Nanosecond => {
                    (column.as_primitive::<TimestampNanosecondType>().value(row), 9)
                }
            };
            Utf8Buffer::owned(format_scaled(value as i128, scale).into_bytes())
        }
        // Other types are rejected in add_batch.
        _ => return None,
    };
    Some(cell)
}

/// Renders `value * 10^-scale` in plain decimal notation.
pub(crate) fn format_scaled(value: i128, scale: i8) -> String {
    let mut buf = itoa::Buffer::new();
    let digits = buf.format(value.unsigned_abs());
    let sign = if value < 0 { "-" } else { "" };
    if scale <= 0 {
        let zeros = if value == 0 { 0 } else { scale.unsigned_abs() as usize };
        return format!("{}{}{}", sign, digits, "0".repeat(zeros));
    }
    let scale = scale as usize;
    if digits.len() > scale {
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        format!("{}{}.{}", sign, int_part, frac_part)
    } else {
        format!("{}0.{}{}", sign, "0".repeat(scale - digits.len()), digits)
    }
}
