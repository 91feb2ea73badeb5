use std::sync::Arc;

use arrow_array::{ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow_ipc::writer::StreamWriter;
use arrow_schema::{DataType, Field, Schema};

/// Builds `(id INT64, name UTF8)` record batches and IPC stream bodies.
pub struct ArrowBatchFactory {
    first_id: i64,
    rows: usize,
    null_every: Option<usize>,
}

impl ArrowBatchFactory {
    pub fn new() -> Self {
        Self {
            first_id: 0,
            rows: 3,
            null_every: None,
        }
    }

    pub fn with_first_id(mut self, id: i64) -> Self {
        self.first_id = id;
        self
    }

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Makes every `n`-th name NULL.
    pub fn with_null_every(mut self, n: usize) -> Self {
        self.null_every = Some(n);
        self
    }

    pub fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]))
    }

    pub fn create(&self) -> RecordBatch {
        let ids: Vec<i64> = (0..self.rows as i64).map(|i| self.first_id + i).collect();
        let names: Vec<Option<String>> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| match self.null_every {
                Some(n) if i % n == 0 => None,
                _ => Some(format!("name_{}", id)),
            })
            .collect();
        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int64Array::from(ids)),
            Arc::new(StringArray::from(names)),
        ];
        RecordBatch::try_new(Self::schema(), columns).unwrap()
    }

    pub fn ipc_bytes(batches: &[RecordBatch]) -> Vec<u8> {
        let schema = batches
            .first()
            .map(|b| b.schema())
            .unwrap_or_else(Self::schema);
        let mut buffer = Vec::new();
        {
            let mut writer = StreamWriter::try_new(&mut buffer, &schema).unwrap();
            for batch in batches {
                writer.write(batch).unwrap();
            }
            writer.finish().unwrap();
        }
        buffer
    }
}
