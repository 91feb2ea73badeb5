//! Streams a JSON chunk body into a [`ReusableChunk`].
//!
//! A chunk body is a comma separated list of rows, each row an array of
//! string-or-null cells: `["1","a"],["2",null]`. Some endpoints wrap the
//! list in an outer array; both forms are accepted. Cells go straight from
//! the decoder into the chunk without building intermediate values.

use std::fmt;
use std::io::Read;

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, SeqAccess, Visitor};
use tracing::debug;

use crate::engine::core::chunk::ReusableChunk;
use crate::engine::errors::ChunkError;

struct ParseState<'c> {
    chunk: &'c mut ReusableChunk,
    columns: usize,
    expected_rows: usize,
    rows: usize,
    failure: Option<ChunkError>,
}

/// Feeds every cell of `bytes` into `chunk` in row-major order.
///
/// The chunk must have been `reset` for this body. Row and column counts are
/// checked against the chunk's dimensions.
pub fn parse_json_chunk(bytes: &[u8], chunk: &mut ReusableChunk) -> Result<(), ChunkError> {
    let mut state = ParseState {
        columns: chunk.column_count(),
        expected_rows: chunk.row_count(),
        chunk,
        rows: 0,
        failure: None,
    };

    let outcome = if is_wrapped(bytes, state.expected_rows) {
        drive(serde_json::Deserializer::from_slice(bytes), &mut state)
    } else {
        let framed = (&b"["[..]).chain(bytes).chain(&b"]"[..]);
        drive(serde_json::Deserializer::from_reader(framed), &mut state)
    };

    if let Some(failure) = state.failure.take() {
        return Err(failure);
    }
    outcome?;

    if state.rows != state.expected_rows {
        return Err(ChunkError::RowCountMismatch {
            expected: state.expected_rows,
            got: state.rows,
        });
    }
    debug!(
        target: "json_chunk_parser::parse",
        chunk_index = state.chunk.chunk_index(),
        rows = state.rows,
        bytes = bytes.len(),
        "Parsed JSON chunk"
    );
    Ok(())
}

fn drive<'de, R>(
    mut de: serde_json::Deserializer<R>,
    state: &mut ParseState<'_>,
) -> Result<(), serde_json::Error>
where
    R: serde_json::de::Read<'de>,
{
    RowsSeed(state).deserialize(&mut de)?;
    de.end()
}

/// True when the rows are already enclosed in an outer array.
///
/// Cells are never arrays, so `[[` always opens a wrapped list. A leading
/// `[]` is a zero-column row unless it is the whole body of an empty chunk.
fn is_wrapped(bytes: &[u8], expected_rows: usize) -> bool {
    let mut significant = bytes.iter().copied().filter(|b| !b.is_ascii_whitespace());
    match (significant.next(), significant.next()) {
        (Some(b'['), Some(b'[')) => true,
        (Some(b'['), Some(b']')) => expected_rows == 0 && significant.next().is_none(),
        _ => false,
    }
}

struct RowsSeed<'s, 'c>(&'s mut ParseState<'c>);

impl<'de> DeserializeSeed<'de> for RowsSeed<'_, '_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for RowsSeed<'_, '_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of rows")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        loop {
            if self.0.rows == self.0.expected_rows {
                let mut extra = 0;
                while seq.next_element::<IgnoredAny>()?.is_some() {
                    extra += 1;
                }
                if extra > 0 {
                    self.0.failure = Some(ChunkError::RowCountMismatch {
                        expected: self.0.expected_rows,
                        got: self.0.rows + extra,
                    });
                    return Err(de::Error::custom("too many rows"));
                }
                return Ok(());
            }
            match seq.next_element_seed(RowSeed(&mut *self.0))? {
                Some(()) => self.0.rows += 1,
                None => return Ok(()),
            }
        }
    }
}

struct RowSeed<'s, 'c>(&'s mut ParseState<'c>);

impl<'de> DeserializeSeed<'de> for RowSeed<'_, '_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for RowSeed<'_, '_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a row of cells")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        let mut got = 0;
        while got < self.0.columns {
            match seq.next_element_seed(CellSeed(&mut *self.0))? {
                Some(()) => got += 1,
                None => break,
            }
        }
        while seq.next_element::<IgnoredAny>()?.is_some() {
            got += 1;
        }
        if got != self.0.columns {
            self.0.failure = Some(ChunkError::ColumnCountMismatch {
                row: self.0.rows,
                expected: self.0.columns,
                got,
            });
            return Err(de::Error::custom("wrong number of cells"));
        }
        Ok(())
    }
}

struct CellSeed<'s, 'c>(&'s mut ParseState<'c>);

impl<'de> DeserializeSeed<'de> for CellSeed<'_, '_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for CellSeed<'_, '_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or null cell")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
        self.0.chunk.add(Some(v.as_bytes()));
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        self.0.chunk.add(None);
        Ok(())
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        self.0.chunk.add(None);
        Ok(())
    }
}
