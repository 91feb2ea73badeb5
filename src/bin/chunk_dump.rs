use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use result_chunks::shared::config::CONFIG;
use result_chunks::{
    ChunkDescriptor, ChunkIngestor, ChunkPool, FetchError, ResultFormat, load_chunks, logging,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "chunk-dump")]
#[command(about = "Load result chunks listed in a manifest and print them as TSV", long_about = None)]
struct Args {
    /// JSON array of chunk descriptors whose `url` is a local file path
    manifest: PathBuf,

    /// Number of columns in the result set
    #[arg(short, long)]
    columns: usize,

    /// Chunk bodies are Arrow IPC streams instead of JSON
    #[arg(long)]
    arrow: bool,

    /// Maximum number of rows to print (0 = unlimited)
    #[arg(short, long, default_value = "0")]
    limit: usize,
}

fn read_chunk_file(descriptor: &ChunkDescriptor) -> Result<Vec<u8>, FetchError> {
    fs::read(&descriptor.url).map_err(|e| match e.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            FetchError::Transient(format!("{}: {}", descriptor.url, e))
        }
        _ => FetchError::Fatal(format!("{}: {}", descriptor.url, e)),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let manifest = fs::read(&args.manifest)
        .with_context(|| format!("reading manifest {}", args.manifest.display()))?;
    let descriptors: Vec<ChunkDescriptor> =
        serde_json::from_slice(&manifest).context("parsing manifest")?;
    let format = if args.arrow {
        ResultFormat::Arrow
    } else {
        ResultFormat::Json
    };

    let pool = ChunkPool::new(CONFIG.chunk.clone(), descriptors.len());
    let mut chunks: Vec<_> = descriptors
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let mut chunk = pool.acquire(format, args.columns);
            chunk.reset(d, i);
            chunk
        })
        .collect();

    let ingestor = ChunkIngestor::new(read_chunk_file, &CONFIG.fetch);
    load_chunks(&mut chunks, &ingestor)?;
    info!(chunks = chunks.len(), "All chunks loaded");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut printed = 0;
    'chunks: for chunk in chunks.iter_mut() {
        while chunk.next() {
            if args.limit > 0 && printed == args.limit {
                break 'chunks;
            }
            for column in 0..args.columns {
                if column > 0 {
                    out.write_all(b"\t")?;
                }
                match chunk.extract_cell(column) {
                    Some(cell) => out.write_all(cell.as_bytes())?,
                    None => out.write_all(b"NULL")?,
                }
            }
            out.write_all(b"\n")?;
            printed += 1;
        }
    }
    out.flush()?;

    for chunk in chunks {
        pool.release(chunk);
    }
    Ok(())
}
