pub mod arrow_ipc;
pub mod json_chunk_parser;

pub use arrow_ipc::decode_ipc_stream;
pub use json_chunk_parser::parse_json_chunk;
