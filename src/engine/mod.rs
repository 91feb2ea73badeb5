pub mod core;
pub mod errors;
pub mod fetch;

pub use errors::*;
