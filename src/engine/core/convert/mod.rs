pub mod fast_parser;

pub use fast_parser::{Decimal, parse_decimal, parse_i32, parse_i64};
