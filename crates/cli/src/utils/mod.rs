pub mod parser;

pub use parser::{parse_location, read_buffer};
