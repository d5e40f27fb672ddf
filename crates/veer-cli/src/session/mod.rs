pub mod parser;

pub use parser::SessionParser;
