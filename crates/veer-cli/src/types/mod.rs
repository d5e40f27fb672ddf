pub mod config;
pub mod session_data;
pub mod session_file;

pub use config::*;
pub use session_data::*;
pub use session_file::*;
