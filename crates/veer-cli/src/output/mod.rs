pub mod json;
pub mod report;

pub use json::*;
pub use report::ReportBuilder;
