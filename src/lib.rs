pub use crate::errors::{ToolError, ToolResult};

pub mod cli;
pub mod config;
pub mod errors;
pub mod plot;
pub mod report;
pub mod table;
