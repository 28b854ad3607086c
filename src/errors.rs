//! Error handling for the simtools binaries.
//!
//! Every failure either tool can hit is a [`ToolError`]. The taxonomy is
//! flat: the stub writer only distinguishes a usage error from
//! everything else, and the visualizer treats every load or render problem
//! as fatal. Each variant carries a stable `miette` code so harness logs can
//! be grepped for the failure class.

use std::io;
use std::path::{Path, PathBuf};

use miette::{Diagnostic, Report};
use thiserror::Error;

// ============================================================================
// EXIT CODES
// ============================================================================

/// `EX_USAGE` from `sysexits.h`; platforms without it fall back to 1.
#[cfg(unix)]
pub const EXIT_USAGE: i32 = 64;
#[cfg(not(unix))]
pub const EXIT_USAGE: i32 = 1;

/// Exit code for every non-usage failure.
pub const EXIT_FAILURE: i32 = 1;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Unified error type for both tools.
#[derive(Debug, Error, Diagnostic)]
pub enum ToolError {
    #[error("{message}")]
    #[diagnostic(code(simtools::usage))]
    Usage { message: String },

    #[error("failed to {action} {}", .path.display())]
    #[diagnostic(code(simtools::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read sample table {}", .path.display())]
    #[diagnostic(
        code(simtools::table),
        help("the table must be tab-delimited text with one header row")
    )]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: expected at least {expected} columns, found {found}")]
    #[diagnostic(code(simtools::table::short_row))]
    ShortRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: `{value}` is not a number")]
    #[diagnostic(code(simtools::table::invalid_number))]
    InvalidNumber {
        line: u64,
        column: usize,
        value: String,
    },

    #[error("sample table contains a header but no rows")]
    #[diagnostic(
        code(simtools::table::empty),
        help("record at least one sample before plotting")
    )]
    EmptyTable,

    #[error("invalid plot configuration in {}", .path.display())]
    #[diagnostic(code(simtools::config))]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to render figure `{figure}`: {message}")]
    #[diagnostic(code(simtools::render))]
    Render { figure: String, message: String },
}

impl ToolError {
    /// Wraps an I/O error with the action that was attempted and its target.
    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        ToolError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Usage { .. } => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result alias used throughout the crate.
pub type ToolResult<T> = Result<T, ToolError>;

/// Renders an error as a miette report on stderr.
pub fn print_error(error: ToolError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}
