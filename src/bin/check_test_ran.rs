//! Writes a failing test report if a test left no results behind.
//!
//! ## Usage
//! ```bash
//! check_test_ran build/test_results/test_foo.xml
//! ```
//!
//! Run by the build harness after each test. When the XML file exists it is
//! left alone; otherwise a one-case failure report is written in its place so
//! a crashed test still shows up as failed.

use std::{env, process};

use simtools::cli::{self, output::StdoutSink};

fn main() {
    let code = cli::check_test_ran(env::args_os().collect(), &mut StdoutSink);
    process::exit(code);
}
