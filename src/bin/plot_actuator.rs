//! Plots the joint log recorded by the actuator demo.
//!
//! ## Usage
//! ```bash
//! plot_actuator data.csv --out-dir plots
//! ```

use std::{env, process};

use simtools::cli::{self, output::StatusSink};

fn main() {
    process::exit(cli::plot_actuator(env::args_os().collect(), &mut StatusSink::stdout()));
}
