//! Defines the command-line arguments for the simtools binaries.
//!
//! Both tools use the `clap` derive API. Each binary takes one positional
//! path; the plotter adds a couple of rendering flags.

use clap::Parser;
use std::path::PathBuf;

/// Arguments of `check_test_ran`.
#[derive(Debug, Parser)]
#[command(
    name = "check_test_ran",
    version,
    about = "Writes a failing test report when a test left no results behind."
)]
pub struct CheckTestRanArgs {
    /// The test-result XML file the test was expected to write.
    #[arg(value_name = "REPORT", required = true)]
    pub report: PathBuf,
}

/// Arguments of `plot_actuator`.
#[derive(Debug, Parser)]
#[command(
    name = "plot_actuator",
    version,
    about = "Plots passive vs. actuated joint position, velocity and torque."
)]
pub struct PlotActuatorArgs {
    /// Tab-delimited sample table with one header row.
    #[arg(value_name = "DATA", default_value = "data.csv")]
    pub data: PathBuf,

    /// Directory the SVG figures are written to.
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// YAML file with rendering options (width, height, stroke_width, out_dir).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
