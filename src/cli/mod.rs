//! The simtools command-line entry points.
//!
//! Each binary in `src/bin` is a thin shim around one function here. The
//! functions take the raw argument list and an [`OutputSink`] and return the
//! process exit code, which keeps them callable from tests.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use crate::config::PlotConfig;
use crate::errors::{print_error, ToolError, ToolResult};
use crate::plot;
use crate::report::ensure_report;
use crate::table::SampleTable;

pub mod args;
pub mod output;

use args::{CheckTestRanArgs, PlotActuatorArgs};
use output::OutputSink;

const CHECK_TEST_RAN: &str = "check_test_ran";

// ============================================================================
// check_test_ran
// ============================================================================

/// Runs `check_test_ran` with `argv` (program name first).
///
/// Exits 0 whether or not a stub was written, `EX_USAGE` when the argument
/// count is wrong and 1 when the report or its directory cannot be created.
pub fn check_test_ran(argv: Vec<OsString>, out: &mut dyn OutputSink) -> i32 {
    let args = match parse_check_test_ran(&argv) {
        Ok(args) => args,
        Err(e) if is_informational(e.kind()) => {
            let _ = e.print();
            return 0;
        }
        Err(_) => return fail(usage_error(&argv)),
    };

    match ensure_report(&args.report, out) {
        Ok(_) => 0,
        Err(e) => fail(e),
    }
}

// Exactly one argument is the report path, whatever it looks like. Only the
// help and version flags and wrong argument counts go through clap.
fn parse_check_test_ran(argv: &[OsString]) -> Result<CheckTestRanArgs, clap::Error> {
    match argv {
        [_, report] if !is_informational_flag(report) => Ok(CheckTestRanArgs {
            report: PathBuf::from(report),
        }),
        _ => CheckTestRanArgs::try_parse_from(argv),
    }
}

fn is_informational_flag(arg: &OsString) -> bool {
    matches!(arg.to_str(), Some("-h" | "--help" | "-V" | "--version"))
}

/// The usage text printed on a bad invocation.
pub fn check_test_ran_usage() -> String {
    format!("Usage:\n\t{} test-file.xml\n", CHECK_TEST_RAN)
}

fn usage_error(argv: &[OsString]) -> ToolError {
    let received: Vec<String> = argv
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    ToolError::Usage {
        message: format!("{}received: {:?}", check_test_ran_usage(), received),
    }
}

// ============================================================================
// plot_actuator
// ============================================================================

/// Runs `plot_actuator` with `argv` (program name first).
///
/// Argument errors use clap's own exit code; load and render failures exit 1.
pub fn plot_actuator(argv: Vec<OsString>, out: &mut dyn OutputSink) -> i32 {
    let args = match PlotActuatorArgs::try_parse_from(&argv) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    match render_actuator_plots(args) {
        Ok(written) => {
            for path in written {
                out.emit(&format!("Wrote {}", path.display()));
            }
            0
        }
        Err(e) => fail(e),
    }
}

fn render_actuator_plots(args: PlotActuatorArgs) -> ToolResult<Vec<PathBuf>> {
    let config = PlotConfig::resolve(args.config.as_deref(), args.out_dir)?;
    let table = SampleTable::load(&args.data)?;
    let figures = plot::figures(&table)?;
    plot::render_all(&figures, &config)
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn is_informational(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

// Usage errors are printed verbatim; everything else gets a miette report.
fn fail(error: ToolError) -> i32 {
    let code = error.exit_code();
    match error {
        ToolError::Usage { message } => eprintln!("{}", message),
        other => print_error(other),
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::OutputBuffer;
    use crate::errors::{EXIT_FAILURE, EXIT_USAGE};
    use std::fs;

    fn argv(args: &[&str]) -> Vec<OsString> {
        std::iter::once(CHECK_TEST_RAN)
            .chain(args.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn missing_argument_is_a_usage_error() {
        let mut out = OutputBuffer::new();
        assert_eq!(check_test_ran(argv(&[]), &mut out), EXIT_USAGE);
        assert!(out.as_str().is_empty());
    }

    #[test]
    fn extra_arguments_are_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.xml");
        let second = dir.path().join("b.xml");
        let mut out = OutputBuffer::new();

        let code = check_test_ran(
            argv(&[first.to_str().unwrap(), second.to_str().unwrap()]),
            &mut out,
        );

        assert_eq!(code, EXIT_USAGE);
        assert!(!first.exists());
        assert!(!second.exists());
    }

    #[test]
    fn writes_stub_and_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/test.xml");
        let mut out = OutputBuffer::new();

        let code = check_test_ran(argv(&[path.to_str().unwrap()]), &mut out);

        assert_eq!(code, 0);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#"name="test.xml""#));
        assert!(content.contains(r#"classname="test""#));
        assert_eq!(out.lines().len(), 2);
    }

    #[test]
    fn io_failures_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let path = blocker.join("result.xml");

        let code = check_test_ran(argv(&[path.to_str().unwrap()]), &mut OutputBuffer::new());

        assert_eq!(code, EXIT_FAILURE);
    }

    #[test]
    fn usage_lists_received_arguments() {
        let err = usage_error(&argv(&["a", "b"]));
        let message = err.to_string();
        assert!(message.starts_with(&check_test_ran_usage()));
        assert!(message.contains(r#"["check_test_ran", "a", "b"]"#));
    }

    #[test]
    fn hyphen_prefixed_path_is_a_report_path() {
        let args = parse_check_test_ran(&argv(&["-results.xml"])).unwrap();
        assert_eq!(args.report, PathBuf::from("-results.xml"));

        let help = parse_check_test_ran(&argv(&["--help"])).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn empty_path_fails_on_write_not_usage() {
        let mut out = OutputBuffer::new();

        let code = check_test_ran(argv(&[""]), &mut out);

        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out.lines().len(), 2);
    }

    #[test]
    fn plot_status_lines_go_through_the_sink() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.csv");
        let plots = dir.path().join("plots");
        fs::write(&data, "h1\th2\th3\th4\th5\th6\n1\t2\t3\t4\t5\t6\n").unwrap();
        let mut out = OutputBuffer::new();

        let code = plot_actuator(
            vec![
                OsString::from("plot_actuator"),
                data.into_os_string(),
                OsString::from("--out-dir"),
                plots.clone().into_os_string(),
            ],
            &mut out,
        );

        assert_eq!(code, 0);
        assert_eq!(
            out.lines(),
            vec![
                format!("Wrote {}", plots.join("joint_position.svg").display()),
                format!("Wrote {}", plots.join("joint_velocity.svg").display()),
                format!("Wrote {}", plots.join("joint_torque.svg").display()),
                format!("Wrote {}", plots.join("torque_vs_velocity.svg").display()),
            ]
        );
    }
}
