//! Stub test-result reports.
//!
//! A build harness runs each test binary and then collects the JUnit-style
//! XML file the test was supposed to leave behind. A test that crashed
//! before writing its results leaves nothing, which the harness would count
//! as "no failures". [`ensure_report`] closes that gap: if the expected file
//! is missing it writes a single failing test case in its place.
//!
//! The report moves one way only, from missing to present. An existing file
//! is always trusted and never touched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::output::OutputSink;
use crate::errors::{ToolError, ToolResult};

/// Name of the synthetic test case written into stub reports.
pub const STUB_CASE_NAME: &str = "test_ran";

const XML_SUFFIX: &str = ".xml";

/// Outcome of [`ensure_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// A report already existed and was left alone.
    Present,
    /// No report existed; a failing stub was written.
    Written,
}

/// The failing report synthesized for a missing results file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubReport {
    /// Base file name of the report path, e.g. `test_foo.xml`.
    pub test_name: String,
    /// `test_name` without its `.xml` suffix, used as the class name.
    pub class_name: String,
    /// The report path exactly as the caller supplied it.
    pub expected_path: String,
}

impl StubReport {
    pub fn for_path(path: &Path) -> Self {
        let test_name = test_name(path);
        let class_name = strip_xml_suffix(&test_name).to_string();
        Self {
            test_name,
            class_name,
            expected_path: path.display().to_string(),
        }
    }

    /// Renders the report document. There is no trailing newline.
    pub fn render(&self) -> String {
        let test = escape_attr(&self.test_name);
        let class = escape_attr(&self.class_name);
        let expected = escape_attr(&self.expected_path);
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite tests="1" failures="1" time="1" errors="0" name="{test}">
  <testcase name="{case}" status="run" time="1" classname="{class}">
    <failure message="Unable to find test results for {test}, test did not run.
Expected results in {expected}" type=""/>
  </testcase>
</testsuite>"#,
            case = STUB_CASE_NAME,
        )
    }
}

/// Makes sure a results file exists at `path`.
///
/// Emits `Checking for test results in <path>` unconditionally. When nothing
/// exists at `path`, creates any missing parent directories, emits a second
/// line and writes a [`StubReport`] with a single write.
///
/// The existence check and the write are not atomic. A file created by
/// another process in between is overwritten.
pub fn ensure_report(path: &Path, out: &mut dyn OutputSink) -> ToolResult<ReportStatus> {
    out.emit(&format!("Checking for test results in {}", path.display()));

    if path.exists() {
        return Ok(ReportStatus::Present);
    }

    if let Some(parent) = parent_dir(path) {
        if !parent.exists() {
            fs::create_dir_all(&parent)
                .map_err(|e| ToolError::io("create directory", &parent, e))?;
        }
    }

    out.emit(&format!(
        "Cannot find results, writing failure results to {}",
        path.display()
    ));

    let report = StubReport::for_path(path);
    fs::write(path, report.render()).map_err(|e| ToolError::io("write report", path, e))?;
    Ok(ReportStatus::Written)
}

/// Base file name of `path`, or an empty string when it has none.
pub fn test_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Removes one trailing `.xml` from `name`. Other names pass through.
pub fn strip_xml_suffix(name: &str) -> &str {
    name.strip_suffix(XML_SUFFIX).unwrap_or(name)
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

// A bare file name has an empty parent, which means the working directory.
fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
