//! Actuator sample tables.
//!
//! The actuator demo logs one row per simulation step, tab separated, after
//! a single header line:
//!
//! ```text
//! actuated_pos  actuated_vel  actuated_torque  passive_pos  passive_vel  passive_torque
//! ```
//!
//! Row order is the time axis. Columns past the sixth are ignored, blank
//! lines and `#` comments are skipped.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::errors::{ToolError, ToolResult};

/// Number of numeric columns every row must carry.
pub const REQUIRED_COLUMNS: usize = 6;

/// State of one joint at one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointState {
    pub position: f64,
    pub velocity: f64,
    pub torque: f64,
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub actuated: JointState,
    pub passive: JointState,
}

impl Sample {
    fn from_columns(c: [f64; REQUIRED_COLUMNS]) -> Self {
        Self {
            actuated: JointState {
                position: c[0],
                velocity: c[1],
                torque: c[2],
            },
            passive: JointState {
                position: c[3],
                velocity: c[4],
                torque: c[5],
            },
        }
    }
}

/// The loaded time series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleTable {
    samples: Vec<Sample>,
}

impl SampleTable {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Reads and parses the table at `path`.
    pub fn load(path: &Path) -> ToolResult<Self> {
        let file = File::open(path).map_err(|e| ToolError::io("open sample table", path, e))?;
        Self::from_reader(file, path)
    }

    /// Parses a table held in memory.
    pub fn parse(text: &str) -> ToolResult<Self> {
        Self::from_reader(text.as_bytes(), Path::new("<memory>"))
    }

    fn from_reader<R: Read>(reader: R, origin: &Path) -> ToolResult<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(reader);

        let mut samples = Vec::new();
        let mut record = StringRecord::new();
        loop {
            let more = reader.read_record(&mut record).map_err(|source| ToolError::Table {
                path: PathBuf::from(origin),
                source,
            })?;
            if !more {
                break;
            }
            samples.push(parse_record(&record)?);
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// `(time index, value)` pairs for one field of every sample.
    pub fn over_time<F>(&self, field: F) -> Vec<(f64, f64)>
    where
        F: Fn(&Sample) -> f64,
    {
        self.samples
            .iter()
            .enumerate()
            .map(|(step, sample)| (step as f64, field(sample)))
            .collect()
    }

    /// `(x, y)` pairs taken from two fields of every sample.
    pub fn paired<X, Y>(&self, x: X, y: Y) -> Vec<(f64, f64)>
    where
        X: Fn(&Sample) -> f64,
        Y: Fn(&Sample) -> f64,
    {
        self.samples.iter().map(|s| (x(s), y(s))).collect()
    }

    /// Largest actuated torque, or `None` for an empty table.
    pub fn max_actuated_torque(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.actuated.torque)
            .reduce(f64::max)
    }
}

fn parse_record(record: &StringRecord) -> ToolResult<Sample> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    if record.len() < REQUIRED_COLUMNS {
        return Err(ToolError::ShortRow {
            line,
            expected: REQUIRED_COLUMNS,
            found: record.len(),
        });
    }

    let mut columns = [0.0; REQUIRED_COLUMNS];
    for (index, slot) in columns.iter_mut().enumerate() {
        let raw = &record[index];
        *slot = raw.parse::<f64>().map_err(|_| ToolError::InvalidNumber {
            line,
            column: index + 1,
            value: raw.to_string(),
        })?;
    }
    Ok(Sample::from_columns(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "a_pos\ta_vel\ta_tau\tp_pos\tp_vel\tp_tau\n";

    #[test]
    fn parses_rows_in_column_order() {
        let text = format!("{HEADER}0.1\t0.2\t0.3\t0.4\t0.5\t0.6\n1\t2\t3\t4\t5\t6\n");
        let table = SampleTable::parse(&text).unwrap();

        assert_eq!(table.len(), 2);
        let first = table.samples()[0];
        assert_eq!(first.actuated.position, 0.1);
        assert_eq!(first.actuated.velocity, 0.2);
        assert_eq!(first.actuated.torque, 0.3);
        assert_eq!(first.passive.position, 0.4);
        assert_eq!(first.passive.velocity, 0.5);
        assert_eq!(first.passive.torque, 0.6);
    }

    #[test]
    fn ignores_extra_columns_blank_lines_and_comments() {
        let text = format!("{HEADER}# warmup\n1\t2\t3\t4\t5\t6\t7\t8\n\n2\t3\t4\t5\t6\t7\n");
        let table = SampleTable::parse(&text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.samples()[1].passive.torque, 7.0);
    }

    #[test]
    fn header_only_table_is_empty() {
        let table = SampleTable::parse(HEADER).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.max_actuated_torque(), None);
    }

    #[test]
    fn short_rows_report_their_line() {
        let text = format!("{HEADER}1\t2\t3\t4\t5\t6\n1\t2\t3\n");
        let err = SampleTable::parse(&text).unwrap_err();
        match err {
            ToolError::ShortRow {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, REQUIRED_COLUMNS);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_fields_report_line_and_column() {
        let text = format!("{HEADER}1\t2\tfast\t4\t5\t6\n");
        let err = SampleTable::parse(&text).unwrap_err();
        match err {
            ToolError::InvalidNumber {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 3);
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn time_index_follows_row_order() {
        let text = format!("{HEADER}1\t0\t0\t9\t0\t0\n2\t0\t0\t8\t0\t0\n3\t0\t0\t7\t0\t0\n");
        let table = SampleTable::parse(&text).unwrap();
        assert_eq!(
            table.over_time(|s| s.passive.position),
            vec![(0.0, 9.0), (1.0, 8.0), (2.0, 7.0)]
        );
    }

    #[test]
    fn max_actuated_torque_scans_every_row() {
        let text = format!("{HEADER}0\t0\t0.5\t0\t0\t9\n0\t0\t1.5\t0\t0\t9\n0\t0\t-2\t0\t0\t9\n");
        let table = SampleTable::parse(&text).unwrap();
        assert_eq!(table.max_actuated_torque(), Some(1.5));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SampleTable::load(&dir.path().join("data.csv")).unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }
}
