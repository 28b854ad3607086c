//! Diagnostic plots for the passive-joint actuator demo.
//!
//! Four figures compare the passive joint against the actuated one:
//! position, velocity and torque over time, then torque against velocity.
//! Building the figures ([`figures`]) is separate from drawing them
//! ([`render_all`]) so the series and limits can be checked without touching
//! the filesystem.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::config::PlotConfig;
use crate::errors::{ToolError, ToolResult};
use crate::table::{Sample, SampleTable};

/// Lower bound of the torque axis. Keeps the zero line visible.
pub const TORQUE_FLOOR: f64 = -0.1;
/// Headroom above the largest actuated torque.
pub const TORQUE_MARGIN: f64 = 0.1;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);
const LEGEND_SWATCH: i32 = 20;

/// Which joint a series belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Passive,
    Actuated,
}

impl Joint {
    pub fn label(self) -> &'static str {
        match self {
            Joint::Passive => "Passive",
            Joint::Actuated => "Actuated",
        }
    }

    fn color(self) -> RGBColor {
        match self {
            Joint::Passive => RGBColor(31, 119, 180),
            Joint::Actuated => RGBColor(255, 127, 14),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub joint: Joint,
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// File stem of the rendered figure.
    pub name: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Drawn in order; passive first.
    pub series: Vec<Series>,
    /// Fixed y-axis limits. `None` fits the data.
    pub y_limits: Option<(f64, f64)>,
}

/// Builds the four actuator figures from a loaded table.
pub fn figures(table: &SampleTable) -> ToolResult<Vec<Figure>> {
    let max_torque = table.max_actuated_torque().ok_or(ToolError::EmptyTable)?;
    let torque_limits = Some((TORQUE_FLOOR, max_torque + TORQUE_MARGIN));

    let over_time = |passive: fn(&Sample) -> f64, actuated: fn(&Sample) -> f64| {
        vec![
            Series {
                joint: Joint::Passive,
                points: table.over_time(passive),
            },
            Series {
                joint: Joint::Actuated,
                points: table.over_time(actuated),
            },
        ]
    };

    Ok(vec![
        Figure {
            name: "joint_position",
            title: "Joint position",
            x_label: "Time",
            y_label: "Joint position",
            series: over_time(|s| s.passive.position, |s| s.actuated.position),
            y_limits: None,
        },
        Figure {
            name: "joint_velocity",
            title: "Joint velocity",
            x_label: "Time",
            y_label: "Joint velocity",
            series: over_time(|s| s.passive.velocity, |s| s.actuated.velocity),
            y_limits: None,
        },
        Figure {
            name: "joint_torque",
            title: "Joint torque",
            x_label: "Time",
            y_label: "Joint torque",
            series: over_time(|s| s.passive.torque, |s| s.actuated.torque),
            y_limits: torque_limits,
        },
        Figure {
            name: "torque_vs_velocity",
            title: "Torque vs. velocity",
            x_label: "Joint velocity",
            y_label: "Joint torque",
            series: vec![
                Series {
                    joint: Joint::Passive,
                    points: table.paired(|s| s.passive.velocity, |s| s.passive.torque),
                },
                Series {
                    joint: Joint::Actuated,
                    points: table.paired(|s| s.actuated.velocity, |s| s.actuated.torque),
                },
            ],
            y_limits: torque_limits,
        },
    ])
}

/// Draws every figure as `<out_dir>/<name>.svg` and returns the written paths.
pub fn render_all(figures: &[Figure], config: &PlotConfig) -> ToolResult<Vec<PathBuf>> {
    let dir = config.output_dir();
    fs::create_dir_all(dir).map_err(|e| ToolError::io("create directory", dir, e))?;

    let mut written = Vec::with_capacity(figures.len());
    for figure in figures {
        let path = dir.join(format!("{}.svg", figure.name));
        draw_figure(figure, &path, config).map_err(|e| ToolError::Render {
            figure: figure.name.to_string(),
            message: e.to_string(),
        })?;
        written.push(path);
    }
    Ok(written)
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn draw_figure(figure: &Figure, path: &Path, config: &PlotConfig) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let points = || figure.series.iter().flat_map(|s| s.points.iter().copied());
    let (x_min, x_max) = padded_range(points().map(|(x, _)| x));
    let (y_min, y_max) = match figure.y_limits {
        Some(limits) => limits,
        None => padded_range(points().map(|(_, y)| y)),
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(figure.title, CAPTION_FONT)
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(figure.x_label)
        .y_desc(figure.y_label)
        .draw()?;

    let stroke = config.stroke_width;
    for series in &figure.series {
        let color = series.joint.color();
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(stroke),
            ))?
            .label(series.joint.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], color.stroke_width(stroke))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Min/max of `values` with 5% padding; a flat series gets ±0.5.
fn padded_range<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    let padding = if span < 1e-6 { 0.5 } else { span * 0.05 };
    (min - padding, max + padding)
}
