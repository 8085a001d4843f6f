//! Coverage trend chart.
//!
//! Draws one line per project (coverage over time, with point markers) into
//! a single PNG image.

mod fonts;

pub use fonts::{ensure_font, FONT_ENV};

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;

use crate::analysis::CoverageTrendPoint;
use crate::data::format_date;
use crate::error::AnalysisError;

/// File name of the chart inside the output directory.
pub const CHART_FILE_NAME: &str = "coverage_trends.png";

const TITLE: &str = "Coverage Trends Across Projects";

/// Options for chart rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Font for titles, axis labels and the legend.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            font_path: None,
        }
    }
}

/// What ended up in the rendered chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartOutcome {
    pub path: PathBuf,
    /// Projects drawn, in input order.
    pub plotted: Vec<String>,
    /// Projects left out because they had no points.
    pub skipped: Vec<String>,
    /// Whether text (title, axes, legend) could be drawn.
    pub labelled: bool,
}

/// Render coverage trends for several projects into one PNG.
///
/// Projects with an empty trend are skipped. The image is rendered to a
/// temporary file next to `path` and moved into place once complete.
///
/// # Errors
/// Returns [`AnalysisError::Render`] if no project has any point to plot or
/// the backend fails.
pub fn render_coverage_chart(
    path: &Path,
    series: &[(&str, &[CoverageTrendPoint])],
    opts: &ChartOptions,
) -> Result<ChartOutcome, AnalysisError> {
    let render_error = |message: String| AnalysisError::Render {
        path: path.to_path_buf(),
        message,
    };

    let mut plotted = Vec::new();
    let mut skipped = Vec::new();
    let mut lines: Vec<(&str, Vec<(NaiveDate, f64)>)> = Vec::new();

    for (project, trend) in series {
        if trend.is_empty() {
            log::warn!("No coverage points for '{}'; leaving it out of the chart", project);
            skipped.push(project.to_string());
            continue;
        }
        let mut points: Vec<(NaiveDate, f64)> =
            trend.iter().map(|p| (p.date, p.coverage)).collect();
        points.sort_by_key(|(date, _)| *date);
        plotted.push(project.to_string());
        lines.push((*project, points));
    }

    if lines.is_empty() {
        return Err(render_error("no project has coverage points to plot".to_string()));
    }

    let labelled = match ensure_font(opts.font_path.as_deref()) {
        Some(_) => true,
        None => {
            log::warn!(
                "No TrueType font found (set {} or pass a font path); drawing chart without text",
                FONT_ENV
            );
            false
        }
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = tempfile::Builder::new()
        .prefix(".coverage_trends")
        .suffix(".png")
        .tempfile_in(dir)
        .map_err(|source| render_error(source.to_string()))?;

    draw(tmp.path(), &lines, opts, labelled).map_err(|source| render_error(source.to_string()))?;

    tmp.persist(path)
        .map_err(|source| render_error(source.error.to_string()))?;

    log::info!("Wrote coverage chart for {} project(s) to {}", plotted.len(), path.display());
    Ok(ChartOutcome {
        path: path.to_path_buf(),
        plotted,
        skipped,
        labelled,
    })
}

type Line<'a> = (&'a str, Vec<(NaiveDate, f64)>);

fn draw(
    target: &Path,
    lines: &[Line<'_>],
    opts: &ChartOptions,
    labelled: bool,
) -> Result<(), Box<dyn Error>> {
    let (first_day, last_day, y_min, y_max) = bounds(lines);
    let span = (last_day - first_day).num_days().max(1) as f64;
    let x_of = |date: NaiveDate| (date - first_day).num_days() as f64;
    let x_range = -span * 0.03..span * 1.03;

    let root = BitMapBackend::new(target, (opts.width, opts.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if labelled {
        builder
            .caption(TITLE, ("sans-serif", 26))
            .x_label_area_size(50)
            .y_label_area_size(60);
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_min..y_max)?;

    if labelled {
        let date_label = |x: &f64| format_date(&(first_day + Duration::days(x.round() as i64)));
        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Coverage (%)")
            .x_labels(8)
            .x_label_formatter(&date_label)
            .y_label_formatter(&|y| format!("{y:.0}"))
            .light_line_style(BLACK.mix(0.05))
            .draw()?;
    } else {
        // Without a font the mesh cannot label its axes, so draw the grid by hand.
        let grid = BLACK.mix(0.15);
        let x_step = (span / 8.0).max(1.0);
        let mut x = 0.0;
        while x <= span {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x, y_min), (x, y_max)],
                grid,
            )))?;
            x += x_step;
        }
        let mut y = y_min.ceil();
        while y <= y_max {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(-span * 0.03, y), (span * 1.03, y)],
                grid,
            )))?;
            y += 5.0;
        }
    }

    for (idx, (project, points)) in lines.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|(date, coverage)| (x_of(*date), *coverage)),
                color.stroke_width(2),
            ))?
            .label(*project)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });

        chart.draw_series(
            points
                .iter()
                .map(|(date, coverage)| Circle::new((x_of(*date), *coverage), 4, color.filled())),
        )?;
    }

    if labelled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Date span and padded coverage range over all lines.
fn bounds(lines: &[Line<'_>]) -> (NaiveDate, NaiveDate, f64, f64) {
    let mut first_day = NaiveDate::MAX;
    let mut last_day = NaiveDate::MIN;
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;

    for (date, coverage) in lines.iter().flat_map(|(_, points)| points) {
        first_day = first_day.min(*date);
        last_day = last_day.max(*date);
        low = low.min(*coverage);
        high = high.max(*coverage);
    }

    let pad = ((high - low) * 0.1).max(1.0);
    (first_day, last_day, (low - pad).max(0.0), (high + pad).min(100.0 + pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_date;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn trend(values: &[(&str, f64)]) -> Vec<CoverageTrendPoint> {
        values
            .iter()
            .map(|(date, coverage)| CoverageTrendPoint {
                date: parse_date(date).unwrap(),
                coverage: *coverage,
                growth_rate: None,
            })
            .collect()
    }

    #[test]
    fn renders_png_with_all_projects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CHART_FILE_NAME);
        let zlib = trend(&[("15-01-2025", 70.0), ("28-01-2025", 73.0), ("31-01-2025", 75.0)]);
        let libpng = trend(&[("15-01-2025", 75.0), ("28-01-2025", 78.0)]);

        let outcome = render_coverage_chart(
            &path,
            &[("zlib", zlib.as_slice()), ("libpng", libpng.as_slice())],
            &ChartOptions::default(),
        )
        .expect("render");

        assert_eq!(outcome.plotted, vec!["zlib", "libpng"]);
        assert!(outcome.skipped.is_empty());
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(PNG_MAGIC));
    }

    #[test]
    fn empty_trend_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CHART_FILE_NAME);
        let zlib = trend(&[("15-01-2025", 70.0)]);
        let empty: Vec<CoverageTrendPoint> = Vec::new();

        let outcome = render_coverage_chart(
            &path,
            &[("empty", empty.as_slice()), ("zlib", zlib.as_slice())],
            &ChartOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.plotted, vec!["zlib"]);
        assert_eq!(outcome.skipped, vec!["empty"]);
        assert!(path.exists());
    }

    #[test]
    fn nothing_to_plot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CHART_FILE_NAME);
        let empty: Vec<CoverageTrendPoint> = Vec::new();

        let series = [("empty", empty.as_slice())];
        let err = render_coverage_chart(&path, &series, &ChartOptions::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Render { .. }));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn bounds_pad_coverage_range() {
        let lines: Vec<Line<'_>> = vec![(
            "zlib",
            vec![
                (parse_date("01-01-2025").unwrap(), 50.0),
                (parse_date("11-01-2025").unwrap(), 60.0),
            ],
        )];
        let (first, last, low, high) = bounds(&lines);
        assert_eq!((last - first).num_days(), 10);
        assert_eq!(low, 49.0);
        assert_eq!(high, 61.0);
    }
}
