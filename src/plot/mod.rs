//! Figure rendering with `plotters`.
//!
//! Each figure is a family of realizations drawn against the shared time vector
//! and written to a PNG or SVG file.

use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;

use crate::error::{Result, UqError};

pub const TIME_LABEL: &str = "Time, [s]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = UqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(UqError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub line_width: u32,
    pub background: RGBColor,
    /// Series colors, cycled when there are more realizations than entries.
    pub palette: Vec<RGBColor>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            format: ImageFormat::Png,
            line_width: 1,
            background: WHITE,
            palette: vec![
                BLUE,
                RGBColor(255, 127, 14),
                RGBColor(44, 160, 44),
                RED,
                RGBColor(148, 103, 189),
                RGBColor(140, 86, 75),
                MAGENTA,
                RGBColor(127, 127, 127),
                RGBColor(188, 189, 34),
                CYAN,
            ],
        }
    }
}

impl PlotConfig {
    fn color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return BLACK;
        }
        self.palette[index % self.palette.len()]
    }
}

/// A set of series sharing the time axis.
#[derive(Debug, Clone)]
pub struct Figure<'a> {
    pub ylabel: &'a str,
    pub xlabel: &'a str,
    pub series: &'a [Vec<f64>],
}

/// Finite (min, max) over the values, widened when degenerate.
fn bounds<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        return (lo - pad, hi + pad);
    }
    (lo, hi)
}

fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure<'_>,
    time: &[f64],
    cfg: &PlotConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let (x_min, x_max) = bounds(time.iter());
    let (y_min, y_max) = bounds(figure.series.iter().flatten());
    let y_pad = (y_max - y_min) * 0.05;

    root.fill(&cfg.background)?;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, (y_min - y_pad)..(y_max + y_pad))?;

    chart
        .configure_mesh()
        .x_desc(figure.xlabel)
        .y_desc(figure.ylabel)
        .draw()?;

    for (i, series) in figure.series.iter().enumerate() {
        let points = time
            .iter()
            .zip(series.iter())
            .filter(|(t, y)| t.is_finite() && y.is_finite())
            .map(|(t, y)| (*t, *y));
        chart.draw_series(LineSeries::new(
            points,
            cfg.color(i).stroke_width(cfg.line_width),
        ))?;
    }

    root.present()?;
    Ok(())
}

/// Render `figure` against `time` into `path` using the configured format.
pub fn render_figure(figure: &Figure<'_>, time: &[f64], path: &Path, cfg: &PlotConfig) -> Result<()> {
    let size = (cfg.width, cfg.height);
    let drawn = match cfg.format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_on_area(&root, figure, time, cfg)
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_on_area(&root, figure, time, cfg)
        }
    };
    drawn.map_err(|e| UqError::Plot {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), series = figure.series.len(), "rendered figure");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!(" svg ".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert!(matches!("gif".parse::<ImageFormat>(), Err(UqError::InvalidFormat(_))));
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let v = [f64::NAN, 2.0, -1.0, f64::INFINITY];
        assert_eq!(bounds(v.iter()), (-1.0, 2.0));
    }

    #[test]
    fn test_bounds_widen_flat_series() {
        assert_eq!(bounds([0.0, 0.0].iter()), (-1.0, 1.0));
        let (lo, hi) = bounds([10.0].iter());
        assert!(lo < 10.0 && hi > 10.0);
        assert_eq!(bounds(std::iter::empty::<&f64>()), (0.0, 1.0));
    }

    fn sample_series() -> (Vec<f64>, Vec<Vec<f64>>) {
        let time: Vec<f64> = (0..50).map(|t| t as f64 * 0.1).collect();
        let series = (1..=3)
            .map(|k| time.iter().map(|t| (t * k as f64).sin()).collect())
            .collect();
        (time, series)
    }

    #[test]
    fn test_render_png() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("yout.png");
        let (time, series) = sample_series();
        let figure = Figure { ylabel: "Predicted y(t)", xlabel: TIME_LABEL, series: &series };
        let cfg = PlotConfig { width: 320, height: 240, ..PlotConfig::default() };

        render_figure(&figure, &time, &path, &cfg).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_render_svg_carries_labels() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("z1out.svg");
        let (time, series) = sample_series();
        let figure = Figure { ylabel: "Predicted z_1(t)", xlabel: TIME_LABEL, series: &series };
        let cfg = PlotConfig { format: ImageFormat::Svg, ..PlotConfig::default() };

        render_figure(&figure, &time, &path, &cfg).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Time, [s]"));
        assert!(svg.contains("Predicted z_1(t)"));
    }

    #[test]
    fn test_palette_cycles() {
        let cfg = PlotConfig::default();
        let n = cfg.palette.len();
        assert_eq!(cfg.color(n + 2), cfg.color(2));
    }
}
