//! SVG heatmap rendering for sweep matrices.
//!
//! Cells are drawn in grid-index space (column `j`, row `i`), so any axis
//! spacing renders as equal-sized cells. Ticks sit only on cell centers and
//! show the exact axis value of that cell. Row 0 sits at the bottom.

use anyhow::{anyhow, Result};
use plotters::coord::combinators::BindKeyPoints;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::sweep::types::SweepMatrix;

/// Color of the lowest value in a panel.
pub const LOW_COLOR: RGBColor = RGBColor(0xff, 0x4d, 0x4d);
/// Color of the highest value in a panel.
pub const HIGH_COLOR: RGBColor = RGBColor(0x00, 0xb0, 0x50);
/// Fill for cells without a value.
pub const MISSING_COLOR: RGBColor = RGBColor(0xd9, 0xd9, 0xd9);

const COLOR_BAR_STEPS: usize = 50;
const COLOR_BAR_WIDTH: i32 = 90;

/// Output size and annotation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Print each cell's value inside the cell
    #[serde(default = "default_annotate")]
    pub annotate: bool,

    #[serde(default = "default_cell_font_size")]
    pub cell_font_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            annotate: default_annotate(),
            cell_font_size: default_cell_font_size(),
        }
    }
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    640
}

fn default_annotate() -> bool {
    true
}

fn default_cell_font_size() -> f64 {
    10.0
}

/// Linear red → green color scale; a flat range maps to the low color.
pub fn color_for(value: f64, min: f64, max: f64) -> RGBColor {
    let t = if max > min && value.is_finite() {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(
        lerp(LOW_COLOR.0, HIGH_COLOR.0),
        lerp(LOW_COLOR.1, HIGH_COLOR.1),
        lerp(LOW_COLOR.2, HIGH_COLOR.2),
    )
}

/// White text above the panel midpoint, black otherwise.
pub fn text_color_for(value: f64, min: f64, max: f64) -> RGBColor {
    if value > (min + max) / 2.0 {
        WHITE
    } else {
        BLACK
    }
}

/// Most tick labels drawn along one axis.
const MAX_TICKS: usize = 10;

/// Cell-center coordinates that carry a tick, thinned to at most
/// [`MAX_TICKS`] while always keeping the first cell.
fn tick_positions(n: usize) -> Vec<f64> {
    let step = n.div_ceil(MAX_TICKS).max(1);
    (0..n).step_by(step).map(|idx| idx as f64 + 0.5).collect()
}

/// Label of the axis value whose cell is centered at `coord`; empty for any
/// coordinate that is not a cell center.
fn tick_label(values: &[f64], coord: f64) -> String {
    let offset = coord - 0.5;
    let idx = offset.round();
    if !offset.is_finite() || idx < 0.0 || (offset - idx).abs() > 1e-6 {
        return String::new();
    }
    values
        .get(idx as usize)
        .map(|v| format!("{:.2}", v))
        .unwrap_or_default()
}

fn value_range(matrix: &SweepMatrix) -> (f64, f64) {
    match (matrix.min(), matrix.max()) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => (0.0, 0.0),
    }
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    matrix: &SweepMatrix,
    title: &str,
    config: &RenderConfig,
) -> Result<()> {
    let (rows, cols) = (matrix.rows(), matrix.cols());
    if rows == 0 || cols == 0 {
        return Err(anyhow!("cannot render an empty matrix"));
    }
    let (lo, hi) = value_range(matrix);

    let panel_width = area.dim_in_pixel().0 as i32;
    let (plot_area, bar_area) = area.split_horizontally(panel_width - COLOR_BAR_WIDTH);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(title, ("sans-serif", 22.0))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0f64..cols as f64).with_key_points(tick_positions(cols)),
            (0f64..rows as f64).with_key_points(tick_positions(rows)),
        )?;

    let x_values = &matrix.x_axis.values;
    let y_values = &matrix.y_axis.values;
    let x_fmt = |v: &f64| tick_label(x_values, *v);
    let y_fmt = |v: &f64| tick_label(y_values, *v);

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(matrix.x_axis.field.label())
        .y_desc(matrix.y_axis.field.label())
        .x_labels(MAX_TICKS)
        .y_labels(MAX_TICKS)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .draw()?;

    chart.draw_series(matrix.values.iter().enumerate().flat_map(|(i, row)| {
        row.iter().enumerate().map(move |(j, &v)| {
            let color = if v.is_finite() {
                color_for(v, lo, hi)
            } else {
                MISSING_COLOR
            };
            Rectangle::new(
                [(j as f64, i as f64), (j as f64 + 1.0, i as f64 + 1.0)],
                color.filled(),
            )
        })
    }))?;

    if config.annotate {
        let font_size = config.cell_font_size;
        chart.draw_series(matrix.values.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(move |(j, &v)| {
                    let style = ("sans-serif", font_size)
                        .into_font()
                        .color(&text_color_for(v, lo, hi))
                        .pos(Pos::new(HPos::Center, VPos::Center));
                    Text::new(format!("{:.2}", v), (j as f64 + 0.5, i as f64 + 0.5), style)
                })
        }))?;
    }

    draw_color_bar(&bar_area, lo, hi)
}

fn draw_color_bar(area: &DrawingArea<SVGBackend<'_>, Shift>, lo: f64, hi: f64) -> Result<()> {
    let top = if hi > lo { hi } else { lo + 1.0 };

    let mut bar = ChartBuilder::on(area)
        .margin(10)
        .margin_top(42)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..1f64, lo..top)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_label_formatter(&|v: &f64| format!("{:.2}", v))
        .draw()?;

    let step = (top - lo) / COLOR_BAR_STEPS as f64;
    bar.draw_series((0..COLOR_BAR_STEPS).map(|k| {
        let y0 = lo + step * k as f64;
        let y1 = y0 + step;
        Rectangle::new(
            [(0.0, y0), (1.0, y1)],
            color_for((y0 + y1) / 2.0, lo, hi).filled(),
        )
    }))?;
    Ok(())
}

/// Renders one matrix as a single-panel SVG heatmap.
pub fn render_heatmap(
    matrix: &SweepMatrix,
    title: &str,
    path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<()> {
    let path = path.as_ref();
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;
    draw_panel(&root, matrix, title, config)?;
    root.present()?;

    info!(path = %path.display(), output = %matrix.output, "rendered heatmap");
    Ok(())
}

/// Renders call and put matrices side by side.
///
/// Panel titles are the output labels followed by `title_suffix`.
pub fn render_price_heatmaps(
    call: &SweepMatrix,
    put: &SweepMatrix,
    title_suffix: &str,
    path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<()> {
    let path = path.as_ref();
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((1, 2));
    let [left, right] = panels.as_slice() else {
        return Err(anyhow!("expected two drawing panels"));
    };
    draw_panel(
        left,
        call,
        &format!("{}{}", call.output.label(), title_suffix),
        config,
    )?;
    draw_panel(
        right,
        put,
        &format!("{}{}", put.output.label(), title_suffix),
        config,
    )?;
    root.present()?;

    info!(path = %path.display(), "rendered call/put heatmaps");
    Ok(())
}

/// Renders the empty-state image shown before any heatmap exists.
pub fn render_placeholder(path: impl AsRef<Path>, config: &RenderConfig) -> Result<()> {
    let path = path.as_ref();
    let root = SVGBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (w, h) = (config.width as i32, config.height as i32);
    let grey = RGBColor(0x80, 0x80, 0x80);
    let style = ("sans-serif", 20.0)
        .into_font()
        .color(&grey)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        "Generate heatmap to visualize Call and Put prices",
        (w / 2, h / 2 - 14),
        style.clone(),
    ))?;
    root.draw(&Text::new("(Spot vs Volatility)", (w / 2, h / 2 + 14), style))?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::types::{Axis, OutputField, ParameterField};

    #[test]
    fn test_color_scale_endpoints() {
        assert_eq!(color_for(1.0, 1.0, 3.0), LOW_COLOR);
        assert_eq!(color_for(3.0, 1.0, 3.0), HIGH_COLOR);
        assert_eq!(color_for(5.0, 1.0, 3.0), HIGH_COLOR);
        // Flat matrix
        assert_eq!(color_for(2.0, 2.0, 2.0), LOW_COLOR);
    }

    #[test]
    fn test_text_color_threshold() {
        assert_eq!(text_color_for(9.0, 0.0, 10.0), WHITE);
        assert_eq!(text_color_for(5.0, 0.0, 10.0), BLACK);
        assert_eq!(text_color_for(1.0, 0.0, 10.0), BLACK);
    }

    #[test]
    fn test_ticks_sit_on_cell_centers() {
        assert_eq!(tick_positions(3), vec![0.5, 1.5, 2.5]);
        assert_eq!(tick_positions(1), vec![0.5]);
        assert!(tick_positions(0).is_empty());

        let many = tick_positions(40);
        assert_eq!(many.len(), 10);
        assert_eq!(many[1], 4.5);
    }

    #[test]
    fn test_tick_label_uses_exact_axis_values() {
        let v = [0.1, 0.25, 2.0];
        assert_eq!(tick_label(&v, 0.5), "0.10");
        assert_eq!(tick_label(&v, 1.5), "0.25");
        assert_eq!(tick_label(&v, 2.5), "2.00");
        // Between centers, before the first and past the last cell
        assert_eq!(tick_label(&v, 1.0), "");
        assert_eq!(tick_label(&v, -0.5), "");
        assert_eq!(tick_label(&v, 3.5), "");
    }

    #[test]
    fn test_svg_labels_match_uneven_axis() {
        let x = Axis::new(ParameterField::Strike, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
        let y = Axis::new(
            ParameterField::TimeToMaturity,
            vec![0.1, 0.25, 0.5, 1.0, 2.0],
        );
        let matrix = SweepMatrix {
            values: (0..5)
                .map(|i| (0..5).map(|j| (i * 5 + j) as f64 / 7.0).collect())
                .collect(),
            x_axis: x,
            y_axis: y,
            output: OutputField::Gamma,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gamma.svg");
        let config = RenderConfig {
            annotate: false,
            ..RenderConfig::default()
        };
        render_heatmap(&matrix, "Gamma", &path, &config).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();

        for label in ["0.10", "0.25", "0.50", "1.00", "2.00", "80.00", "120.00"] {
            assert!(svg.contains(&format!(">{}<", label)), "missing tick {}", label);
        }
        for stray in ["-0.14", "0.81", "1.76", "75.00", "95.00"] {
            assert!(!svg.contains(&format!(">{}<", stray)), "unexpected tick {}", stray);
        }
    }
}
