use std::error::Error;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{ChartError, Result};
use crate::model::metric::{METRIC_COUNT, metric_order};
use crate::model::table::{ChartData, MetricTable};
use crate::pipeline::stage2_layout::Stage2Output;

// lightcoral, indianred, firebrick
const BASE_COLORS: [RGBColor; METRIC_COUNT] = [
    RGBColor(240, 128, 128),
    RGBColor(205, 92, 92),
    RGBColor(178, 34, 34),
];
// lightgreen, mediumseagreen, seagreen
const STACKED_COLORS: [RGBColor; METRIC_COUNT] = [
    RGBColor(144, 238, 144),
    RGBColor(60, 179, 113),
    RGBColor(46, 139, 87),
];
const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);
const GRID_STEP: f32 = 0.2;
const FONT: &str = "sans-serif";
const MAX_SIDE_PX: u32 = 20_000;

#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width_px: u32,
    pub height_px: u32,
    pub title: String,
    pub y_label: String,
    pub y_max: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width_px: 3000,
            height_px: 1800,
            title: "Evaluation Metrics per Entity Type".to_string(),
            y_label: "Score".to_string(),
            y_max: 1.2,
        }
    }
}

impl ChartStyle {
    /// Pixel size for a measure given at the 600 px reference height.
    fn scaled(&self, base: f32) -> u32 {
        ((base * self.height_px as f32 / 600.0).round() as u32).max(1)
    }

    fn font(&self, base: f32) -> (&'static str, i32) {
        (FONT, self.scaled(base) as i32)
    }
}

/// Draws the chart into a packed RGB8 buffer of `width_px * height_px * 3` bytes.
pub fn render_rgb(data: &ChartData, layout: &Stage2Output, style: &ChartStyle) -> Result<Vec<u8>> {
    if !style.y_max.is_finite() || style.y_max <= 0.0 {
        return Err(ChartError::InvalidInput(format!(
            "y-axis maximum {} must be positive",
            style.y_max
        )));
    }

    let mut buf = vec![0u8; buffer_len(style)?];
    draw_chart(&mut buf, data, layout, style).map_err(|e| ChartError::Render(e.to_string()))?;
    tracing::debug!("rendered {}x{} chart", style.width_px, style.height_px);
    Ok(buf)
}

/// RGB8 byte count for the style's image size, capped per side.
fn buffer_len(style: &ChartStyle) -> Result<usize> {
    if style.width_px == 0 || style.height_px == 0 {
        return Err(ChartError::InvalidInput(format!(
            "image size {}x{} must be non-zero",
            style.width_px, style.height_px
        )));
    }
    if style.width_px > MAX_SIDE_PX || style.height_px > MAX_SIDE_PX {
        return Err(ChartError::InvalidInput(format!(
            "image size {}x{} exceeds {} px per side",
            style.width_px, style.height_px, MAX_SIDE_PX
        )));
    }
    (style.width_px as usize)
        .checked_mul(style.height_px as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or_else(|| {
            ChartError::InvalidInput(format!(
                "image size {}x{} is too large",
                style.width_px, style.height_px
            ))
        })
}

fn draw_chart(
    buf: &mut [u8],
    data: &ChartData,
    layout: &Stage2Output,
    style: &ChartStyle,
) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::with_buffer(buf, (style.width_px, style.height_px)).into_drawing_area();
    root.fill(&WHITE)?;

    let legend_height = (style.height_px as f32 * 0.16) as u32;
    let (plot_area, legend_area) = root.split_vertically(style.height_px - legend_height);

    let n = data.n_categories();
    let x_lo = -0.5f32;
    let x_hi = n as f32 - 0.5;
    let y_max = style.y_max;

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(&style.title, style.font(20.0))
        .margin(style.scaled(12.0))
        .x_label_area_size(style.scaled(36.0))
        .y_label_area_size(style.scaled(56.0))
        .build_cartesian_2d(x_lo..x_hi, 0f32..y_max)?;

    let label_font = style.font(13.0).into_font();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_labels(7)
        .y_label_formatter(&|y| format!("{:.1}", y))
        .y_desc(style.y_label.as_str())
        .y_label_style(label_font.clone())
        .axis_desc_style(style.font(15.0).into_font())
        .draw()?;

    let grid_style = GRID_COLOR.mix(0.7).stroke_width(style.scaled(1.0));
    let span = x_hi - x_lo;
    for tick in grid_ticks(y_max) {
        chart.draw_series(
            dash_segments(x_lo, x_hi, span / 150.0, span / 250.0)
                .into_iter()
                .map(|(a, b)| PathElement::new(vec![(a, tick), (b, tick)], grid_style)),
        )?;
    }

    let half = layout.bar_width / 2.0;
    chart.draw_series(layout.bars.iter().map(|bar| {
        Rectangle::new(
            [(bar.x - half, 0.0), (bar.x + half, bar.base.min(y_max))],
            BASE_COLORS[bar.metric.index()].filled(),
        )
    }))?;
    chart.draw_series(layout.bars.iter().map(|bar| {
        Rectangle::new(
            [
                (bar.x - half, bar.base.min(y_max)),
                (bar.x + half, bar.top.min(y_max)),
            ],
            STACKED_COLORS[bar.metric.index()].filled(),
        )
    }))?;

    // Category names sit centered under each group, below the x axis.
    let tick_style = TextStyle::from(label_font).pos(Pos::new(HPos::Center, VPos::Top));
    let label_gap = style.scaled(6.0) as i32;
    for (name, &center) in data.categories.iter().zip(&layout.centers) {
        let (px, py) = chart.backend_coord(&(center, 0.0));
        root.draw(&Text::new(name.as_str(), (px, py + label_gap), tick_style.clone()))?;
    }

    draw_legend(&legend_area, data, style.font(13.0))?;

    root.present()?;
    Ok(())
}

/// Two columns, one per table, one row per metric.
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: &ChartData,
    font: (&'static str, i32),
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let cells = area.split_evenly((METRIC_COUNT, 2));
    let columns: [(&MetricTable, &[RGBColor; METRIC_COUNT]); 2] =
        [(&data.base, &BASE_COLORS), (&data.stacked, &STACKED_COLORS)];

    for (column, (table, colors)) in columns.iter().enumerate() {
        for &metric in metric_order() {
            let cell = &cells[metric.index() * 2 + column];
            let (w, h) = cell.dim_in_pixel();
            let swatch = (h as i32 * 6 / 10).max(1);
            let top = (h as i32 - swatch) / 2;
            let left = w as i32 / 5;
            cell.draw(&Rectangle::new(
                [(left, top), (left + swatch * 2, top + swatch)],
                colors[metric.index()].filled(),
            ))?;
            cell.draw(&Text::new(
                format!("{} - {}", table.label, metric.name()),
                (left + swatch * 2 + swatch / 2, top),
                font.into_font(),
            ))?;
        }
    }
    Ok(())
}

fn grid_ticks(y_max: f32) -> Vec<f32> {
    let mut out = Vec::new();
    let mut k = 1u32;
    while k as f32 * GRID_STEP <= y_max + 1e-4 {
        out.push(k as f32 * GRID_STEP);
        k += 1;
    }
    out
}

fn dash_segments(start: f32, end: f32, dash: f32, gap: f32) -> Vec<(f32, f32)> {
    let mut out = Vec::new();
    if dash <= 0.0 || gap < 0.0 {
        return out;
    }
    let mut a = start;
    while a < end {
        out.push((a, (a + dash).min(end)));
        a += dash + gap;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_render.rs"]
mod tests;
