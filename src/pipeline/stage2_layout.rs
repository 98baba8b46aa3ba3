use serde::Serialize;

use crate::error::{ChartError, Result};
use crate::model::metric::{METRIC_COUNT, Metric, metric_order};
use crate::model::table::ChartData;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSlot {
    pub category: usize,
    pub metric: Metric,
    pub x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarLayout {
    pub category: usize,
    pub metric: Metric,
    pub x: f32,
    pub base: f32,
    pub top: f32,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub bar_width: f32,
    pub centers: Vec<f32>,
    pub bars: Vec<BarLayout>,
}

/// Offset of metric `idx` from its group center, symmetric for `n_metrics` bars.
pub fn metric_offset(idx: usize, n_metrics: usize, width: f32) -> f32 {
    (idx as f32 - (n_metrics as f32 - 1.0) / 2.0) * width
}

pub fn bar_offsets(n_categories: usize, width: f32) -> Vec<BarSlot> {
    let mut out = Vec::with_capacity(n_categories * METRIC_COUNT);
    for category in 0..n_categories {
        for &metric in metric_order() {
            out.push(BarSlot {
                category,
                metric,
                x: category as f32 + metric_offset(metric.index(), METRIC_COUNT, width),
            });
        }
    }
    out
}

pub fn validate_bar_width(width: f32, n_metrics: usize) -> Result<f32> {
    let limit = 1.0 / n_metrics as f32;
    if !width.is_finite() || width <= 0.0 || width >= limit {
        return Err(ChartError::InvalidInput(format!(
            "bar width {} must satisfy 0 < w < {}",
            width, limit
        )));
    }
    Ok(width)
}

pub fn run_stage2(data: &ChartData, width: f32) -> Result<Stage2Output> {
    let bar_width = validate_bar_width(width, METRIC_COUNT)?;
    let n = data.n_categories();

    let bars = bar_offsets(n, bar_width)
        .into_iter()
        .map(|slot| BarLayout {
            category: slot.category,
            metric: slot.metric,
            x: slot.x,
            base: data.base.value(slot.metric, slot.category),
            top: data.stacked_top(slot.metric, slot.category),
        })
        .collect::<Vec<_>>();

    tracing::debug!("laid out {} bars at width {}", bars.len(), bar_width);

    Ok(Stage2Output {
        bar_width,
        centers: (0..n).map(|i| i as f32).collect(),
        bars,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_layout.rs"]
mod tests;
