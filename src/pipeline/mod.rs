use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::input::ChartInput;
use crate::input::builtin::DEFAULT_BAR_WIDTH;
use crate::model::metric::METRIC_COUNT;
use crate::pipeline::stage1_validate::run_stage1;
use crate::pipeline::stage2_layout::run_stage2;
use crate::pipeline::stage3_render::{ChartStyle, render_rgb};
use crate::pipeline::stage4_output::{
    ImageFormat, encode_image, layout_json_bytes, write_image, write_layout,
};

pub mod stage1_validate;
pub mod stage2_layout;
pub mod stage3_render;
pub mod stage4_output;

pub const DEFAULT_OUTPUT: &str = "per_class_metrics.jpg";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub out_path: PathBuf,
    /// Overrides the input's own bar width when set.
    pub bar_width: Option<f32>,
    pub style: ChartStyle,
    pub layout_json: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DEFAULT_OUTPUT),
            bar_width: None,
            style: ChartStyle::default(),
            layout_json: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub out_path: PathBuf,
    pub format: ImageFormat,
    pub n_bars: usize,
    pub bytes_written: usize,
}

pub fn resolve_bar_width(input: &ChartInput, cli: Option<f32>) -> f32 {
    cli.or(input.bar_width).unwrap_or(DEFAULT_BAR_WIDTH)
}

/// Runs one full pass. Nothing is written unless every stage before the
/// file write succeeded, and the image is removed again if the layout
/// sidecar cannot be written.
pub fn render_chart(input: &ChartInput, opts: &RenderOptions) -> Result<RenderSummary> {
    let format = ImageFormat::from_path(&opts.out_path)?;

    let data = run_stage1(input)?;
    let layout = run_stage2(&data, resolve_bar_width(input, opts.bar_width))?;
    tracing::info!(
        "{} categories x {} metrics, '{}' stacked on '{}'",
        data.n_categories(),
        METRIC_COUNT,
        data.stacked.label,
        data.base.label
    );

    let rgb = render_rgb(&data, &layout, &opts.style)?;
    let bytes = encode_image(&rgb, opts.style.width_px, opts.style.height_px, format)?;
    let layout_json = match &opts.layout_json {
        Some(path) => Some((path, layout_json_bytes(&data, &layout)?)),
        None => None,
    };

    write_image(&opts.out_path, &bytes)?;
    if let Some((path, json)) = layout_json {
        if let Err(err) = write_layout(path, &json) {
            tracing::warn!(
                "layout {} failed, removing {}",
                path.display(),
                opts.out_path.display()
            );
            if let Err(rm) = fs::remove_file(&opts.out_path) {
                tracing::warn!("could not remove {}: {rm}", opts.out_path.display());
            }
            return Err(err.into());
        }
    }

    Ok(RenderSummary {
        out_path: opts.out_path.clone(),
        format,
        n_bars: layout.bars.len(),
        bytes_written: bytes.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
