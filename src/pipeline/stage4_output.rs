use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use serde::Serialize;

use crate::error::{ChartError, Result};
use crate::model::table::ChartData;
use crate::pipeline::stage2_layout::{BarLayout, Stage2Output};

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => Ok(ImageFormat::Jpeg),
            Some("png") => Ok(ImageFormat::Png),
            _ => Err(ChartError::InvalidInput(format!(
                "unsupported output format for {} (use .jpg, .jpeg or .png)",
                path.display()
            ))),
        }
    }
}

pub fn encode_image(rgb: &[u8], width: u32, height: u32, format: ImageFormat) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).write_image(
            rgb,
            width,
            height,
            ColorType::Rgb8,
        )?,
        ImageFormat::Png => PngEncoder::new(&mut out).write_image(rgb, width, height, ColorType::Rgb8)?,
    }
    Ok(out)
}

/// Truncates an existing file; a missing parent directory is an error.
pub fn write_image(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    write_bytes(path, bytes)?;
    tracing::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

pub fn write_layout(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    write_bytes(path, bytes)?;
    tracing::info!("wrote layout {}", path.display());
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(bytes)?;
    w.flush()
}

#[derive(Debug, Serialize)]
struct LayoutRecord<'a> {
    category_name: &'a str,
    #[serde(flatten)]
    bar: &'a BarLayout,
}

#[derive(Debug, Serialize)]
struct LayoutSummary<'a> {
    categories: &'a [String],
    base_label: &'a str,
    stacked_label: &'a str,
    bar_width: f32,
    bars: Vec<LayoutRecord<'a>>,
}

/// Pretty JSON of the bar layout, newline-terminated.
pub fn layout_json_bytes(data: &ChartData, layout: &Stage2Output) -> Result<Vec<u8>> {
    let summary = LayoutSummary {
        categories: &data.categories,
        base_label: &data.base.label,
        stacked_label: &data.stacked.label,
        bar_width: layout.bar_width,
        bars: layout
            .bars
            .iter()
            .map(|bar| LayoutRecord {
                category_name: &data.categories[bar.category],
                bar,
            })
            .collect(),
    };
    let mut out = serde_json::to_vec_pretty(&summary)?;
    out.push(b'\n');
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_output.rs"]
mod tests;
