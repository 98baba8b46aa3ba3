mod error;
mod input;
mod logging;
mod model;
mod pipeline;

use std::path::PathBuf;

use clap::Parser;

use crate::error::Result;
use crate::input::load_chart_input;
use crate::pipeline::stage3_render::ChartStyle;
use crate::pipeline::{DEFAULT_OUTPUT, RenderOptions, render_chart};

/// Renders a per-entity precision/recall/F1 chart comparing two NER models.
///
/// Without arguments the builtin tables are drawn to `per_class_metrics.jpg`
/// in the current directory.
#[derive(Debug, Parser)]
#[command(name = "nerchart", version, about)]
struct Cli {
    /// JSON file with `categories`, `base`, `stacked` and optional `bar_width`.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output image (.jpg, .jpeg or .png).
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Bar width in category units; must be below 1/3.
    #[arg(long)]
    bar_width: Option<f32>,

    #[arg(long, default_value_t = 3000)]
    image_width: u32,

    #[arg(long, default_value_t = 1800)]
    image_height: u32,

    /// Also write the computed bar layout as JSON.
    #[arg(long)]
    layout_json: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(&cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = load_chart_input(cli.input.as_deref())?;
    let opts = build_options(cli);

    let summary = render_chart(&input, &opts)?;
    tracing::info!(
        "rendered {} bars as {:?} ({} bytes) to {}",
        summary.n_bars,
        summary.format,
        summary.bytes_written,
        summary.out_path.display()
    );
    Ok(())
}

fn build_options(cli: &Cli) -> RenderOptions {
    RenderOptions {
        out_path: cli.out.clone(),
        bar_width: cli.bar_width,
        style: ChartStyle {
            width_px: cli.image_width,
            height_px: cli.image_height,
            ..ChartStyle::default()
        },
        layout_json: cli.layout_json.clone(),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
