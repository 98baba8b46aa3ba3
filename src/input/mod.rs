use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

pub mod builtin;

pub use builtin::builtin_chart_input;

/// Metric table as read from input, keyed by metric display name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMetricTable {
    pub label: String,
    pub scores: BTreeMap<String, Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartInput {
    pub categories: Vec<String>,
    pub base: RawMetricTable,
    pub stacked: RawMetricTable,
    #[serde(default)]
    pub bar_width: Option<f32>,
}

pub fn load_chart_input(path: Option<&Path>) -> Result<ChartInput> {
    let Some(path) = path else {
        tracing::debug!("no input file given, using builtin tables");
        return Ok(builtin_chart_input());
    };
    let reader = BufReader::new(File::open(path)?);
    let input: ChartInput = serde_json::from_reader(reader)?;
    tracing::debug!(
        "loaded {} categories from {}",
        input.categories.len(),
        path.display()
    );
    Ok(input)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
