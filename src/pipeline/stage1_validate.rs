use std::collections::BTreeSet;

use crate::error::{ChartError, Result};
use crate::input::{ChartInput, RawMetricTable};
use crate::model::metric::{METRIC_COUNT, Metric, metric_order};
use crate::model::table::{ChartData, MetricTable};

pub fn run_stage1(input: &ChartInput) -> Result<ChartData> {
    let n = input.categories.len();
    if n == 0 {
        return Err(ChartError::Shape(
            "category list is empty; at least one category is required".to_string(),
        ));
    }

    let base_keys: BTreeSet<&str> = input.base.scores.keys().map(String::as_str).collect();
    let stacked_keys: BTreeSet<&str> = input.stacked.scores.keys().map(String::as_str).collect();
    if base_keys != stacked_keys {
        return Err(ChartError::Shape(format!(
            "metric keys differ: '{}' has {:?}, '{}' has {:?}",
            input.base.label, base_keys, input.stacked.label, stacked_keys
        )));
    }

    let base = typed_table(&input.base, n)?;
    let stacked = typed_table(&input.stacked, n)?;

    tracing::debug!(
        "validated {} categories for '{}' and '{}'",
        n,
        base.label,
        stacked.label
    );

    Ok(ChartData {
        categories: input.categories.clone(),
        base,
        stacked,
    })
}

fn typed_table(raw: &RawMetricTable, n: usize) -> Result<MetricTable> {
    for key in raw.scores.keys() {
        if Metric::from_name(key).is_none() {
            return Err(ChartError::Shape(format!(
                "table '{}' has unknown metric '{}' (expected Precision, Recall, F1-score)",
                raw.label, key
            )));
        }
    }

    let mut values: [Vec<f32>; METRIC_COUNT] = Default::default();
    for &metric in metric_order() {
        let Some(scores) = raw.scores.get(metric.name()) else {
            return Err(ChartError::Shape(format!(
                "table '{}' is missing metric '{}'",
                raw.label,
                metric.name()
            )));
        };
        if scores.len() != n {
            return Err(ChartError::Shape(format!(
                "table '{}' metric '{}' has {} values, expected {}",
                raw.label,
                metric.name(),
                scores.len(),
                n
            )));
        }
        if let Some((idx, bad)) = scores
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(ChartError::InvalidInput(format!(
                "table '{}' metric '{}' value {} at category {} is outside [0, 1]",
                raw.label,
                metric.name(),
                bad,
                idx
            )));
        }
        values[metric.index()] = scores.clone();
    }

    Ok(MetricTable {
        label: raw.label.clone(),
        values,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
