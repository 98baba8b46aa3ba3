use crate::model::metric::{METRIC_COUNT, Metric};

/// Per-metric scores of one model, indexed by `Metric::index()` then category.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub label: String,
    pub values: [Vec<f32>; METRIC_COUNT],
}

impl MetricTable {
    pub fn value(&self, metric: Metric, category: usize) -> f32 {
        self.values[metric.index()][category]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub base: MetricTable,
    pub stacked: MetricTable,
}

impl ChartData {
    pub fn n_categories(&self) -> usize {
        self.categories.len()
    }

    pub fn stacked_top(&self, metric: Metric, category: usize) -> f32 {
        self.base.value(metric, category) + self.stacked.value(metric, category)
    }
}
