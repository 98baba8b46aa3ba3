use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    Precision,
    Recall,
    #[serde(rename = "F1-score")]
    F1Score,
}

pub const METRIC_COUNT: usize = 3;

/// Fixed drawing order; a metric's position here is its offset index.
pub fn metric_order() -> &'static [Metric; METRIC_COUNT] {
    &[Metric::Precision, Metric::Recall, Metric::F1Score]
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Precision => "Precision",
            Metric::Recall => "Recall",
            Metric::F1Score => "F1-score",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Metric::Precision => 0,
            Metric::Recall => 1,
            Metric::F1Score => 2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        metric_order().iter().copied().find(|m| m.name() == name)
    }
}
