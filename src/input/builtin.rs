use std::collections::BTreeMap;

use crate::input::{ChartInput, RawMetricTable};
use crate::model::metric::Metric;

pub const DEFAULT_BAR_WIDTH: f32 = 0.25;

const ENTITY_CATEGORIES: &[&str] = &["DISEASE", "GENE", "PROTEIN", "SYMPTOM"];

#[derive(Debug, Clone, Copy)]
struct TableDef {
    label: &'static str,
    precision: &'static [f32],
    recall: &'static [f32],
    f1: &'static [f32],
}

const BILSTM: TableDef = TableDef {
    label: "BiLSTM",
    precision: &[0.00, 0.00, 0.00, 0.00],
    recall: &[0.00, 0.00, 0.00, 0.00],
    f1: &[0.00, 0.00, 0.00, 0.00],
};

const BILSTM_CRF: TableDef = TableDef {
    label: "BiLSTM+CRF",
    precision: &[1.00, 1.00, 1.00, 0.99],
    recall: &[1.00, 1.00, 0.99, 1.00],
    f1: &[1.00, 1.00, 1.00, 1.00],
};

pub fn builtin_chart_input() -> ChartInput {
    ChartInput {
        categories: ENTITY_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        base: raw_table(&BILSTM),
        stacked: raw_table(&BILSTM_CRF),
        bar_width: Some(DEFAULT_BAR_WIDTH),
    }
}

fn raw_table(def: &TableDef) -> RawMetricTable {
    let mut scores = BTreeMap::new();
    scores.insert(Metric::Precision.name().to_string(), def.precision.to_vec());
    scores.insert(Metric::Recall.name().to_string(), def.recall.to_vec());
    scores.insert(Metric::F1Score.name().to_string(), def.f1.to_vec());
    RawMetricTable {
        label: def.label.to_string(),
        scores,
    }
}
