use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Attribute, FilteredView};

// ---------------------------------------------------------------------------
// Aggregator: record counts per Data Mart
// ---------------------------------------------------------------------------

/// One bar of the Data-Mart histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MartCount {
    pub data_mart: String,
    pub count: usize,
}

/// Count the view's rows per distinct DATA MART value.
///
/// One entry per value present, exact counts, ordered by descending count
/// then by value. An empty view yields an empty vec; the caller renders
/// its no-data state instead of a degenerate chart.
pub fn mart_counts(view: &FilteredView) -> Vec<MartCount> {
    let catalog = view.catalog();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in view.rows() {
        *counts
            .entry(catalog.attribute_value(row, Attribute::DataMart))
            .or_default() += 1;
    }

    let mut out: Vec<MartCount> = counts
        .into_iter()
        .map(|(data_mart, count)| MartCount {
            data_mart: data_mart.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.data_mart.cmp(&b.data_mart))
    });
    out
}
