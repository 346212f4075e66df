//! Built-in sample datasets offered by the dashboard's "load sample data" action.

use serde::{Deserialize, Serialize};

use crate::types::{DataSet, Record, Value};

/// A bundled dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleDataset {
    /// Monthly revenue and units per region and product.
    Sales,
    /// Daily visitors, page views and bounce rate per traffic source.
    WebTraffic,
}

impl SampleDataset {
    pub const ALL: [SampleDataset; 2] = [SampleDataset::Sales, SampleDataset::WebTraffic];

    pub fn name(self) -> &'static str {
        match self {
            SampleDataset::Sales => "sales",
            SampleDataset::WebTraffic => "web_traffic",
        }
    }

    /// Look a sample up by [`SampleDataset::name`] (ASCII case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn load(self) -> DataSet {
        match self {
            SampleDataset::Sales => sales(),
            SampleDataset::WebTraffic => web_traffic(),
        }
    }
}

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

fn sales() -> DataSet {
    const REGIONS: [&str; 3] = ["North", "South", "West"];
    const PRODUCTS: [&str; 2] = ["Widget", "Gadget"];

    let mut records = Vec::new();
    for (m, month) in MONTHS.iter().enumerate() {
        for (r, region) in REGIONS.iter().enumerate() {
            for (p, product) in PRODUCTS.iter().enumerate() {
                let units = 20 + 4 * m + 7 * r + 3 * p;
                let price = if p == 0 { 25.0 } else { 40.0 };
                records.push(record([
                    ("month", Value::from(*month)),
                    ("region", Value::from(*region)),
                    ("product", Value::from(*product)),
                    ("units", Value::Number(units as f64)),
                    ("revenue", Value::Number(units as f64 * price)),
                ]));
            }
        }
    }
    DataSet::from_records(&records)
}

fn web_traffic() -> DataSet {
    const SOURCES: [&str; 3] = ["search", "social", "direct"];

    let records: Vec<Record> = (1..=14)
        .map(|day| {
            // Day 9 carries a traffic spike.
            let spike = if day == 9 { 900.0 } else { 0.0 };
            let visitors = 400.0 + 12.0 * day as f64 + spike;
            record([
                ("date", Value::Text(format!("2024-03-{day:02}"))),
                ("source", Value::from(SOURCES[day % SOURCES.len()])),
                ("visitors", Value::Number(visitors)),
                ("page_views", Value::Number((visitors * 2.5).round())),
                ("bounce_rate", Value::Number(0.35 + (day % 4) as f64 * 0.02)),
            ])
        })
        .collect();
    DataSet::from_records(&records)
}

fn record<const N: usize>(cells: [(&str, Value); N]) -> Record {
    cells.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}
