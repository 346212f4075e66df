//! Group-by aggregation for [`crate::types::DataSet`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::query::Aggregation;
use crate::types::{DataSet, Value, NULL};

/// One aggregated group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Display string of the group-by cell (empty for missing cells).
    pub key: String,
    pub value: f64,
    /// Rows that fell into this group.
    pub rows: usize,
}

/// Reduce a single column with `op`.
///
/// - Returns `None` if `column` does not exist in the schema.
/// - `Count` counts rows (including nulls).
/// - `Sum`/`Avg`/`Min`/`Max` operate on finite numeric cells and ignore everything else. If no
///   numeric cell exists they return `Some(Value::Null)`.
pub fn reduce(dataset: &DataSet, column: &str, op: Aggregation) -> Option<Value> {
    let cells = dataset.column(column)?;
    let mut acc = Accumulator::default();
    for cell in cells {
        acc.push(cell);
    }
    Some(match acc.finish(op) {
        Some(v) => Value::Number(v),
        None => Value::Null,
    })
}

/// Group rows by the display string of `group_by` and aggregate `value_field` per group.
///
/// Groups appear in first-seen order. For [`Aggregation::Count`] `value_field` may be `None`
/// (rows are counted); every other operation requires it. Groups with no numeric cells are
/// reported with value `0`.
///
/// Returns `None` if either field is missing from the schema, or if a non-count aggregation has
/// no `value_field`.
pub fn aggregate(
    dataset: &DataSet,
    group_by: &str,
    value_field: Option<&str>,
    op: Aggregation,
) -> Option<Vec<Group>> {
    let key_idx = dataset.schema.index_of(group_by)?;
    let value_idx = match value_field {
        Some(f) => Some(dataset.schema.index_of(f)?),
        None if op == Aggregation::Count => None,
        None => return None,
    };

    let mut keys: Vec<String> = Vec::new();
    let mut accs: Vec<Accumulator> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in &dataset.rows {
        let key = row.get(key_idx).map(Value::to_string).unwrap_or_default();
        let pos = match positions.get(&key) {
            Some(&p) => p,
            None => {
                positions.insert(key.clone(), keys.len());
                keys.push(key);
                accs.push(Accumulator::default());
                keys.len() - 1
            }
        };
        let cell = value_idx.and_then(|i| row.get(i)).unwrap_or(NULL);
        accs[pos].push(cell);
    }

    Some(
        keys.into_iter()
            .zip(accs)
            .map(|(key, acc)| Group {
                key,
                value: acc.finish(op).unwrap_or(0.0),
                rows: acc.rows,
            })
            .collect(),
    )
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    rows: usize,
    numeric: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl Accumulator {
    fn push(&mut self, cell: &Value) {
        self.rows += 1;
        if let Some(v) = cell.as_number() {
            self.numeric += 1;
            self.sum += v;
            self.min = Some(self.min.map_or(v, |m| m.min(v)));
            self.max = Some(self.max.map_or(v, |m| m.max(v)));
        }
    }

    fn finish(&self, op: Aggregation) -> Option<f64> {
        match op {
            Aggregation::Count => Some(self.rows as f64),
            _ if self.numeric == 0 => None,
            Aggregation::Sum => Some(self.sum),
            Aggregation::Avg => Some(self.sum / self.numeric as f64),
            Aggregation::Min => self.min,
            Aggregation::Max => self.max,
        }
    }
}
