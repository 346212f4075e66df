//! Core data model types.
//!
//! Datasets arrive from the dataset provider (CSV/JSON import or a built-in sample) as an
//! in-memory [`DataSet`]: a [`Schema`] plus row-major [`Value`] cells.
//!
//! Cells are dynamically typed. A field's [`DataType`] is only a hint inferred at import time;
//! every analysis routine re-checks each cell with the [`Value`] type guards before using it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Real number (integers are stored as `f64` too).
    Number,
    /// UTF-8 string.
    Text,
    /// Boolean.
    Bool,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns the index of a field by name, ignoring ASCII case.
    pub fn index_of_ignore_case(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single dynamically typed cell.
///
/// Serializes untagged, so a record round-trips as a plain JSON object
/// (`{"region": "north", "revenue": 120.5, "active": true, "note": null}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    /// Real number.
    Number(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Text(String),
}

impl Value {
    /// Returns the number if this cell holds a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Returns the string if this cell holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// A cell is missing if it is null, text that trims to empty, or a non-finite number.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            Value::Number(v) => !v.is_finite(),
            Value::Bool(_) => false,
        }
    }

    /// The logical type of this cell, or `None` for null.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Number(_) => Some(DataType::Number),
            Value::Bool(_) => Some(DataType::Bool),
            Value::Text(_) => Some(DataType::Text),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Shared null cell for rows shorter than their schema.
pub(crate) const NULL: &Value = &Value::Null;

/// A record keyed by field name, as handed over by JSON-style dataset providers.
pub type Record = BTreeMap<String, Value>;

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Build a dataset from keyed records.
    ///
    /// The schema is the sorted union of all record keys; a key absent from a record becomes
    /// [`Value::Null`]. Field types are inferred with [`infer_data_type`].
    pub fn from_records(records: &[Record]) -> Self {
        let mut names: Vec<&str> = records
            .iter()
            .flat_map(|r| r.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();

        let rows: Vec<Vec<Value>> = records
            .iter()
            .map(|r| {
                names
                    .iter()
                    .map(|n| r.get(*n).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        let fields = names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let data_type = infer_data_type(rows.iter().filter_map(|row| row.get(idx)));
                Field::new(*name, data_type)
            })
            .collect();

        Self::new(Schema::new(fields), rows)
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate a column's cells in row order. Short rows yield [`Value::Null`].
    ///
    /// Returns `None` if `field` is not in the schema.
    pub fn column(&self, field: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.schema.index_of(field)?;
        Some(self.column_at(idx))
    }

    fn column_at(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| row.get(idx).unwrap_or(NULL))
    }

    /// Finite numeric cells of a column, in row order.
    ///
    /// Every cell is checked individually; text, booleans, nulls and non-finite numbers are
    /// skipped. Returns an empty vector for unknown fields.
    pub fn numeric_values(&self, field: &str) -> Vec<f64> {
        match self.schema.index_of(field) {
            Some(idx) => self.column_at(idx).filter_map(Value::as_number).collect(),
            None => Vec::new(),
        }
    }

    /// Text cells of a column, in row order. Returns an empty vector for unknown fields.
    pub fn text_values(&self, field: &str) -> Vec<&str> {
        match self.schema.index_of(field) {
            Some(idx) => self.column_at(idx).filter_map(Value::as_text).collect(),
            None => Vec::new(),
        }
    }

    /// Returns `true` if at least one cell of `field` is a finite number.
    pub fn has_numeric_values(&self, field: &str) -> bool {
        match self.schema.index_of(field) {
            Some(idx) => self.column_at(idx).any(|v| v.as_number().is_some()),
            None => false,
        }
    }
}

/// Infer a field type from its cells.
///
/// Missing cells are ignored. A field is [`DataType::Number`] or [`DataType::Bool`] only if
/// every non-missing cell has that type; anything mixed (or all-missing) is
/// [`DataType::Text`].
pub fn infer_data_type<'a>(cells: impl IntoIterator<Item = &'a Value>) -> DataType {
    let mut seen: Option<DataType> = None;
    for cell in cells {
        if cell.is_missing() {
            continue;
        }
        let Some(t) = cell.data_type() else { continue };
        match seen {
            None => seen = Some(t),
            Some(prev) if prev == t => {}
            Some(_) => return DataType::Text,
        }
    }
    seen.unwrap_or(DataType::Text)
}
