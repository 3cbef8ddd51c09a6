//! Core data model types.
//!
//! A [`Table`] is an ordered list of named [`Column`]s that all hold the same number of
//! [`Value`]s. Missing cells are [`Value::Null`]; there is no sentinel number for "absent".

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EdaError, EdaResult};

/// Semantic type assigned to a column by [`crate::profiling::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtypeKind {
    /// Every non-missing value is a number.
    Numeric,
    /// Free-form or low-cardinality text.
    Categorical,
    /// Every non-missing value is a boolean literal.
    Boolean,
    /// Every non-missing value is an ISO-8601 date or timestamp.
    Datetime,
    /// Mixed typed values that fit none of the above.
    Other,
}

impl DtypeKind {
    /// Lowercase name used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Other => "other",
        }
    }

    /// Every non-numeric kind. These columns are profiled by value frequency: top categories,
    /// cardinality and most frequent value.
    pub fn is_categorical_like(&self) -> bool {
        !matches!(self, Self::Numeric)
    }
}

impl fmt::Display for DtypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float. `NaN` is treated as missing.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Convenience constructor for text cells.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Utf8(s.into())
    }

    /// Returns `true` for [`Value::Null`] and for a `NaN` float.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value.
    ///
    /// Integers and finite floats convert directly; text converts when it parses as a finite
    /// number. Booleans are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) if v.is_finite() => Some(*v),
            Self::Utf8(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Canonical text used as a frequency-table key.
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Int64(v) => v.to_string(),
            Self::Float64(v) => v.to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Utf8(s) => s.clone(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

/// A named, ordered sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name, unique within a [`Table`].
    pub name: String,
    /// Cell values in row order.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column from anything convertible to [`Value`].
    pub fn new<V: Into<Value>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of cells (including missing ones).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Iterate non-missing cells in row order.
    pub fn present(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }
}

/// In-memory tabular dataset.
///
/// Column lengths and name uniqueness are checked on construction, so every `Table` is
/// rectangular.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns.
    ///
    /// Fails with [`EdaError::InputShape`] if column lengths differ and with
    /// [`EdaError::DuplicateColumn`] if two columns share a name.
    pub fn new(columns: Vec<Column>) -> EdaResult<Self> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if col.len() != n_rows {
                return Err(EdaError::shape(format!(
                    "column '{}' has {} values, expected {} (length of column '{}')",
                    col.name,
                    col.len(),
                    n_rows,
                    columns[0].name
                )));
            }
            if !seen.insert(col.name.as_str()) {
                return Err(EdaError::DuplicateColumn {
                    name: col.name.clone(),
                });
            }
        }

        Ok(Self { columns, n_rows })
    }

    /// Build a table from a header and row-major data.
    ///
    /// Every row must have exactly one value per header name.
    pub fn from_rows<S: Into<String>>(names: Vec<S>, rows: Vec<Vec<Value>>) -> EdaResult<Self> {
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name: name.into(),
                values: Vec::with_capacity(rows.len()),
            })
            .collect();

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(EdaError::shape(format!(
                    "row {} has {} values, expected {}",
                    row_idx,
                    row.len(),
                    columns.len()
                )));
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.values.push(value);
            }
        }

        Self::new(columns)
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    /// Columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterate column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Consume the table, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}
