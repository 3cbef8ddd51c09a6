//! Top-K value frequency tables for categorical columns.
//!
//! Every non-numeric kind counts as categorical here: boolean literals, timestamps and mixed
//! columns are profiled by value frequency like free text.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Column, DtypeKind, Table};

use super::classify::classify_table;

/// One entry of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Top values of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCategories {
    pub column: String,
    /// Sorted by count descending, then value ascending. Empty for an all-missing column.
    pub values: Vec<CategoryCount>,
}

/// Top values for the selected categorical columns, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct TopCategoriesTable {
    columns: Vec<TopCategories>,
}

impl TopCategoriesTable {
    /// Frequency table of `column`, or `None` if the column was not selected.
    pub fn get(&self, column: &str) -> Option<&[CategoryCount]> {
        self.columns
            .iter()
            .find(|t| t.column == column)
            .map(|t| t.values.as_slice())
    }

    /// Selected columns in table order.
    pub fn columns(&self) -> &[TopCategories] {
        &self.columns
    }

    /// Number of selected columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if no categorical column was selected.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Count each distinct non-missing value of `column`, in first-seen order.
pub(crate) fn value_counts(column: &Column) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in column.present() {
        let key = value.render();
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

/// Top `top_k` values of the first `max_columns` non-numeric columns of `table`.
///
/// Columns are selected in table order. A selected column with no non-missing values is
/// still present, with an empty list.
pub fn top_categories(table: &Table, max_columns: usize, top_k: usize) -> TopCategoriesTable {
    let kinds = classify_table(table);
    top_categories_with_kinds(table, &kinds, max_columns, top_k)
}

/// Same as [`top_categories`], using kinds already computed by
/// [`super::classify_table`].
pub fn top_categories_with_kinds(
    table: &Table,
    kinds: &[DtypeKind],
    max_columns: usize,
    top_k: usize,
) -> TopCategoriesTable {
    let columns = table
        .columns()
        .iter()
        .zip(kinds)
        .filter(|(_, kind)| kind.is_categorical_like())
        .take(max_columns)
        .map(|(col, _)| {
            let mut counts = value_counts(col);
            counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            counts.truncate(top_k);
            TopCategories {
                column: col.name.clone(),
                values: counts
                    .into_iter()
                    .map(|(value, count)| CategoryCount { value, count })
                    .collect(),
            }
        })
        .collect();

    TopCategoriesTable { columns }
}
