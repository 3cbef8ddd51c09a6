//! Pairwise Pearson correlation between numeric columns.

use serde::Serialize;

use crate::types::{DtypeKind, Table};

use super::classify::classify_table;

/// Square correlation matrix over the numeric columns of a table.
///
/// Cells are `None` when the coefficient is undefined: a zero-variance column, or fewer than
/// two rows where both columns are present.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Column (and row) names in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row-major coefficients; `values()[i][j]` pairs `columns()[i]` with `columns()[j]`.
    pub fn values(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }

    /// Returns `true` when fewer than two numeric columns were available.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between `a` and `b`.
    ///
    /// - Returns `None` if either column is not in the matrix.
    /// - Returns `Some(None)` if the coefficient is undefined.
    pub fn get(&self, a: &str, b: &str) -> Option<Option<f64>> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Correlation matrix of the numeric columns of `table`.
///
/// Returns an empty matrix when the table has fewer than two numeric columns.
pub fn correlation_matrix(table: &Table) -> CorrelationMatrix {
    let kinds = classify_table(table);
    correlation_matrix_with_kinds(table, &kinds)
}

/// Same as [`correlation_matrix`], using kinds already computed by
/// [`super::classify_table`].
pub fn correlation_matrix_with_kinds(table: &Table, kinds: &[DtypeKind]) -> CorrelationMatrix {
    let numeric: Vec<(&str, Vec<Option<f64>>)> = table
        .columns()
        .iter()
        .zip(kinds)
        .filter(|(_, kind)| **kind == DtypeKind::Numeric)
        .map(|(col, _)| {
            let values = col
                .values
                .iter()
                .map(|v| if v.is_missing() { None } else { v.as_f64() })
                .collect();
            (col.name.as_str(), values)
        })
        .collect();

    if numeric.len() < 2 {
        return CorrelationMatrix::default();
    }

    let varying: Vec<bool> = numeric.iter().map(|(_, v)| has_variance(v)).collect();

    let n = numeric.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        if !varying[i] {
            continue;
        }
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            if !varying[j] {
                continue;
            }
            let r = pearson_pairwise(&numeric[i].1, &numeric[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}

/// At least two present values that are not all equal.
fn has_variance(values: &[Option<f64>]) -> bool {
    let mut present = values.iter().flatten();
    match present.next() {
        Some(first) => present.any(|v| v != first),
        None => false,
    }
}

/// Pearson coefficient over rows where both `x` and `y` are present.
fn pearson_pairwise(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    // The pairwise subset of a varying column can still be constant.
    let constant_x = pairs.iter().all(|p| p.0 == pairs[0].0);
    let constant_y = pairs.iter().all(|p| p.1 == pairs[0].1);
    if constant_x || constant_y || sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::correlation_matrix;
    use crate::types::{Column, Table};

    fn approx(v: Option<Option<f64>>, expected: f64) -> bool {
        matches!(v, Some(Some(r)) if (r - expected).abs() < 1e-9)
    }

    #[test]
    fn perfect_positive_and_negative_correlation() {
        let table = Table::new(vec![
            Column::new("x", [1.0, 2.0, 3.0, 4.0, 5.0]),
            Column::new("y", [2.0, 4.0, 6.0, 8.0, 10.0]),
            Column::new("z", [5.0, 4.0, 3.0, 2.0, 1.0]),
        ])
        .unwrap();
        let m = correlation_matrix(&table);
        assert!(approx(m.get("x", "x"), 1.0));
        assert!(approx(m.get("x", "y"), 1.0));
        assert!(approx(m.get("x", "z"), -1.0));
        assert_eq!(m.get("y", "z"), m.get("z", "y"));
    }

    #[test]
    fn fewer_than_two_numeric_columns_is_empty() {
        let table = Table::new(vec![
            Column::new("x", [1_i64, 2, 3]),
            Column::new("city", ["a", "b", "c"]),
        ])
        .unwrap();
        assert!(correlation_matrix(&table).is_empty());
        assert!(correlation_matrix(&Table::empty()).is_empty());
    }

    #[test]
    fn constant_column_is_undefined_everywhere() {
        let table = Table::new(vec![
            Column::new("x", [1.0, 2.0, 3.0]),
            Column::new("c", [7.0, 7.0, 7.0]),
        ])
        .unwrap();
        let m = correlation_matrix(&table);
        assert_eq!(m.get("c", "c"), Some(None));
        assert_eq!(m.get("c", "x"), Some(None));
        assert_eq!(m.get("x", "c"), Some(None));
        assert_eq!(m.get("x", "x"), Some(Some(1.0)));
        assert_eq!(m.get("x", "missing"), None);
    }

    #[test]
    fn uses_pairwise_complete_observations() {
        let table = Table::new(vec![
            Column::new("age", [Some(10_i64), Some(20), Some(30), None]),
            Column::new("height", [140_i64, 150, 160, 170]),
        ])
        .unwrap();
        let m = correlation_matrix(&table);
        assert!(approx(m.get("age", "height"), 1.0));
    }

    #[test]
    fn pairwise_subset_without_variance_is_undefined() {
        let table = Table::new(vec![
            Column::new("a", [Some(1.0), Some(2.0), None, None]),
            Column::new("b", [Some(5.0), Some(5.0), Some(1.0), Some(2.0)]),
        ])
        .unwrap();
        let m = correlation_matrix(&table);
        assert_eq!(m.get("a", "b"), Some(None));
        assert_eq!(m.get("b", "b"), Some(Some(1.0)));
    }
}
