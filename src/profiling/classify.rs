//! Column type classification.
//!
//! Every downstream component (statistics, correlation, top categories, quality flags) works
//! from the [`DtypeKind`] computed here, so a column is never numeric in one place and text
//! in another.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::types::{Column, DtypeKind, Table, Value};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a boolean literal (`true/false/t/f/yes/no/y/n`, case-insensitive).
pub fn parse_bool_literal(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" => Some(true),
        "false" | "f" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parse an ISO-8601 date, date-time or RFC 3339 timestamp.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Classify a column from its non-missing values.
///
/// Rules, first match wins:
///
/// - [`DtypeKind::Numeric`]: every value is a finite number (or text parsing as one).
///   A column with no non-missing values is numeric.
/// - [`DtypeKind::Boolean`]: every value is a bool or a boolean literal.
/// - [`DtypeKind::Datetime`]: every value is text parsing as a date/timestamp.
/// - [`DtypeKind::Other`]: no text, but the typed values mix kinds.
/// - [`DtypeKind::Categorical`]: anything else.
pub fn classify(column: &Column) -> DtypeKind {
    let mut numeric = true;
    let mut boolean = true;
    let mut datetime = true;
    let mut any_text = false;

    for value in column.present() {
        match value {
            Value::Int64(_) | Value::Float64(_) => {
                // infinities are not numbers for any statistic, same as the text "inf"
                numeric &= value.as_f64().is_some();
                boolean = false;
                datetime = false;
            }
            Value::Bool(_) => {
                numeric = false;
                datetime = false;
            }
            Value::Utf8(s) => {
                any_text = true;
                numeric &= value.as_f64().is_some();
                boolean &= parse_bool_literal(s).is_some();
                datetime &= parse_datetime(s).is_some();
            }
            Value::Null => {}
        }
        if !numeric && !boolean && !datetime && any_text {
            return DtypeKind::Categorical;
        }
    }

    if numeric {
        DtypeKind::Numeric
    } else if boolean {
        DtypeKind::Boolean
    } else if datetime {
        DtypeKind::Datetime
    } else if !any_text {
        DtypeKind::Other
    } else {
        DtypeKind::Categorical
    }
}

/// Classify every column of `table`, in table order.
pub fn classify_table(table: &Table) -> Vec<DtypeKind> {
    table.columns().iter().map(classify).collect()
}

#[cfg(test)]
mod tests {
    use super::{classify, parse_bool_literal, parse_datetime};
    use crate::types::{Column, DtypeKind, Value};

    #[test]
    fn numeric_ignores_missing_values() {
        let col = Column::new("age", [Some(10_i64), Some(20), None]);
        assert_eq!(classify(&col), DtypeKind::Numeric);

        let col = Column::new("x", ["1.5", "2", "-3e2"]);
        assert_eq!(classify(&col), DtypeKind::Numeric);
    }

    #[test]
    fn non_finite_floats_are_not_numeric() {
        let col = Column::new("x", [f64::INFINITY, 5.0, 5.0]);
        assert_eq!(classify(&col), DtypeKind::Other);

        let col = Column::new("x", [Value::Float64(f64::NEG_INFINITY), Value::text("a")]);
        assert_eq!(classify(&col), DtypeKind::Categorical);

        let col = Column::new("x", ["inf", "5"]);
        assert_eq!(classify(&col), DtypeKind::Categorical);
    }

    #[test]
    fn all_missing_column_is_numeric() {
        let col = Column::new("empty", [Value::Null, Value::Null]);
        assert_eq!(classify(&col), DtypeKind::Numeric);
    }

    #[test]
    fn zero_one_text_is_numeric_not_boolean() {
        let col = Column::new("flag", ["0", "1", "1"]);
        assert_eq!(classify(&col), DtypeKind::Numeric);
    }

    #[test]
    fn boolean_literals_and_typed_bools() {
        let col = Column::new("b", ["yes", "No", "TRUE"]);
        assert_eq!(classify(&col), DtypeKind::Boolean);

        let col = Column::new("b", [Value::Bool(true), Value::text("f"), Value::Null]);
        assert_eq!(classify(&col), DtypeKind::Boolean);
    }

    #[test]
    fn datetime_strings() {
        let col = Column::new("ts", ["2024-01-02", "2024-01-03T10:00:00", "2024-01-04T10:00:00Z"]);
        assert_eq!(classify(&col), DtypeKind::Datetime);
        assert!(parse_datetime("2024-13-01").is_none());
    }

    #[test]
    fn mixed_typed_values_are_other() {
        let col = Column::new("m", [Value::Bool(true), Value::Int64(3)]);
        assert_eq!(classify(&col), DtypeKind::Other);
    }

    #[test]
    fn text_is_categorical() {
        let col = Column::new("city", [Some("A"), Some("B"), None]);
        assert_eq!(classify(&col), DtypeKind::Categorical);

        let col = Column::new("mixed", [Value::Int64(1), Value::text("x")]);
        assert_eq!(classify(&col), DtypeKind::Categorical);
    }

    #[test]
    fn bool_literal_parsing() {
        assert_eq!(parse_bool_literal(" Y "), Some(true));
        assert_eq!(parse_bool_literal("false"), Some(false));
        assert_eq!(parse_bool_literal("1"), None);
    }
}
