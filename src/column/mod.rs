pub mod boolean;
pub mod dates;
pub mod datetimes;
pub mod number;
pub mod predicates;
pub mod reference;
pub mod text;
pub mod times;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TabulaError};
use crate::selection::Selection;

pub use boolean::BooleanColumn;
pub use dates::DateColumn;
pub use datetimes::DateTimeColumn;
pub use number::NumberColumn;
pub use predicates::{
    BooleanPredicate, NumberPredicate, Predicate, TemporalPredicate, TextPredicate,
};
pub use reference::ColumnReference;
pub use text::TextColumn;
pub use times::TimeColumn;

/// The closed set of logical column types. `Skip` is a pseudo-type used only
/// in read configurations: a skipped column is left out of the resulting
/// schema entirely and never becomes a `Column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalType {
    Skip,
    Boolean,
    Number,
    Text,
    LocalDate,
    LocalDateTime,
    LocalTime,
}

impl LogicalType {
    /// Display name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalType::Skip => "Skip",
            LogicalType::Boolean => "Boolean",
            LogicalType::Number => "Number",
            LogicalType::Text => "Text",
            LogicalType::LocalDate => "LocalDate",
            LogicalType::LocalDateTime => "LocalDateTime",
            LogicalType::LocalTime => "LocalTime",
        }
    }
}

/// A typed literal, the right-hand side of a single-column value filter.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

impl CellValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Number(_) => "Number",
            CellValue::Text(_) => "Text",
            CellValue::Boolean(_) => "Boolean",
            CellValue::Date(_) => "LocalDate",
            CellValue::DateTime(_) => "LocalDateTime",
            CellValue::Time(_) => "LocalTime",
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Boolean(v)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(v: NaiveDate) -> Self {
        CellValue::Date(v)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(v: NaiveDateTime) -> Self {
        CellValue::DateTime(v)
    }
}

impl From<NaiveTime> for CellValue {
    fn from(v: NaiveTime) -> Self {
        CellValue::Time(v)
    }
}

/// The closed tagged union over the concrete column encodings. Filters are
/// written against this type; each variant supplies its own elementwise
/// predicate evaluation.
#[derive(Debug, Clone)]
pub enum Column {
    Boolean(BooleanColumn),
    Number(NumberColumn),
    Text(TextColumn),
    Date(DateColumn),
    DateTime(DateTimeColumn),
    Time(TimeColumn),
}

impl Column {
    /// An empty column of the given structural type. `Skip` has no column
    /// representation.
    pub fn with_type(logical: LogicalType, name: impl Into<String>) -> Result<Column> {
        Ok(match logical {
            LogicalType::Boolean => Column::Boolean(BooleanColumn::new(name)),
            LogicalType::Number => Column::Number(NumberColumn::new(name)),
            LogicalType::Text => Column::Text(TextColumn::new(name)),
            LogicalType::LocalDate => Column::Date(DateColumn::new(name)),
            LogicalType::LocalDateTime => Column::DateTime(DateTimeColumn::new(name)),
            LogicalType::LocalTime => Column::Time(TimeColumn::new(name)),
            LogicalType::Skip => {
                return Err(TabulaError::InvalidOptions(
                    "Skip is not a constructible column type".into(),
                ))
            }
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Column::Boolean(c) => c.name(),
            Column::Number(c) => c.name(),
            Column::Text(c) => c.name(),
            Column::Date(c) => c.name(),
            Column::DateTime(c) => c.name(),
            Column::Time(c) => c.name(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Boolean(c) => c.len(),
            Column::Number(c) => c.len(),
            Column::Text(c) => c.len(),
            Column::Date(c) => c.len(),
            Column::DateTime(c) => c.len(),
            Column::Time(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn logical_type(&self) -> LogicalType {
        match self {
            Column::Boolean(_) => LogicalType::Boolean,
            Column::Number(_) => LogicalType::Number,
            Column::Text(_) => LogicalType::Text,
            Column::Date(_) => LogicalType::LocalDate,
            Column::DateTime(_) => LogicalType::LocalDateTime,
            Column::Time(_) => LogicalType::LocalTime,
        }
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Boolean(c) => c.is_missing(row),
            Column::Number(c) => c.is_missing(row),
            Column::Text(c) => c.is_missing(row),
            Column::Date(c) => c.is_missing(row),
            Column::DateTime(c) => c.is_missing(row),
            Column::Time(c) => c.is_missing(row),
        }
    }

    pub fn append_missing(&mut self) {
        match self {
            Column::Boolean(c) => c.append_missing(),
            Column::Number(c) => c.append_missing(),
            Column::Text(c) => c.append_missing(),
            Column::Date(c) => c.append_missing(),
            Column::DateTime(c) => c.append_missing(),
            Column::Time(c) => c.append_missing(),
        }
    }

    /// Rendering for previews; missing cells render empty.
    pub fn cell_to_string(&self, row: usize) -> String {
        match self {
            Column::Boolean(c) => c.get(row).map(|v| v.to_string()).unwrap_or_default(),
            Column::Number(c) => c.get(row).map(|v| v.to_string()).unwrap_or_default(),
            Column::Text(c) => c.get(row).map(|v| v.to_string()).unwrap_or_default(),
            Column::Date(c) => c
                .get(row)
                .map(|v| v.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            Column::DateTime(c) => c
                .get(row)
                .map(|v| v.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
                .unwrap_or_default(),
            Column::Time(c) => c
                .get(row)
                .map(|v| v.format("%H:%M:%S%.3f").to_string())
                .unwrap_or_default(),
        }
    }

    /// Elementwise evaluation of a predicate against a typed literal.
    /// Literal and predicate must belong to this column's type family.
    pub fn eval_value(&self, predicate: Predicate, value: &CellValue) -> Result<Selection> {
        match (self, predicate, value) {
            (Column::Number(c), Predicate::Number(p), CellValue::Number(v)) => Ok(c.eval(p, *v)),
            (Column::Text(c), Predicate::Text(p), CellValue::Text(v)) => Ok(c.eval(p, v)),
            (Column::Boolean(c), Predicate::Boolean(p), CellValue::Boolean(v)) => {
                Ok(c.eval(p, *v))
            }
            (Column::Date(c), Predicate::Temporal(p), CellValue::Date(v)) => Ok(c.eval(p, *v)),
            (Column::DateTime(c), Predicate::Temporal(p), CellValue::DateTime(v)) => {
                Ok(c.eval(p, *v))
            }
            (Column::Time(c), Predicate::Temporal(p), CellValue::Time(v)) => Ok(c.eval(p, *v)),
            _ => Err(self.type_mismatch(value.type_name())),
        }
    }

    /// Positional comparison against another column of the same type family
    /// and equal row count. Cross-resolution temporal comparisons (date vs
    /// date-time) are rejected; callers must reinterpret explicitly.
    pub fn eval_column(&self, predicate: Predicate, other: &Column) -> Result<Selection> {
        match (self, predicate, other) {
            (Column::Number(a), Predicate::Number(p), Column::Number(b)) => a.eval_column(p, b),
            (Column::Text(a), Predicate::Text(p), Column::Text(b)) => a.eval_column(p, b),
            (Column::Boolean(a), Predicate::Boolean(p), Column::Boolean(b)) => {
                a.eval_column(p, b)
            }
            (Column::Date(a), Predicate::Temporal(p), Column::Date(b)) => a.eval_column(p, b),
            (Column::DateTime(a), Predicate::Temporal(p), Column::DateTime(b)) => {
                a.eval_column(p, b)
            }
            (Column::Time(a), Predicate::Temporal(p), Column::Time(b)) => a.eval_column(p, b),
            _ => Err(self.type_mismatch(other.logical_type().name())),
        }
    }

    fn type_mismatch(&self, actual: &'static str) -> TabulaError {
        TabulaError::TypeMismatch {
            column: self.name().to_string(),
            expected: self.logical_type().name(),
            actual,
        }
    }
}

pub(crate) fn check_row_counts(
    left_name: &str,
    left: usize,
    right_name: &str,
    right: usize,
) -> Result<()> {
    if left != right {
        return Err(TabulaError::RowCountMismatch {
            left_name: left_name.to_string(),
            left,
            right_name: right_name.to_string(),
            right,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_value_rejects_mismatched_family() {
        let col = Column::Number(NumberColumn::from_values("n", vec![1.0]));
        let err = col
            .eval_value(
                Predicate::Text(TextPredicate::Equal),
                &CellValue::Text("1".into()),
            )
            .unwrap_err();
        assert!(matches!(err, TabulaError::TypeMismatch { .. }));
    }

    #[test]
    fn eval_column_rejects_cross_resolution_temporal_comparison() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let dates = Column::Date(DateColumn::from_values("d", [date]));
        let date_times =
            Column::DateTime(DateTimeColumn::from_values("dt", [date.and_hms_opt(0, 0, 0).unwrap()]));
        let err = dates
            .eval_column(Predicate::Temporal(TemporalPredicate::Equal), &date_times)
            .unwrap_err();
        assert!(matches!(err, TabulaError::TypeMismatch { .. }));
    }

    #[test]
    fn eval_column_checks_row_counts_before_comparing() {
        let a = Column::Number(NumberColumn::from_values("a", vec![1.0, 2.0, 3.0]));
        let b = Column::Number(NumberColumn::from_values("b", vec![1.0, 2.0, 3.0, 4.0]));
        let err = a
            .eval_column(Predicate::Number(NumberPredicate::Equal), &b)
            .unwrap_err();
        assert!(matches!(err, TabulaError::RowCountMismatch { .. }));
    }

    #[test]
    fn with_type_refuses_skip() {
        assert!(Column::with_type(LogicalType::Skip, "x").is_err());
    }
}
