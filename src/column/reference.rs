use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::column::predicates::{
    BooleanPredicate, NumberPredicate, Predicate, TemporalPredicate, TextPredicate,
};
use crate::column::{CellValue, Column};
use crate::error::{Result, TabulaError};
use crate::filter::{TwoColumnFilter, ValueFilter};
use crate::table::Table;

/// A deferred, by-name handle to a column. Filters close over references so
/// they can be built before any table exists and reused across tables that
/// share a schema; resolution happens at evaluation time and failure is an
/// explicit error, never a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReference {
    name: String,
}

impl ColumnReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resolve<'t>(&self, table: &'t Table) -> Result<&'t Column> {
        table.column(&self.name)
    }

    // Fluent filter constructors. The predicate identity is picked from the
    // literal's type family; applying the resulting filter to a column of a
    // different family fails with a TypeMismatch at evaluation time.

    pub fn is_equal_to(&self, value: impl Into<CellValue>) -> ValueFilter {
        let value = value.into();
        ValueFilter::new(self.clone(), equality_predicate(&value), value)
    }

    pub fn is_not_equal_to(&self, value: impl Into<CellValue>) -> Result<ValueFilter> {
        let value = value.into();
        let predicate = match &value {
            CellValue::Number(_) => Predicate::Number(NumberPredicate::NotEqual),
            CellValue::Text(_) => Predicate::Text(TextPredicate::NotEqual),
            CellValue::Boolean(_) => Predicate::Boolean(BooleanPredicate::NotEqual),
            CellValue::Date(_) | CellValue::DateTime(_) | CellValue::Time(_) => {
                return Err(TabulaError::InvalidOptions(
                    "temporal predicates have no not-equal form; combine Before and After".into(),
                ))
            }
        };
        Ok(ValueFilter::new(self.clone(), predicate, value))
    }

    pub fn equals_ignoring_case(&self, value: impl Into<String>) -> ValueFilter {
        ValueFilter::new(
            self.clone(),
            Predicate::Text(TextPredicate::EqualIgnoringCase),
            CellValue::Text(value.into()),
        )
    }

    pub fn is_less_than(&self, value: f64) -> ValueFilter {
        ValueFilter::new(
            self.clone(),
            Predicate::Number(NumberPredicate::LessThan),
            CellValue::Number(value),
        )
    }

    pub fn is_greater_than(&self, value: f64) -> ValueFilter {
        ValueFilter::new(
            self.clone(),
            Predicate::Number(NumberPredicate::GreaterThan),
            CellValue::Number(value),
        )
    }

    pub fn is_before_date(&self, value: NaiveDate) -> ValueFilter {
        self.temporal(TemporalPredicate::Before, CellValue::Date(value))
    }

    pub fn is_after_date(&self, value: NaiveDate) -> ValueFilter {
        self.temporal(TemporalPredicate::After, CellValue::Date(value))
    }

    pub fn is_before_date_time(&self, value: NaiveDateTime) -> ValueFilter {
        self.temporal(TemporalPredicate::Before, CellValue::DateTime(value))
    }

    pub fn is_after_date_time(&self, value: NaiveDateTime) -> ValueFilter {
        self.temporal(TemporalPredicate::After, CellValue::DateTime(value))
    }

    pub fn is_before_time(&self, value: NaiveTime) -> ValueFilter {
        self.temporal(TemporalPredicate::Before, CellValue::Time(value))
    }

    pub fn is_after_time(&self, value: NaiveTime) -> ValueFilter {
        self.temporal(TemporalPredicate::After, CellValue::Time(value))
    }

    fn temporal(&self, predicate: TemporalPredicate, value: CellValue) -> ValueFilter {
        ValueFilter::new(self.clone(), Predicate::Temporal(predicate), value)
    }

    /// Positional comparison against a sibling column resolved from the
    /// same table at evaluation time.
    pub fn compare_to(&self, other: ColumnReference, predicate: Predicate) -> TwoColumnFilter {
        TwoColumnFilter::with_reference(self.clone(), other, predicate)
    }

    /// Positional comparison against a column captured now, independent of
    /// whichever table is later supplied.
    pub fn compare_to_column(&self, other: Arc<Column>, predicate: Predicate) -> TwoColumnFilter {
        TwoColumnFilter::with_column(self.clone(), other, predicate)
    }
}

fn equality_predicate(value: &CellValue) -> Predicate {
    match value {
        CellValue::Number(_) => Predicate::Number(NumberPredicate::Equal),
        CellValue::Text(_) => Predicate::Text(TextPredicate::Equal),
        CellValue::Boolean(_) => Predicate::Boolean(BooleanPredicate::Equal),
        CellValue::Date(_) | CellValue::DateTime(_) | CellValue::Time(_) => {
            Predicate::Temporal(TemporalPredicate::Equal)
        }
    }
}
