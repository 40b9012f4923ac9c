use chrono::{DateTime, NaiveDateTime};

use crate::column::predicates::TemporalPredicate;
use crate::error::Result;
use crate::selection::Selection;

/// Sentinel for the packed millis-since-epoch storage.
pub const MISSING_DATE_TIME: i64 = i64::MIN;

pub(crate) fn pack_date_time(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

pub(crate) fn unpack_date_time(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

/// A column of local date-times stored as milliseconds since the epoch.
/// Equality is at millisecond resolution.
#[derive(Debug, Clone)]
pub struct DateTimeColumn {
    name: String,
    values: Vec<i64>,
}

impl DateTimeColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn from_values(
        name: impl Into<String>,
        values: impl IntoIterator<Item = NaiveDateTime>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(pack_date_time).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn append(&mut self, value: NaiveDateTime) {
        self.values.push(pack_date_time(value));
    }

    pub fn append_missing(&mut self) {
        self.values.push(MISSING_DATE_TIME);
    }

    pub fn get(&self, row: usize) -> Option<NaiveDateTime> {
        self.values
            .get(row)
            .filter(|&&v| v != MISSING_DATE_TIME)
            .and_then(|&v| unpack_date_time(v))
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.values.get(row).is_none_or(|&v| v == MISSING_DATE_TIME)
    }

    pub fn eval(&self, predicate: TemporalPredicate, comparison: NaiveDateTime) -> Selection {
        let packed = pack_date_time(comparison);
        let mut selection = Selection::new();
        for (row, &value) in self.values.iter().enumerate() {
            if value != MISSING_DATE_TIME && predicate.holds(value, packed) {
                selection.push(row as u32);
            }
        }
        selection
    }

    pub fn eval_column(
        &self,
        predicate: TemporalPredicate,
        other: &DateTimeColumn,
    ) -> Result<Selection> {
        super::check_row_counts(&self.name, self.len(), &other.name, other.len())?;
        let mut selection = Selection::new();
        for (row, (&left, &right)) in self.values.iter().zip(&other.values).enumerate() {
            if left != MISSING_DATE_TIME
                && right != MISSING_DATE_TIME
                && predicate.holds(left, right)
            {
                selection.push(row as u32);
            }
        }
        Ok(selection)
    }
}
