use chrono::{Duration, NaiveDate};

use crate::column::predicates::TemporalPredicate;
use crate::error::Result;
use crate::selection::Selection;

/// Sentinel for the packed days-since-epoch storage.
pub const MISSING_DATE: i32 = i32::MIN;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

pub(crate) fn pack_date(date: NaiveDate) -> i32 {
    date.signed_duration_since(epoch()).num_days() as i32
}

pub(crate) fn unpack_date(days: i32) -> NaiveDate {
    epoch() + Duration::days(days as i64)
}

/// A column of local dates stored as days since 1970-01-01. Equality is at
/// whole-day resolution; comparing against a date-time column is rejected at
/// the dispatch layer rather than silently coarsened.
#[derive(Debug, Clone)]
pub struct DateColumn {
    name: String,
    values: Vec<i32>,
}

impl DateColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn from_values(name: impl Into<String>, values: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(pack_date).collect(),
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

    pub fn append(&mut self, date: NaiveDate) {
        self.values.push(pack_date(date));
    }

    pub fn append_missing(&mut self) {
        self.values.push(MISSING_DATE);
    }

    pub fn get(&self, row: usize) -> Option<NaiveDate> {
        self.values
            .get(row)
            .filter(|&&v| v != MISSING_DATE)
            .map(|&v| unpack_date(v))
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.values.get(row).is_none_or(|&v| v == MISSING_DATE)
    }

    pub fn eval(&self, predicate: TemporalPredicate, comparison: NaiveDate) -> Selection {
        let packed = pack_date(comparison);
        let mut selection = Selection::new();
        for (row, &value) in self.values.iter().enumerate() {
            if value != MISSING_DATE && predicate.holds(value, packed) {
                selection.push(row as u32);
            }
        }
        selection
    }

    pub fn eval_column(&self, predicate: TemporalPredicate, other: &DateColumn) -> Result<Selection> {
        super::check_row_counts(&self.name, self.len(), &other.name, other.len())?;
        let mut selection = Selection::new();
        for (row, (&left, &right)) in self.values.iter().zip(&other.values).enumerate() {
            if left != MISSING_DATE
                && right != MISSING_DATE
                && predicate.holds(left, right)
            {
                selection.push(row as u32);
            }
        }
        Ok(selection)
    }
}
