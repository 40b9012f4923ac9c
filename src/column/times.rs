use chrono::{NaiveTime, Timelike};

use crate::column::predicates::TemporalPredicate;
use crate::error::Result;
use crate::selection::Selection;

/// Sentinel for the packed millis-of-day storage.
pub const MISSING_TIME: i32 = i32::MIN;

pub(crate) fn pack_time(value: NaiveTime) -> i32 {
    (value.num_seconds_from_midnight() * 1000 + value.nanosecond() / 1_000_000) as i32
}

pub(crate) fn unpack_time(millis: i32) -> Option<NaiveTime> {
    NaiveTime::from_num_seconds_from_midnight_opt(
        millis as u32 / 1000,
        (millis as u32 % 1000) * 1_000_000,
    )
}

/// A column of local times stored as milliseconds from midnight.
#[derive(Debug, Clone)]
pub struct TimeColumn {
    name: String,
    values: Vec<i32>,
}

impl TimeColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn from_values(name: impl Into<String>, values: impl IntoIterator<Item = NaiveTime>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(pack_time).collect(),
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

    pub fn append(&mut self, value: NaiveTime) {
        self.values.push(pack_time(value));
    }

    pub fn append_missing(&mut self) {
        self.values.push(MISSING_TIME);
    }

    pub fn get(&self, row: usize) -> Option<NaiveTime> {
        self.values
            .get(row)
            .filter(|&&v| v != MISSING_TIME)
            .and_then(|&v| unpack_time(v))
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.values.get(row).is_none_or(|&v| v == MISSING_TIME)
    }

    pub fn eval(&self, predicate: TemporalPredicate, comparison: NaiveTime) -> Selection {
        let packed = pack_time(comparison);
        let mut selection = Selection::new();
        for (row, &value) in self.values.iter().enumerate() {
            if value != MISSING_TIME && predicate.holds(value, packed) {
                selection.push(row as u32);
            }
        }
        selection
    }

    pub fn eval_column(&self, predicate: TemporalPredicate, other: &TimeColumn) -> Result<Selection> {
        super::check_row_counts(&self.name, self.len(), &other.name, other.len())?;
        let mut selection = Selection::new();
        for (row, (&left, &right)) in self.values.iter().zip(&other.values).enumerate() {
            if left != MISSING_TIME && right != MISSING_TIME && predicate.holds(left, right) {
                selection.push(row as u32);
            }
        }
        Ok(selection)
    }
}
