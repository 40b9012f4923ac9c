use crate::column::datetimes::DateTimeColumn;
use crate::column::predicates::NumberPredicate;
use crate::error::Result;
use crate::selection::Selection;

/// The missing-value sentinel for number columns. NaN never compares equal
/// to anything, which lines up with the rule that a missing cell satisfies
/// no predicate.
pub const MISSING_NUMBER: f64 = f64::NAN;

#[derive(Debug, Clone)]
pub struct NumberColumn {
    name: String,
    values: Vec<f64>,
}

impl NumberColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn from_values(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
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

    pub fn append(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn append_missing(&mut self) {
        self.values.push(MISSING_NUMBER);
    }

    pub fn get(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().filter(|v| !v.is_nan())
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.values.get(row).is_none_or(|v| v.is_nan())
    }

    /// Rows where `value[i] <predicate> comparison` holds. Missing cells and
    /// a missing comparison value never match.
    pub fn eval(&self, predicate: NumberPredicate, comparison: f64) -> Selection {
        let mut selection = Selection::new();
        if comparison.is_nan() {
            return selection;
        }
        for (row, &value) in self.values.iter().enumerate() {
            if !value.is_nan() && predicate.holds(value, comparison) {
                selection.push(row as u32);
            }
        }
        selection
    }

    /// Reinterprets the stored values as milliseconds since the epoch,
    /// producing a date-time column of the same name and length. Missing
    /// and non-finite values stay missing; the source is untouched.
    pub fn as_date_times(&self) -> DateTimeColumn {
        let mut derived = DateTimeColumn::new(&self.name);
        for &value in &self.values {
            match super::datetimes::unpack_date_time(value as i64) {
                Some(dt) if value.is_finite() => derived.append(dt),
                _ => derived.append_missing(),
            }
        }
        derived
    }

    /// Positional comparison against another number column of equal length.
    pub fn eval_column(&self, predicate: NumberPredicate, other: &NumberColumn) -> Result<Selection> {
        super::check_row_counts(&self.name, self.len(), &other.name, other.len())?;
        let mut selection = Selection::new();
        for (row, (&left, &right)) in self.values.iter().zip(&other.values).enumerate() {
            if !left.is_nan() && !right.is_nan() && predicate.holds(left, right) {
                selection.push(row as u32);
            }
        }
        Ok(selection)
    }
}
