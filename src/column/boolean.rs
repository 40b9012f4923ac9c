use crate::column::predicates::BooleanPredicate;
use crate::error::Result;
use crate::selection::Selection;

const BYTE_TRUE: u8 = 1;
const BYTE_FALSE: u8 = 0;

/// Packed byte storage: 0 = false, 1 = true, MAX = missing.
pub const MISSING_BOOLEAN: u8 = u8::MAX;

#[derive(Debug, Clone)]
pub struct BooleanColumn {
    name: String,
    values: Vec<u8>,
}

impl BooleanColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn from_values(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|v| if v { BYTE_TRUE } else { BYTE_FALSE })
                .collect(),
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

    pub fn append(&mut self, value: bool) {
        self.values.push(if value { BYTE_TRUE } else { BYTE_FALSE });
    }

    pub fn append_missing(&mut self) {
        self.values.push(MISSING_BOOLEAN);
    }

    pub fn get(&self, row: usize) -> Option<bool> {
        match self.values.get(row) {
            Some(&BYTE_TRUE) => Some(true),
            Some(&BYTE_FALSE) => Some(false),
            _ => None,
        }
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.values.get(row).is_none_or(|&v| v == MISSING_BOOLEAN)
    }

    pub fn is_true(&self) -> Selection {
        self.select_byte(BYTE_TRUE)
    }

    pub fn is_false(&self) -> Selection {
        self.select_byte(BYTE_FALSE)
    }

    fn select_byte(&self, wanted: u8) -> Selection {
        let mut selection = Selection::new();
        for (row, &value) in self.values.iter().enumerate() {
            if value == wanted {
                selection.push(row as u32);
            }
        }
        selection
    }

    pub fn eval(&self, predicate: BooleanPredicate, comparison: bool) -> Selection {
        match (predicate, comparison) {
            (BooleanPredicate::Equal, true) | (BooleanPredicate::NotEqual, false) => self.is_true(),
            (BooleanPredicate::Equal, false) | (BooleanPredicate::NotEqual, true) => self.is_false(),
        }
    }

    pub fn eval_column(
        &self,
        predicate: BooleanPredicate,
        other: &BooleanColumn,
    ) -> Result<Selection> {
        super::check_row_counts(&self.name, self.len(), &other.name, other.len())?;
        let mut selection = Selection::new();
        for (row, (&left, &right)) in self.values.iter().zip(&other.values).enumerate() {
            if left == MISSING_BOOLEAN || right == MISSING_BOOLEAN {
                continue;
            }
            let holds = match predicate {
                BooleanPredicate::Equal => left == right,
                BooleanPredicate::NotEqual => left != right,
            };
            if holds {
                selection.push(row as u32);
            }
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_true_and_is_false_partition_the_non_missing_rows() {
        let mut col = BooleanColumn::from_values("flag", [true, false, true]);
        col.append_missing();
        assert_eq!(col.is_true().iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(col.is_false().iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(col.is_true().size() + col.is_false().size(), 3);
    }

    #[test]
    fn missing_rows_match_neither_polarity() {
        let mut col = BooleanColumn::new("flag");
        col.append_missing();
        assert!(col.is_true().is_empty());
        assert!(col.is_false().is_empty());
        assert!(col.eval(BooleanPredicate::NotEqual, true).is_empty());
    }

    #[test]
    fn two_column_equality_excludes_missing_pairs() {
        let mut left = BooleanColumn::from_values("l", [true, false]);
        left.append_missing();
        let mut right = BooleanColumn::from_values("r", [true, true]);
        right.append_missing();
        let selection = left.eval_column(BooleanPredicate::Equal, &right).unwrap();
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0]);
    }
}
