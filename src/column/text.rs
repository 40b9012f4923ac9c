use crate::column::predicates::TextPredicate;
use crate::error::Result;
use crate::selection::Selection;

/// Text columns use the empty string as their missing-value sentinel.
pub const MISSING_TEXT: &str = "";

#[derive(Debug, Clone)]
pub struct TextColumn {
    name: String,
    values: Vec<String>,
}

impl TextColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn from_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
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

    pub fn append(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    pub fn append_missing(&mut self) {
        self.values.push(String::new());
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.values
            .get(row)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.values.get(row).is_none_or(|v| v.is_empty())
    }

    fn holds(predicate: TextPredicate, left: &str, right: &str) -> bool {
        match predicate {
            TextPredicate::Equal => left == right,
            TextPredicate::EqualIgnoringCase => left.to_lowercase() == right.to_lowercase(),
            TextPredicate::NotEqual => left != right,
        }
    }

    pub fn eval(&self, predicate: TextPredicate, comparison: &str) -> Selection {
        let mut selection = Selection::new();
        if comparison.is_empty() {
            return selection;
        }
        for (row, value) in self.values.iter().enumerate() {
            if !value.is_empty() && Self::holds(predicate, value, comparison) {
                selection.push(row as u32);
            }
        }
        selection
    }

    pub fn eval_column(&self, predicate: TextPredicate, other: &TextColumn) -> Result<Selection> {
        super::check_row_counts(&self.name, self.len(), &other.name, other.len())?;
        let mut selection = Selection::new();
        for (row, (left, right)) in self.values.iter().zip(&other.values).enumerate() {
            if !left.is_empty() && !right.is_empty() && Self::holds(predicate, left, right) {
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
    fn equal_ignoring_case_lowercases_both_sides() {
        let col = TextColumn::from_values("who", ["Fox", "fox", "FOX", "dog"]);
        let selection = col.eval(TextPredicate::EqualIgnoringCase, "fOx");
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn missing_text_never_matches() {
        let col = TextColumn::from_values("who", ["a", "", "b"]);
        assert!(col.eval(TextPredicate::Equal, "").is_empty());
        assert_eq!(
            col.eval(TextPredicate::NotEqual, "a").iter().collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[test]
    fn two_column_comparison_skips_rows_missing_on_either_side() {
        let left = TextColumn::from_values("l", ["x", "", "z"]);
        let right = TextColumn::from_values("r", ["x", "", "z"]);
        let selection = left.eval_column(TextPredicate::Equal, &right).unwrap();
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 2]);
    }
}
