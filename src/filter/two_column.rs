use std::sync::Arc;

use crate::column::{Column, ColumnReference, Predicate};
use crate::error::{Result, TabulaError};
use crate::filter::Filter;
use crate::selection::Selection;
use crate::table::Table;

/// The right-hand side of a two-column comparison: either a named sibling
/// column resolved from the supplied table, or a concrete column captured
/// when the filter was built.
#[derive(Debug, Clone)]
enum RightHand {
    Reference(ColumnReference),
    Captured(Arc<Column>),
}

/// Compares two columns positionally: row i of the left column against row i
/// of the right. Both columns must have the same row count; a mismatch is a
/// precondition violation, never an implicit truncation.
#[derive(Debug, Clone)]
pub struct TwoColumnFilter {
    left: ColumnReference,
    right: RightHand,
    predicate: Predicate,
}

impl TwoColumnFilter {
    pub fn with_reference(
        left: ColumnReference,
        right: ColumnReference,
        predicate: Predicate,
    ) -> Self {
        Self {
            left,
            right: RightHand::Reference(right),
            predicate,
        }
    }

    pub fn with_column(left: ColumnReference, right: Arc<Column>, predicate: Predicate) -> Self {
        Self {
            left,
            right: RightHand::Captured(right),
            predicate,
        }
    }

    fn eval(&self, left: &Column, table: Option<&Table>) -> Result<Selection> {
        match (&self.right, table) {
            (RightHand::Captured(right), _) => left.eval_column(self.predicate, right),
            (RightHand::Reference(reference), Some(table)) => {
                left.eval_column(self.predicate, reference.resolve(table)?)
            }
            (RightHand::Reference(reference), None) => {
                Err(TabulaError::UnboundReference(reference.name().to_string()))
            }
        }
    }
}

impl Filter for TwoColumnFilter {
    fn apply(&self, table: &Table) -> Result<Selection> {
        let left = self.left.resolve(table)?;
        self.eval(left, Some(table))
    }

    fn apply_to_column(&self, column: &Column) -> Result<Selection> {
        self.eval(column, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{NumberColumn, NumberPredicate};

    fn number_column(name: &str, values: Vec<f64>) -> Column {
        Column::Number(NumberColumn::from_values(name, values))
    }

    fn table(columns: Vec<Column>) -> Table {
        let mut t = Table::new();
        for c in columns {
            t.add_column(c).unwrap();
        }
        t
    }

    #[test]
    fn sibling_column_equality() {
        let t = table(vec![
            number_column("a", vec![1.0, 2.0, 3.0]),
            number_column("b", vec![1.0, 5.0, 3.0]),
        ]);
        let filter = TwoColumnFilter::with_reference(
            ColumnReference::new("a"),
            ColumnReference::new("b"),
            Predicate::Number(NumberPredicate::Equal),
        );
        assert_eq!(filter.apply(&t).unwrap().iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn captured_column_is_independent_of_the_supplied_table() {
        let captured = Arc::new(number_column("captured", vec![9.0, 2.0, 9.0]));
        let filter = TwoColumnFilter::with_column(
            ColumnReference::new("a"),
            captured,
            Predicate::Number(NumberPredicate::Equal),
        );
        let t = table(vec![number_column("a", vec![9.0, 0.0, 9.0])]);
        assert_eq!(filter.apply(&t).unwrap().iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn mismatched_row_counts_fail_instead_of_truncating() {
        let captured = Arc::new(number_column("captured", vec![1.0, 2.0, 3.0, 4.0]));
        let filter = TwoColumnFilter::with_column(
            ColumnReference::new("a"),
            captured,
            Predicate::Number(NumberPredicate::Equal),
        );
        let t = table(vec![number_column("a", vec![1.0, 2.0, 3.0])]);
        assert!(matches!(
            filter.apply(&t).unwrap_err(),
            TabulaError::RowCountMismatch { left: 3, right: 4, .. }
        ));
    }

    #[test]
    fn reference_right_side_needs_a_table() {
        let filter = TwoColumnFilter::with_reference(
            ColumnReference::new("a"),
            ColumnReference::new("b"),
            Predicate::Number(NumberPredicate::Equal),
        );
        let column = number_column("a", vec![1.0]);
        assert!(matches!(
            filter.apply_to_column(&column).unwrap_err(),
            TabulaError::UnboundReference(name) if name == "b"
        ));
    }
}
