use crate::column::{CellValue, Column, ColumnReference, Predicate};
use crate::error::Result;
use crate::filter::Filter;
use crate::selection::Selection;
use crate::table::Table;

/// A single-column filter: one column reference, one predicate identity and
/// one literal of the column's own type.
#[derive(Debug, Clone)]
pub struct ValueFilter {
    reference: ColumnReference,
    predicate: Predicate,
    value: CellValue,
}

impl ValueFilter {
    pub fn new(reference: ColumnReference, predicate: Predicate, value: CellValue) -> Self {
        Self {
            reference,
            predicate,
            value,
        }
    }

    pub fn reference(&self) -> &ColumnReference {
        &self.reference
    }
}

impl Filter for ValueFilter {
    fn apply(&self, table: &Table) -> Result<Selection> {
        let column = self.reference.resolve(table)?;
        self.apply_to_column(column)
    }

    fn apply_to_column(&self, column: &Column) -> Result<Selection> {
        column.eval_value(self.predicate, &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::NumberColumn;
    use crate::error::TabulaError;

    fn table_with(values: Vec<f64>) -> Table {
        let mut table = Table::new();
        table
            .add_column(Column::Number(NumberColumn::from_values("approval", values)))
            .unwrap();
        table
    }

    #[test]
    fn filter_built_before_any_table_applies_to_several() {
        let filter = ColumnReference::new("approval").is_greater_than(50.0);
        let first = table_with(vec![40.0, 60.0, 80.0]);
        let second = table_with(vec![55.0, 45.0]);
        assert_eq!(filter.apply(&first).unwrap().iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(filter.apply(&second).unwrap().iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn resolution_against_missing_column_is_an_error() {
        let filter = ColumnReference::new("nope").is_equal_to(1.0);
        let table = table_with(vec![1.0]);
        assert!(matches!(
            filter.apply(&table).unwrap_err(),
            TabulaError::ColumnNotFound(name) if name == "nope"
        ));
    }

    #[test]
    fn apply_to_column_bypasses_resolution() {
        let filter = ColumnReference::new("ignored").is_equal_to(2.0);
        let column = Column::Number(NumberColumn::from_values("n", vec![1.0, 2.0]));
        assert_eq!(
            filter.apply_to_column(&column).unwrap().iter().collect::<Vec<_>>(),
            vec![1]
        );
    }
}
