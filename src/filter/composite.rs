use std::sync::Arc;

use crate::column::Column;
use crate::error::Result;
use crate::filter::Filter;
use crate::selection::Selection;
use crate::table::Table;

/// Intersection of the child selections. Children are independent, so
/// evaluation order never changes the result; evaluation stops early once
/// the running intersection is empty. An `And` with no children selects
/// nothing.
pub struct And {
    filters: Vec<Arc<dyn Filter>>,
}

impl And {
    pub fn new(filters: Vec<Arc<dyn Filter>>) -> Self {
        Self { filters }
    }
}

impl Filter for And {
    fn apply(&self, table: &Table) -> Result<Selection> {
        let mut children = self.filters.iter();
        let Some(first) = children.next() else {
            return Ok(Selection::new());
        };
        let mut result = first.apply(table)?;
        for child in children {
            if result.is_empty() {
                break;
            }
            result = result.and(&child.apply(table)?);
        }
        Ok(result)
    }

    fn apply_to_column(&self, column: &Column) -> Result<Selection> {
        let mut children = self.filters.iter();
        let Some(first) = children.next() else {
            return Ok(Selection::new());
        };
        let mut result = first.apply_to_column(column)?;
        for child in children {
            if result.is_empty() {
                break;
            }
            result = result.and(&child.apply_to_column(column)?);
        }
        Ok(result)
    }
}

/// Union of the child selections.
pub struct Or {
    filters: Vec<Arc<dyn Filter>>,
}

impl Or {
    pub fn new(filters: Vec<Arc<dyn Filter>>) -> Self {
        Self { filters }
    }
}

impl Filter for Or {
    fn apply(&self, table: &Table) -> Result<Selection> {
        let mut result = Selection::new();
        for child in &self.filters {
            result = result.or(&child.apply(table)?);
        }
        Ok(result)
    }

    fn apply_to_column(&self, column: &Column) -> Result<Selection> {
        let mut result = Selection::new();
        for child in &self.filters {
            result = result.or(&child.apply_to_column(column)?);
        }
        Ok(result)
    }
}

/// Complement of the child selection relative to the row count of the table
/// (or column) being filtered.
pub struct Not {
    filter: Arc<dyn Filter>,
}

impl Not {
    pub fn new(filter: Arc<dyn Filter>) -> Self {
        Self { filter }
    }
}

impl Filter for Not {
    fn apply(&self, table: &Table) -> Result<Selection> {
        self.filter.apply(table)?.not(table.row_count())
    }

    fn apply_to_column(&self, column: &Column) -> Result<Selection> {
        self.filter.apply_to_column(column)?.not(column.len())
    }
}

/// Pass-through over a boolean-valued child filter. Provided for symmetry
/// with `IsFalse` at call sites.
pub struct IsTrue {
    filter: Arc<dyn Filter>,
}

impl IsTrue {
    pub fn new(filter: Arc<dyn Filter>) -> Self {
        Self { filter }
    }
}

impl Filter for IsTrue {
    fn apply(&self, table: &Table) -> Result<Selection> {
        self.filter.apply(table)
    }

    fn apply_to_column(&self, column: &Column) -> Result<Selection> {
        self.filter.apply_to_column(column)
    }
}

/// Complement of a boolean-valued child filter; identical semantics to
/// wrapping the child in `Not`.
pub struct IsFalse {
    filter: Arc<dyn Filter>,
}

impl IsFalse {
    pub fn new(filter: Arc<dyn Filter>) -> Self {
        Self { filter }
    }
}

impl Filter for IsFalse {
    fn apply(&self, table: &Table) -> Result<Selection> {
        self.filter.apply(table)?.not(table.row_count())
    }

    fn apply_to_column(&self, column: &Column) -> Result<Selection> {
        self.filter.apply_to_column(column)?.not(column.len())
    }
}
