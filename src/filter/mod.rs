mod composite;
mod two_column;
mod value_filter;

use std::sync::Arc;

use crate::column::Column;
use crate::error::Result;
use crate::selection::Selection;
use crate::table::Table;

pub use composite::{And, IsFalse, IsTrue, Not, Or};
pub use two_column::TwoColumnFilter;
pub use value_filter::ValueFilter;

/// A pure function from a table (or an already-resolved column) to a
/// `Selection`. Filter nodes are immutable after construction and carry no
/// evaluation state, so the same node can be wired into several composites
/// and reevaluated against different tables safely.
pub trait Filter: Send + Sync {
    /// Resolves any contained column references against `table`, then
    /// evaluates.
    fn apply(&self, table: &Table) -> Result<Selection>;

    /// Evaluates directly against a column the caller already has in hand.
    fn apply_to_column(&self, column: &Column) -> Result<Selection>;
}

pub fn and(left: Arc<dyn Filter>, right: Arc<dyn Filter>) -> Arc<dyn Filter> {
    Arc::new(And::new(vec![left, right]))
}

pub fn or(left: Arc<dyn Filter>, right: Arc<dyn Filter>) -> Arc<dyn Filter> {
    Arc::new(Or::new(vec![left, right]))
}

pub fn not(filter: Arc<dyn Filter>) -> Arc<dyn Filter> {
    Arc::new(Not::new(filter))
}
