//! In-memory columnar tables with typed columns, locale-aware type
//! detection for delimited text, and a composable filter algebra producing
//! row selections.
//!
//! Filters are built against column names before any table exists and
//! evaluated later against whichever table is supplied:
//!
//! ```
//! use tabula::column::ColumnReference;
//! use tabula::filter::Filter;
//! use tabula::io::{CsvReader, CsvReadOptions};
//!
//! let csv = "date,approval,who\n2004-02-04,53,fox\n2004-01-21,58,zogby\n";
//! let table = CsvReader::new(CsvReadOptions::default()).read_str(csv)?;
//!
//! let filter = ColumnReference::new("who").is_equal_to("fox");
//! let selection = filter.apply(&table)?;
//! assert_eq!(selection.size(), 1);
//! # Ok::<(), tabula::error::TabulaError>(())
//! ```

pub mod column;
pub mod error;
pub mod filter;
pub mod io;
pub mod selection;
pub mod table;
pub mod transform;

pub mod prelude {
    pub use crate::column::{
        BooleanColumn, BooleanPredicate, CellValue, Column, ColumnReference, DateColumn,
        DateTimeColumn, LogicalType, NumberColumn, NumberPredicate, Predicate, TemporalPredicate,
        TextColumn, TextPredicate, TimeColumn,
    };
    pub use crate::error::{Result, TabulaError};
    pub use crate::filter::{And, Filter, IsFalse, IsTrue, Not, Or, TwoColumnFilter, ValueFilter};
    pub use crate::io::{CsvReadOptions, CsvReader, Locale};
    pub use crate::selection::Selection;
    pub use crate::table::Table;
    pub use crate::transform::{ColumnTransform, TypeConverter};
}
