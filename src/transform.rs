use crate::column::{Column, LogicalType};
use crate::error::{Result, TabulaError};
use crate::io::CellParser;

/// Trait for column transformations. A transform derives a new column from
/// an existing one; the source is never mutated.
pub trait ColumnTransform {
    fn transform(&self, column: &Column) -> Result<Column>;
}

/// Reinterprets a column under another logical type. Text sources re-run
/// the cell parser over the stored values; cells that fail to parse become
/// the target type's missing sentinel, the same softening rule the reader
/// uses. Number sources holding epoch milliseconds reinterpret as
/// date-times.
pub struct TypeConverter {
    target: LogicalType,
    parser: CellParser,
}

impl TypeConverter {
    pub fn new(target: LogicalType, parser: CellParser) -> Self {
        Self { target, parser }
    }
}

impl ColumnTransform for TypeConverter {
    fn transform(&self, column: &Column) -> Result<Column> {
        if let (Column::Number(source), LogicalType::LocalDateTime) = (column, self.target) {
            return Ok(Column::DateTime(source.as_date_times()));
        }
        let Column::Text(source) = column else {
            return Err(TabulaError::TypeMismatch {
                column: column.name().to_string(),
                expected: LogicalType::Text.name(),
                actual: column.logical_type().name(),
            });
        };

        let mut derived = Column::with_type(self.target, source.name())?;
        for row in 0..source.len() {
            let cell = source.get(row);
            match &mut derived {
                Column::Boolean(c) => {
                    match cell.and_then(|v| self.parser.parse_boolean(v)) {
                        Some(v) => c.append(v),
                        None => c.append_missing(),
                    }
                }
                Column::Number(c) => match cell.and_then(|v| self.parser.parse_number(v)) {
                    Some(v) => c.append(v),
                    None => c.append_missing(),
                },
                Column::Date(c) => match cell.and_then(|v| self.parser.parse_date(v)) {
                    Some(v) => c.append(v),
                    None => c.append_missing(),
                },
                Column::DateTime(c) => match cell.and_then(|v| self.parser.parse_date_time(v)) {
                    Some(v) => c.append(v),
                    None => c.append_missing(),
                },
                Column::Time(c) => match cell.and_then(|v| self.parser.parse_time(v)) {
                    Some(v) => c.append(v),
                    None => c.append_missing(),
                },
                Column::Text(c) => match cell {
                    Some(v) => c.append(v),
                    None => c.append_missing(),
                },
            }
        }
        Ok(derived)
    }
}
