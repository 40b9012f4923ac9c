use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table as DisplayTable};

use crate::column::Column;
use crate::error::{Result, TabulaError};
use crate::filter::Filter;
use crate::selection::Selection;

/// The minimal table container the filter core evaluates against: named
/// columns of equal row count, looked up by name. Row materialization from a
/// `Selection` belongs to the caller; this type only produces selections.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| TabulaError::ColumnNotFound(name.to_string()))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names are unique within a table, and every column carries the
    /// same row count.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.columns.iter().any(|c| c.name() == column.name()) {
            return Err(TabulaError::DuplicateColumn(column.name().to_string()));
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(TabulaError::RowCountMismatch {
                left_name: self.columns[0].name().to_string(),
                left: self.row_count(),
                right_name: column.name().to_string(),
                right: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn where_filter(&self, filter: &dyn Filter) -> Result<Selection> {
        filter.apply(self)
    }

    pub fn shape(&self) -> String {
        format!("{} rows X {} cols", self.row_count(), self.column_count())
    }

    /// One line per column: index, name, detected type.
    pub fn structure(&self) -> String {
        let mut display = DisplayTable::new();
        display
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Index", "Column Name", "Column Type"]);
        for (index, column) in self.columns.iter().enumerate() {
            display.add_row(vec![
                Cell::new(index),
                Cell::new(column.name()),
                Cell::new(column.logical_type().name()),
            ]);
        }
        display.to_string()
    }

    pub fn display(&self, num_rows: Option<usize>) -> String {
        let mut display = DisplayTable::new();
        display
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(200);

        // Header combines column name and type
        let header: Vec<Cell> = self
            .columns
            .iter()
            .map(|c| Cell::new(format!("{}\n({})", c.name(), c.logical_type().name())))
            .collect();
        display.set_header(header);

        let total = self.row_count();
        let rows_to_display = num_rows.unwrap_or(total).min(total);
        for row in 0..rows_to_display {
            let cells: Vec<Cell> = self
                .columns
                .iter()
                .map(|c| Cell::new(c.cell_to_string(row)))
                .collect();
            display.add_row(cells);
        }

        if rows_to_display < total {
            let remaining = total - rows_to_display;
            let mut summary = vec![Cell::new(format!("... and {} more rows", remaining))];
            summary.extend(vec![Cell::new("..."); self.column_count().saturating_sub(1)]);
            display.add_row(summary);
        }

        display.to_string()
    }

    pub fn print(&self, num_rows: Option<usize>) {
        println!("{}", self.display(num_rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{Column, NumberColumn, TextColumn};

    fn sample() -> Table {
        let mut table = Table::new();
        table
            .add_column(Column::Number(NumberColumn::from_values(
                "approval",
                vec![53.0, 58.0],
            )))
            .unwrap();
        table
            .add_column(Column::Text(TextColumn::from_values("who", ["fox", "zogby"])))
            .unwrap();
        table
    }

    #[test]
    fn lookup_by_name() {
        let table = sample();
        assert_eq!(table.column("who").unwrap().name(), "who");
        assert!(matches!(
            table.column("nope").unwrap_err(),
            TabulaError::ColumnNotFound(_)
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut table = sample();
        let dup = Column::Number(NumberColumn::from_values("approval", vec![1.0, 2.0]));
        assert!(matches!(
            table.add_column(dup).unwrap_err(),
            TabulaError::DuplicateColumn(_)
        ));
    }

    #[test]
    fn columns_must_share_row_count() {
        let mut table = sample();
        let short = Column::Number(NumberColumn::from_values("extra", vec![1.0]));
        assert!(matches!(
            table.add_column(short).unwrap_err(),
            TabulaError::RowCountMismatch { .. }
        ));
    }

    #[test]
    fn structure_lists_every_column() {
        let rendered = sample().structure();
        assert!(rendered.contains("approval"));
        assert!(rendered.contains("Number"));
        assert!(rendered.contains("who"));
        assert!(rendered.contains("Text"));
    }

    #[test]
    fn empty_table_shape() {
        assert_eq!(Table::new().shape(), "0 rows X 0 cols");
    }
}
