use std::path::Path;

use tracing::warn;

use crate::column::{Column, LogicalType};
use crate::error::{Result, TabulaError};
use crate::io::detect::TypeDetector;
use crate::io::formats::CellParser;
use crate::io::options::{CsvReadOptions, DEFAULT_SAMPLE_SIZE};
use crate::table::Table;

/// Reads delimited text into a typed `Table`: detect (or take configured)
/// column types, then parse every row under the locked types. The reader
/// consumes pre-tokenized rows; proper CSV tokenization belongs to an
/// external layer, and the line splitter shipped here is the minimal shim
/// for file and string input (separator plus double-quoted fields).
pub struct CsvReader {
    options: CsvReadOptions,
}

impl CsvReader {
    pub fn new(options: CsvReadOptions) -> Self {
        Self { options }
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Table> {
        let text = std::fs::read_to_string(path)?;
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Table> {
        self.read_rows(tokenize(text, self.options.separator()))
    }

    /// The core entry point: rows from any source, each an ordered sequence
    /// of raw text fields.
    pub fn read_rows(&self, mut rows: Vec<Vec<String>>) -> Result<Table> {
        let header = if self.options.header() && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };
        let column_count = match &header {
            Some(h) => h.len(),
            None => rows.first().map_or(0, Vec::len),
        };
        if column_count == 0 {
            return Ok(Table::new());
        }

        let types = self.column_types(&rows, column_count)?;
        let parser = self.options.cell_parser();

        // Skipped positions never become columns, but later positions keep
        // their original index for naming and override alignment.
        let mut kept: Vec<(usize, Column)> = Vec::new();
        let mut table = Table::new();
        for (position, logical) in types.iter().enumerate() {
            if *logical == LogicalType::Skip {
                continue;
            }
            let name = column_name(header.as_deref(), position);
            kept.push((position, Column::with_type(*logical, name)?));
        }

        for (row_index, row) in rows.iter().enumerate() {
            for (position, column) in &mut kept {
                match row.get(*position) {
                    // a short row degrades to missing, not a load failure
                    None => column.append_missing(),
                    Some(cell) if parser.is_missing(cell) => column.append_missing(),
                    Some(cell) => {
                        append_cell(column, cell, row_index, &parser, self.options.strict())?
                    }
                }
            }
        }

        for (_, column) in kept {
            table.add_column(column)?;
        }
        Ok(table)
    }

    /// Runs type detection alone, without building a table.
    pub fn detect_types(&self, text: &str) -> Result<Vec<LogicalType>> {
        let mut rows = tokenize(text, self.options.separator());
        let header = if self.options.header() && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };
        let column_count = match &header {
            Some(h) => h.len(),
            None => rows.first().map_or(0, Vec::len),
        };
        self.column_types(&rows, column_count)
    }

    /// Declaration-form rendering of detected types, one line per column,
    /// annotated with position and name. Diagnostics only; nothing parses
    /// this back.
    pub fn print_column_types(&self, text: &str) -> Result<String> {
        let mut rows = tokenize(text, self.options.separator());
        let header = if self.options.header() && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };
        let column_count = match &header {
            Some(h) => h.len(),
            None => rows.first().map_or(0, Vec::len),
        };
        let types = self.column_types(&rows, column_count)?;

        let width = types.iter().map(|t| t.name().len()).max().unwrap_or(0) + 1;
        let mut out = String::from("let column_types = [\n");
        for (position, logical) in types.iter().enumerate() {
            let entry = format!("{},", logical.name());
            let name = column_name(header.as_deref(), position);
            out.push_str(&format!("    {:width$} // {:<5} {}\n", entry, position, name));
        }
        out.push_str("];\n");
        Ok(out)
    }

    fn column_types(&self, rows: &[Vec<String>], column_count: usize) -> Result<Vec<LogicalType>> {
        let configured = self.options.column_types();
        if !configured.is_empty() {
            if configured.len() != column_count {
                return Err(TabulaError::InvalidOptions(format!(
                    "{} column types configured for {} columns",
                    configured.len(),
                    column_count
                )));
            }
            return Ok(configured.to_vec());
        }
        let sample = if self.options.sample() {
            &rows[..rows.len().min(DEFAULT_SAMPLE_SIZE)]
        } else {
            rows
        };
        Ok(TypeDetector::new(&self.options).detect(sample, column_count))
    }
}

fn column_name(header: Option<&[String]>, position: usize) -> String {
    match header.and_then(|h| h.get(position)) {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => format!("C{}", position),
    }
}

fn append_cell(
    column: &mut Column,
    cell: &str,
    row: usize,
    parser: &CellParser,
    strict: bool,
) -> Result<()> {
    let cell = cell.trim();
    let parsed = match column {
        Column::Boolean(c) => match parser.parse_boolean(cell) {
            Some(v) => {
                c.append(v);
                true
            }
            None => false,
        },
        Column::Number(c) => match parser.parse_number(cell) {
            Some(v) => {
                c.append(v);
                true
            }
            None => false,
        },
        Column::Text(c) => {
            c.append(cell);
            true
        }
        Column::Date(c) => match parser.parse_date(cell) {
            Some(v) => {
                c.append(v);
                true
            }
            None => false,
        },
        Column::DateTime(c) => match parser.parse_date_time(cell) {
            Some(v) => {
                c.append(v);
                true
            }
            None => false,
        },
        Column::Time(c) => match parser.parse_time(cell) {
            Some(v) => {
                c.append(v);
                true
            }
            None => false,
        },
    };
    if parsed {
        return Ok(());
    }
    if strict {
        return Err(TabulaError::CellParse {
            column: column.name().to_string(),
            row,
            cell: cell.to_string(),
            expected: column.logical_type().name(),
        });
    }
    warn!(
        column = column.name(),
        row,
        cell,
        expected = column.logical_type().name(),
        "cell failed to parse under the detected type, storing missing"
    );
    column.append_missing();
    Ok(())
}

/// Splits lines on the separator, honoring double-quoted fields with `""`
/// escapes. Blank lines are ignored.
fn tokenize(text: &str, separator: char) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_line(line, separator))
        .collect()
}

fn split_line(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && field.is_empty() {
            in_quotes = true;
        } else if c == separator {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(c);
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::column::{ColumnReference, LogicalType};
    use crate::filter::Filter;
    use crate::io::locale::Locale;

    const APPROVAL_CSV: &str = "\
date,approval,who
2004-02-04,53,fox
2004-01-21,53,fox
2004-01-07,58,zogby
2003-12-03,52,fox
";

    fn reader(options: CsvReadOptions) -> CsvReader {
        CsvReader::new(options)
    }

    #[test]
    fn reads_header_and_detects_types() {
        let table = reader(CsvReadOptions::default()).read_str(APPROVAL_CSV).unwrap();
        assert_eq!(table.column_names(), vec!["date", "approval", "who"]);
        assert_eq!(table.row_count(), 4);
        assert_eq!(
            table.column("date").unwrap().logical_type(),
            LogicalType::LocalDate
        );
        assert_eq!(
            table.column("approval").unwrap().logical_type(),
            LogicalType::Number
        );
        assert_eq!(table.column("who").unwrap().logical_type(), LogicalType::Text);
    }

    #[test]
    fn detection_with_sampling_disabled_matches_sampled_result() {
        let sampled = reader(CsvReadOptions::default()).detect_types(APPROVAL_CSV).unwrap();
        let full = reader(CsvReadOptions::builder().sample(false).build())
            .detect_types(APPROVAL_CSV)
            .unwrap();
        assert_eq!(sampled, full);
    }

    #[test]
    fn read_result_is_filterable() {
        let table = reader(CsvReadOptions::default()).read_str(APPROVAL_CSV).unwrap();
        let filter = ColumnReference::new("who").is_equal_to("fox");
        let selection = filter.apply(&table).unwrap();
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn quoted_fields_reach_detection_unwrapped() {
        let csv = "Date\n\"Nov 1, 2017\"\n\"Oct 1, 2017\"\n\"Sep 1, 2017\"\n";
        let types = reader(CsvReadOptions::builder().locale(Locale::English).build())
            .detect_types(csv)
            .unwrap();
        assert_eq!(types, vec![LogicalType::LocalDate]);
    }

    #[test]
    fn skip_override_drops_the_column_but_not_the_positions() {
        let csv = "\
stop_id,stop_name,stop_desc,stop_lat,stop_lon
100,Main St,near the park,32.31,-97.72
101,Elm St,,32.38,-97.68
";
        let options = CsvReadOptions::builder()
            .column_types(vec![
                LogicalType::Number,
                LogicalType::Text,
                LogicalType::Skip,
                LogicalType::Number,
                LogicalType::Number,
            ])
            .build();
        let table = reader(options).read_str(csv).unwrap();
        assert_eq!(table.column_count(), 4);
        assert_eq!(
            table.column_names(),
            vec!["stop_id", "stop_name", "stop_lat", "stop_lon"]
        );
    }

    #[test]
    fn generated_names_keep_original_positions_across_skips() {
        let csv = "100,Main St,near the park,32.31,-97.72\n101,Elm St,x,32.38,-97.68\n";
        let options = CsvReadOptions::builder()
            .header(false)
            .column_types(vec![
                LogicalType::Number,
                LogicalType::Text,
                LogicalType::Skip,
                LogicalType::Number,
                LogicalType::Number,
            ])
            .build();
        let table = reader(options).read_str(csv).unwrap();
        assert_eq!(table.column_names(), vec!["C0", "C1", "C3", "C4"]);
    }

    #[test]
    fn unparseable_cell_softens_to_missing_by_default() {
        let options = CsvReadOptions::builder()
            .column_types(vec![LogicalType::Number])
            .header(false)
            .build();
        let table = reader(options).read_str("1\nnot a number\n3\n").unwrap();
        let column = table.column("C0").unwrap();
        assert_eq!(table.row_count(), 3);
        assert!(column.is_missing(1));
        assert!(!column.is_missing(0));
    }

    #[test]
    fn strict_mode_turns_softening_into_an_error() {
        let options = CsvReadOptions::builder()
            .column_types(vec![LogicalType::Number])
            .header(false)
            .strict(true)
            .build();
        let err = reader(options).read_str("1\nnot a number\n").unwrap_err();
        assert!(matches!(
            err,
            TabulaError::CellParse { row: 1, .. }
        ));
    }

    #[test]
    fn detection_locks_on_the_sample_prefix_and_later_rows_soften() {
        let mut csv = String::from("n\n");
        for i in 0..DEFAULT_SAMPLE_SIZE {
            csv.push_str(&format!("{}\n", i));
        }
        csv.push_str("not a number\n");

        let table = reader(CsvReadOptions::default()).read_str(&csv).unwrap();
        let column = table.column("n").unwrap();
        assert_eq!(column.logical_type(), LogicalType::Number);
        assert_eq!(table.row_count(), DEFAULT_SAMPLE_SIZE + 1);
        assert!(column.is_missing(DEFAULT_SAMPLE_SIZE));
        assert!(!column.is_missing(DEFAULT_SAMPLE_SIZE - 1));

        // with sampling off the divergent row is evidence and wins
        let full = reader(CsvReadOptions::builder().sample(false).build())
            .read_str(&csv)
            .unwrap();
        assert_eq!(
            full.column("n").unwrap().logical_type(),
            LogicalType::Text
        );
    }

    #[test]
    fn strict_mode_rejects_rows_beyond_the_sample() {
        let mut csv = String::from("n\n");
        for i in 0..DEFAULT_SAMPLE_SIZE {
            csv.push_str(&format!("{}\n", i));
        }
        csv.push_str("not a number\n");

        let err = reader(CsvReadOptions::builder().strict(true).build())
            .read_str(&csv)
            .unwrap_err();
        assert!(matches!(
            err,
            TabulaError::CellParse { row, .. } if row == DEFAULT_SAMPLE_SIZE
        ));
    }

    #[test]
    fn short_rows_pad_with_missing() {
        let csv = "a,b\n1,2\n3\n";
        let table = reader(CsvReadOptions::default()).read_str(csv).unwrap();
        assert_eq!(table.row_count(), 2);
        assert!(table.column("b").unwrap().is_missing(1));
    }

    #[test]
    fn empty_input_yields_an_empty_table() {
        for header in [true, false] {
            let options = CsvReadOptions::builder().header(header).build();
            let table = reader(options).read_str("").unwrap();
            assert_eq!(table.shape(), "0 rows X 0 cols");
        }
    }

    #[test]
    fn mismatched_override_length_is_rejected() {
        let options = CsvReadOptions::builder()
            .column_types(vec![LogicalType::Number])
            .build();
        let err = reader(options).read_str("a,b\n1,2\n").unwrap_err();
        assert!(matches!(err, TabulaError::InvalidOptions(_)));
    }

    #[test]
    fn print_column_types_lists_position_and_name() {
        let rendered = reader(CsvReadOptions::default())
            .print_column_types(APPROVAL_CSV)
            .unwrap();
        assert!(rendered.starts_with("let column_types = [\n"));
        assert!(rendered.contains("LocalDate,"));
        assert!(rendered.contains("// 0"));
        assert!(rendered.contains("approval"));
        assert!(rendered.ends_with("];\n"));
    }

    #[test]
    fn reads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(APPROVAL_CSV.as_bytes()).unwrap();
        let table = reader(CsvReadOptions::default()).read_file(file.path()).unwrap();
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.column_names(), vec!["date", "approval", "who"]);
    }

    #[test]
    fn date_format_override_reads_nonstandard_dates() {
        let options = CsvReadOptions::builder()
            .header(false)
            .date_format("%Y.%m.%d")
            .build();
        let table = reader(options).read_str("2014.10.03\n2014.07.04\n").unwrap();
        let column = table.column("C0").unwrap();
        assert_eq!(column.logical_type(), LogicalType::LocalDate);
        assert!(!column.is_missing(0));
    }
}
