use serde::{Deserialize, Serialize};

use crate::column::LogicalType;
use crate::io::formats::CellParser;
use crate::io::locale::Locale;

/// Rows examined by type detection when sampling is enabled.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Configuration for reading delimited text. Built with the builder; the
/// options value itself is immutable once constructed and serializable so a
/// configuration can be stored next to the data it reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvReadOptions {
    header: bool,
    separator: char,
    sample: bool,
    locale: Locale,
    /// Full per-position override of detection, including `Skip` entries.
    /// Empty means detect every column.
    column_types: Vec<LogicalType>,
    date_format: Option<String>,
    date_time_format: Option<String>,
    time_format: Option<String>,
    /// When set, a cell that fails to parse under its column's locked type
    /// aborts the read instead of degrading to missing.
    strict: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        CsvReadOptions::builder().build()
    }
}

impl CsvReadOptions {
    pub fn builder() -> CsvReadOptionsBuilder {
        CsvReadOptionsBuilder::default()
    }

    pub fn header(&self) -> bool {
        self.header
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn sample(&self) -> bool {
        self.sample
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn column_types(&self) -> &[LogicalType] {
        &self.column_types
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub(crate) fn cell_parser(&self) -> CellParser {
        CellParser::new(
            self.locale,
            self.date_format.clone(),
            self.date_time_format.clone(),
            self.time_format.clone(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct CsvReadOptionsBuilder {
    header: bool,
    separator: char,
    sample: bool,
    locale: Locale,
    column_types: Vec<LogicalType>,
    date_format: Option<String>,
    date_time_format: Option<String>,
    time_format: Option<String>,
    strict: bool,
}

impl Default for CsvReadOptionsBuilder {
    fn default() -> Self {
        Self {
            header: true,
            separator: ',',
            sample: true,
            locale: Locale::default(),
            column_types: Vec::new(),
            date_format: None,
            date_time_format: None,
            time_format: None,
            strict: false,
        }
    }
}

impl CsvReadOptionsBuilder {
    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn sample(mut self, sample: bool) -> Self {
        self.sample = sample;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// One entry per column position; use `LogicalType::Skip` to drop a
    /// column from the resulting schema without shifting later positions.
    pub fn column_types(mut self, types: Vec<LogicalType>) -> Self {
        self.column_types = types;
        self
    }

    /// chrono pattern replacing automatic date detection, e.g. `%Y.%m.%d`.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    pub fn date_time_format(mut self, format: impl Into<String>) -> Self {
        self.date_time_format = Some(format.into());
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> CsvReadOptions {
        CsvReadOptions {
            header: self.header,
            separator: self.separator,
            sample: self.sample,
            locale: self.locale,
            column_types: self.column_types,
            date_format: self.date_format,
            date_time_format: self.date_time_format,
            time_format: self.time_format,
            strict: self.strict,
        }
    }
}
