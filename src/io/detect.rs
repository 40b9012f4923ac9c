use tracing::debug;

use crate::column::LogicalType;
use crate::io::formats::CellParser;
use crate::io::options::CsvReadOptions;

/// Per-column viability flags. Every structural type starts viable; a
/// non-missing cell that fails a type's parser knocks that type out. Text
/// never appears here because it is the universal fallback.
#[derive(Debug, Clone, Copy)]
struct Viability {
    boolean: bool,
    number: bool,
    date: bool,
    date_time: bool,
    time: bool,
}

impl Viability {
    fn all() -> Self {
        Self {
            boolean: true,
            number: true,
            date: true,
            date_time: true,
            time: true,
        }
    }

    fn update(&mut self, cell: &str, parser: &CellParser) {
        if self.boolean && !parser.detect_boolean(cell) {
            self.boolean = false;
        }
        if self.number && parser.parse_number(cell).is_none() {
            self.number = false;
        }
        if self.date && parser.parse_date(cell).is_none() {
            self.date = false;
        }
        if self.date_time && parser.parse_date_time(cell).is_none() {
            self.date_time = false;
        }
        if self.time && parser.parse_time(cell).is_none() {
            self.time = false;
        }
    }

    /// The most specific still-viable type, in fixed priority order.
    fn resolve(&self) -> LogicalType {
        if self.boolean {
            LogicalType::Boolean
        } else if self.number {
            LogicalType::Number
        } else if self.date {
            LogicalType::LocalDate
        } else if self.date_time {
            LogicalType::LocalDateTime
        } else if self.time {
            LogicalType::LocalTime
        } else {
            LogicalType::Text
        }
    }
}

/// Infers one logical type per column from a sample of raw rows. Detection
/// is column-wise independent and locale-sensitive: re-run it when the
/// locale changes.
pub struct TypeDetector {
    parser: CellParser,
}

impl TypeDetector {
    pub fn new(options: &CsvReadOptions) -> Self {
        Self {
            parser: options.cell_parser(),
        }
    }

    pub fn detect(&self, rows: &[Vec<String>], column_count: usize) -> Vec<LogicalType> {
        let mut viability = vec![Viability::all(); column_count];
        for row in rows {
            for (position, flags) in viability.iter_mut().enumerate() {
                // a short row supplies no evidence for its absent columns
                let Some(cell) = row.get(position) else {
                    continue;
                };
                if self.parser.is_missing(cell) {
                    continue;
                }
                flags.update(cell, &self.parser);
            }
        }
        let detected: Vec<LogicalType> = viability.iter().map(Viability::resolve).collect();
        for (position, logical) in detected.iter().enumerate() {
            debug!(position, column_type = logical.name(), "detected column type");
        }
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::locale::Locale;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn detect(options: &CsvReadOptions, data: &[Vec<String>], columns: usize) -> Vec<LogicalType> {
        TypeDetector::new(options).detect(data, columns)
    }

    #[test]
    fn mixed_columns_resolve_independently() {
        let options = CsvReadOptions::default();
        let data = rows(&[
            &["2004-02-04", "53", "fox"],
            &["2004-01-21", "53", "fox"],
            &["2004-01-07", "58", "zogby"],
        ]);
        assert_eq!(
            detect(&options, &data, 3),
            vec![LogicalType::LocalDate, LogicalType::Number, LogicalType::Text]
        );
    }

    #[test]
    fn english_month_dates_need_the_english_locale() {
        let data = rows(&[
            &["Nov 1, 2017"],
            &["Oct 1, 2017"],
            &["Sep 1, 2017"],
            &["Aug 1, 2017"],
            &["Jul 1, 2017"],
            &["Jun 1, 2017"],
        ]);
        let english = CsvReadOptions::builder().locale(Locale::English).build();
        assert_eq!(detect(&english, &data, 1), vec![LogicalType::LocalDate]);

        let french = CsvReadOptions::builder().locale(Locale::French).build();
        assert_eq!(detect(&french, &data, 1), vec![LogicalType::Text]);
    }

    #[test]
    fn french_month_dates_need_the_french_locale() {
        let data = rows(&[
            &["nov. 1, 2017"],
            &["oct. 1, 2017"],
            &["sept. 1, 2017"],
            &["août 1, 2017"],
            &["juil. 1, 2017"],
            &["juin 1, 2017"],
        ]);
        let french = CsvReadOptions::builder().locale(Locale::French).build();
        assert_eq!(detect(&french, &data, 1), vec![LogicalType::LocalDate]);

        let english = CsvReadOptions::builder().locale(Locale::English).build();
        assert_eq!(detect(&english, &data, 1), vec![LogicalType::Text]);
    }

    #[test]
    fn date_times_detect_per_locale() {
        let english_data = rows(&[&["09-Nov-2014 13:03"], &["09-Jun-2014 13:03"]]);
        let french_data = rows(&[&["09-nov.-2014 13:03"], &["09-juin-2014 13:03"]]);
        let english = CsvReadOptions::builder().locale(Locale::English).build();
        let french = CsvReadOptions::builder().locale(Locale::French).build();
        assert_eq!(detect(&english, &english_data, 1), vec![LogicalType::LocalDateTime]);
        assert_eq!(detect(&french, &french_data, 1), vec![LogicalType::LocalDateTime]);
    }

    #[test]
    fn times_detect_as_local_time() {
        let options = CsvReadOptions::default();
        let data = rows(&[&["13:03"], &["09:30"], &["23:59"]]);
        assert_eq!(detect(&options, &data, 1), vec![LogicalType::LocalTime]);
    }

    #[test]
    fn booleans_detect_from_textual_tokens_only() {
        let options = CsvReadOptions::default();
        let textual = rows(&[&["true"], &["F"], &["yes"]]);
        assert_eq!(detect(&options, &textual, 1), vec![LogicalType::Boolean]);

        // 0/1 columns stay numeric
        let numeric = rows(&[&["0"], &["1"], &["1"]]);
        assert_eq!(detect(&options, &numeric, 1), vec![LogicalType::Number]);
    }

    #[test]
    fn missing_cells_never_falsify_a_type() {
        let options = CsvReadOptions::default();
        let data = rows(&[&["2004-02-04"], &[""], &["NA"], &["2004-01-07"]]);
        assert_eq!(detect(&options, &data, 1), vec![LogicalType::LocalDate]);
    }

    #[test]
    fn one_stray_cell_collapses_the_column_to_text() {
        let options = CsvReadOptions::default();
        let data = rows(&[&["1.5"], &["2.5"], &["about three"]]);
        assert_eq!(detect(&options, &data, 1), vec![LogicalType::Text]);
    }

    #[test]
    fn detection_is_idempotent_when_the_sample_covers_all_shapes() {
        let options = CsvReadOptions::default();
        let sample = rows(&[&["2004-02-04"], &["2004-01-21"]]);
        let mut full = sample.clone();
        for day in 1..=28 {
            full.push(vec![format!("2004-03-{:02}", day)]);
        }
        assert_eq!(detect(&options, &sample, 1), detect(&options, &full, 1));
    }

    #[test]
    fn explicit_date_format_drives_detection() {
        let options = CsvReadOptions::builder().date_format("%Y.%m.%d").build();
        let data = rows(&[&["2014.10.03"], &["2014.07.04"], &["2014.11.23"]]);
        assert_eq!(detect(&options, &data, 1), vec![LogicalType::LocalDate]);
    }
}
