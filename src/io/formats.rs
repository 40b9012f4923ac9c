use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::io::locale::Locale;

/// Raw cell values that stand for "no data". These are ignored during type
/// detection (a missing cell never falsifies a candidate type) and become
/// the column's missing-value sentinel during the parse pass.
pub const MISSING_INDICATORS: [&str; 6] = ["", "NA", "N/A", "NaN", "null", "*"];

/// Candidate patterns tried in order during detection and parsing. Month
/// names are matched via `%b` after locale normalization, so a single list
/// serves every supported locale.
const DATE_PATTERNS: [&str; 8] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d.%m.%Y",
];

const DATE_TIME_PATTERNS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%b %d, %Y %H:%M",
];

const TIME_PATTERNS: [&str; 5] = [
    "%H:%M:%S%.f",
    "%H:%M:%S",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
];

/// Token sets for booleans. Detection only accepts the textual forms;
/// once a column's type is locked, `0` and `1` parse as booleans too, so a
/// numeric-looking column never detects as boolean by accident.
const TRUE_TOKENS_FOR_DETECTION: [&str; 6] = ["true", "t", "y", "yes", "vrai", "oui"];
const FALSE_TOKENS_FOR_DETECTION: [&str; 6] = ["false", "f", "n", "no", "faux", "non"];

/// Parses raw text cells under one read configuration: a locale plus
/// optional explicit format strings that replace the candidate lists.
#[derive(Debug, Clone, Default)]
pub struct CellParser {
    locale: Locale,
    date_format: Option<String>,
    date_time_format: Option<String>,
    time_format: Option<String>,
}

impl CellParser {
    pub fn new(
        locale: Locale,
        date_format: Option<String>,
        date_time_format: Option<String>,
        time_format: Option<String>,
    ) -> Self {
        Self {
            locale,
            date_format,
            date_time_format,
            time_format,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_missing(&self, cell: &str) -> bool {
        let trimmed = cell.trim();
        MISSING_INDICATORS.iter().any(|m| *m == trimmed)
    }

    /// Boolean detection: textual tokens only.
    pub fn detect_boolean(&self, cell: &str) -> bool {
        let token = cell.trim().to_lowercase();
        TRUE_TOKENS_FOR_DETECTION.contains(&token.as_str())
            || FALSE_TOKENS_FOR_DETECTION.contains(&token.as_str())
    }

    /// Boolean parsing under a locked column type additionally accepts 0/1.
    pub fn parse_boolean(&self, cell: &str) -> Option<bool> {
        let token = cell.trim().to_lowercase();
        if TRUE_TOKENS_FOR_DETECTION.contains(&token.as_str()) || token == "1" {
            Some(true)
        } else if FALSE_TOKENS_FOR_DETECTION.contains(&token.as_str()) || token == "0" {
            Some(false)
        } else {
            None
        }
    }

    /// Numbers under the locale's separators. Grouping separators are only
    /// accepted in valid three-digit groups, so "1,2" is not quietly read
    /// as twelve.
    pub fn parse_number(&self, cell: &str) -> Option<f64> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }
        let ungrouped = strip_grouping(trimmed, self.locale)?;
        let invariant: String = ungrouped
            .chars()
            .map(|c| if c == self.locale.decimal_separator() { '.' } else { c })
            .collect();
        invariant.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn parse_date(&self, cell: &str) -> Option<NaiveDate> {
        let normalized = self.locale.normalize_temporal(cell)?;
        if let Some(format) = &self.date_format {
            return NaiveDate::parse_from_str(&normalized, format).ok();
        }
        if let Some(date) = parse_compact_date(&normalized) {
            return Some(date);
        }
        DATE_PATTERNS
            .iter()
            .find_map(|pattern| NaiveDate::parse_from_str(&normalized, pattern).ok())
    }

    pub fn parse_date_time(&self, cell: &str) -> Option<NaiveDateTime> {
        let normalized = self.locale.normalize_temporal(cell)?;
        if let Some(format) = &self.date_time_format {
            return NaiveDateTime::parse_from_str(&normalized, format).ok();
        }
        DATE_TIME_PATTERNS
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(&normalized, pattern).ok())
    }

    pub fn parse_time(&self, cell: &str) -> Option<NaiveTime> {
        let normalized = self.locale.normalize_temporal(cell)?;
        if let Some(format) = &self.time_format {
            return NaiveTime::parse_from_str(&normalized, format).ok();
        }
        TIME_PATTERNS
            .iter()
            .find_map(|pattern| NaiveTime::parse_from_str(&normalized, pattern).ok())
    }
}

/// Compact `yyyyMMdd` is parsed by hand: chrono's `%Y` is greedy over
/// adjacent digits.
fn parse_compact_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = text[0..4].parse::<i32>().ok()?;
    let month = text[4..6].parse::<u32>().ok()?;
    let day = text[6..8].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Removes grouping separators, validating that they delimit exact
/// three-digit groups in the integer part. French grouping is a no-break
/// space; plain spaces are accepted as equivalent.
fn strip_grouping(text: &str, locale: Locale) -> Option<String> {
    let grouping = locale.grouping_separator();
    let normalized: String = if grouping == '\u{00A0}' {
        text.chars().map(|c| if c == ' ' { '\u{00A0}' } else { c }).collect()
    } else {
        text.to_string()
    };
    if !normalized.contains(grouping) {
        return Some(normalized);
    }

    let decimal = locale.decimal_separator();
    let (integer_part, rest) = match normalized.find(decimal) {
        Some(at) => (&normalized[..at], &normalized[at..]),
        None => (normalized.as_str(), ""),
    };
    if rest.contains(grouping) {
        return None;
    }

    let unsigned = integer_part
        .strip_prefix('-')
        .or_else(|| integer_part.strip_prefix('+'))
        .unwrap_or(integer_part);
    let groups: Vec<&str> = unsigned.split(grouping).collect();
    let first_ok = !groups[0].is_empty()
        && groups[0].len() <= 3
        && groups[0].bytes().all(|b| b.is_ascii_digit());
    let rest_ok = groups[1..]
        .iter()
        .all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()));
    if !first_ok || !rest_ok {
        return None;
    }

    let sign = if integer_part.len() != unsigned.len() {
        &integer_part[..1]
    } else {
        ""
    };
    Some(format!("{}{}{}", sign, groups.concat(), rest))
}
