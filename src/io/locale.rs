use serde::{Deserialize, Serialize};

/// The locale a read configuration parses under. Month names, meridiem
/// markers and numeric separators all come from here, so type detection must
/// be re-run per locale: a token that is a valid date in one locale is plain
/// text in another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    English,
    French,
}

const ENGLISH_MONTHS_FULL: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const ENGLISH_MONTHS_ABBREV: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const FRENCH_MONTHS_FULL: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const FRENCH_MONTHS_ABBREV: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// Invariant abbreviations chrono's `%b` understands; localized month tokens
/// are rewritten to these before parsing.
const INVARIANT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    fn months_full(&self) -> &'static [&'static str; 12] {
        match self {
            Locale::English => &ENGLISH_MONTHS_FULL,
            Locale::French => &FRENCH_MONTHS_FULL,
        }
    }

    fn months_abbrev(&self) -> &'static [&'static str; 12] {
        match self {
            Locale::English => &ENGLISH_MONTHS_ABBREV,
            Locale::French => &FRENCH_MONTHS_ABBREV,
        }
    }

    fn meridiems(&self) -> [&'static str; 2] {
        // CLDR keeps the invariant markers for both of these locales
        ["am", "pm"]
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::English => '.',
            Locale::French => ',',
        }
    }

    pub fn grouping_separator(&self) -> char {
        match self {
            Locale::English => ',',
            // CLDR uses a no-break space; plain spaces are normalized to it
            Locale::French => '\u{00A0}',
        }
    }

    /// Rewrites this locale's month names and meridiem markers into the
    /// invariant forms chrono parses, leaving everything else untouched.
    ///
    /// Returns `None` when the text contains an alphabetic word this locale
    /// does not recognize. chrono matches month names case-insensitively
    /// regardless of locale, so an unrecognized word must fail here or a
    /// French configuration would happily read English dates.
    pub fn normalize_temporal(&self, text: &str) -> Option<String> {
        const MONTH_MARK: char = '\u{1}';
        const AM_MARK: char = '\u{2}';
        const PM_MARK: char = '\u{3}';

        let mut chars: Vec<char> = text.trim().chars().collect();
        let mut month = 0;

        // Full names before abbreviations so "november" is not matched as
        // "nov" plus a stray "ember"; within each list longest first so
        // "juil." wins over "juin" prefixes. Matches become placeholder
        // marks so the residual check below cannot mistake the inserted
        // invariant token for input text.
        'month: for months in [self.months_full(), self.months_abbrev()] {
            let mut candidates: Vec<(usize, &str)> = months.iter().copied().enumerate().collect();
            candidates.sort_by_key(|(_, name)| std::cmp::Reverse(name.chars().count()));
            for (month_index, name) in candidates {
                if let Some(at) = find_ignore_case(&chars, name) {
                    chars.splice(at..at + name.chars().count(), [MONTH_MARK]);
                    month = month_index;
                    break 'month;
                }
            }
        }

        let [am, pm] = self.meridiems();
        for (marker, mark) in [(am, AM_MARK), (pm, PM_MARK)] {
            if let Some(at) = find_word_ignore_case(&chars, marker) {
                chars.splice(at..at + marker.chars().count(), [mark]);
                break;
            }
        }

        // Any alphabetic word still standing was never a token of this
        // locale; the ISO-8601 'T' separator is the one exception.
        let marked: String = chars.iter().collect();
        if alphabetic_words(&marked)
            .iter()
            .any(|w| !w.eq_ignore_ascii_case("t"))
        {
            return None;
        }

        let mut normalized = String::with_capacity(marked.len() + 8);
        for c in marked.chars() {
            match c {
                MONTH_MARK => normalized.push_str(INVARIANT_MONTHS[month]),
                AM_MARK => normalized.push_str("AM"),
                PM_MARK => normalized.push_str("PM"),
                _ => normalized.push(c),
            }
        }
        Some(normalized)
    }
}

fn chars_eq_ignore_case(left: char, right: char) -> bool {
    left == right || left.to_lowercase().eq(right.to_lowercase())
}

/// Case-insensitive substring search over chars; returns the char index.
fn find_ignore_case(haystack: &[char], needle: &str) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&at| {
        haystack[at..at + needle.len()]
            .iter()
            .zip(&needle)
            .all(|(&h, &n)| chars_eq_ignore_case(h, n))
    })
}

/// Like `find_ignore_case` but only where the match stands alone, so the
/// "am" in "samedi" is not a meridiem marker.
fn find_word_ignore_case(haystack: &[char], needle: &str) -> Option<usize> {
    let needle_len = needle.chars().count();
    let mut from = 0;
    while let Some(offset) = find_ignore_case(&haystack[from..], needle) {
        let at = from + offset;
        let before_ok = at == 0 || !haystack[at - 1].is_alphanumeric();
        let after = at + needle_len;
        let after_ok = after >= haystack.len() || !haystack[after].is_alphanumeric();
        if before_ok && after_ok {
            return Some(at);
        }
        from = at + needle_len;
    }
    None
}

fn alphabetic_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect()
}
