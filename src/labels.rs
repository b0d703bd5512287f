use chrono::{Locale, NaiveDate};

pub const DEFAULT_LOCALE: Locale = Locale::fr_FR;

const ELLIPSIS: &str = "...";

/// Keeps the first `max` characters and marks the cut with an ellipsis.
/// Counts chars, not bytes, so accented company names never split mid-codepoint.
pub fn truncate_label(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
        None => s.to_string(),
    }
}

/// Short axis label for a day bucket: day number and abbreviated month ("2 janv.").
pub fn day_label(date: NaiveDate, locale: Locale) -> String {
    date.format_localized("%-d %b", locale).to_string()
}

/// Accepts POSIX-style names such as `fr_FR` or `en_US`.
pub fn parse_locale(name: &str) -> Option<Locale> {
    Locale::try_from(name.trim()).ok()
}
