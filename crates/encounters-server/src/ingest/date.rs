//! Multi-format date resolution
//!
//! Source files mix several date layouts. Each candidate layout is tried in a
//! fixed order and must consume the whole value; the first strict match wins.

use chrono::{Datelike, NaiveDate};

/// A date layout accepted in delimited input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    /// chrono format string
    pub pattern: &'static str,
    /// Sample value, used in log output
    pub example: &'static str,
}

/// Accepted layouts in priority order
///
/// The numeric layouts overlap on some inputs, so earlier entries take
/// precedence.
pub const KNOWN_DATE_FORMATS: [DateFormat; 4] = [
    DateFormat {
        pattern: "%B %d, %Y",
        example: "August 5, 1959",
    },
    DateFormat {
        pattern: "%d %B %Y",
        example: "5 June 1950",
    },
    DateFormat {
        pattern: "%m/%d/%Y",
        example: "10/5/1948",
    },
    DateFormat {
        pattern: "%Y/%m/%d",
        example: "1955/08/03",
    },
];

/// Resolve free-form text to a calendar date
///
/// Returns `None` for absent, blank or unrecognised input. Years must have
/// four digits.
pub fn resolve(text: Option<&str>) -> Option<NaiveDate> {
    let text = text?;
    if text.trim().is_empty() {
        return None;
    }

    for format in &KNOWN_DATE_FORMATS {
        match parse_strict(text, format) {
            Some(date) => return Some(date),
            None => tracing::debug!(
                value = text,
                format = format.example,
                "Date does not match format, trying next"
            ),
        }
    }

    tracing::warn!(value = text, "Unknown date format");
    None
}

fn parse_strict(text: &str, format: &DateFormat) -> Option<NaiveDate> {
    if !is_plain(text) {
        return None;
    }

    NaiveDate::parse_from_str(text, format.pattern)
        .ok()
        .filter(|date| (1000..=9999).contains(&date.year()))
}

/// chrono skips whitespace before numeric fields and accepts signed years.
/// None of the known layouts allow either, so reject them up front.
fn is_plain(text: &str) -> bool {
    let numeric = text.contains('/');
    !text.starts_with(char::is_whitespace)
        && !text.contains(['+', '-'])
        && !text.contains("  ")
        && !(numeric && text.contains(char::is_whitespace))
}
