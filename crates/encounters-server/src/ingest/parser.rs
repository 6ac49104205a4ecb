//! Delimited line parser
//!
//! Each data line carries seven `;`-separated fields:
//!
//! ```text
//! subject_name;date_of_birth;encounter_date;provider;encounter_note;chief_complaint;provider_identifier
//! ```
//!
//! Malformed lines are reported as a [`SkipReason`] rather than an error so
//! one bad line never aborts a batch.

use encounters_common::Record;
use thiserror::Error;

use super::date;

/// Field separator
pub const FIELD_DELIMITER: char = ';';

/// Number of fields on a data line
pub const FIELD_COUNT: usize = 7;

/// Outcome of parsing one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Record(Record),
    Skip(SkipReason),
}

/// Why a line produced no record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no line supplied")]
    Missing,

    #[error("expected {} fields, found {found}", FIELD_COUNT)]
    FieldCount { found: usize },

    #[error("provider identifier '{value}' is not an integer")]
    ProviderIdentifier { value: String },
}

/// Converts delimited lines into candidate [`Record`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser;

impl RecordParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line
    ///
    /// Fields are taken verbatim, except that empty or whitespace-only optional
    /// fields become `None`. Dates go through [`date::resolve`]; an
    /// unrecognised date leaves the field empty without skipping the line. The
    /// provider identifier is mandatory.
    pub fn parse(&self, line: Option<&str>) -> ParsedLine {
        let Some(line) = line else {
            return ParsedLine::Skip(SkipReason::Missing);
        };

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        let [subject_name, date_of_birth, encounter_date, provider, encounter_note, chief_complaint, provider_identifier] =
            fields.as_slice()
        else {
            return ParsedLine::Skip(SkipReason::FieldCount {
                found: fields.len(),
            });
        };

        let Ok(provider_identifier) = provider_identifier.parse::<i32>() else {
            return ParsedLine::Skip(SkipReason::ProviderIdentifier {
                value: provider_identifier.to_string(),
            });
        };

        let record = Record::builder(*subject_name, provider_identifier)
            .date_of_birth(date::resolve(Some(*date_of_birth)))
            .encounter_date(date::resolve(Some(*encounter_date)))
            .provider(non_blank(provider))
            .encounter_note(non_blank(encounter_note))
            .chief_complaint(non_blank(chief_complaint))
            .build();

        ParsedLine::Record(record)
    }
}

fn non_blank(field: &str) -> Option<String> {
    (!field.trim().is_empty()).then(|| field.to_string())
}
