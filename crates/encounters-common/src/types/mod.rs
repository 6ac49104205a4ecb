//! Encounter record types shared across the workspace

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned surrogate key of a persisted record
pub type RecordId = i32;

/// A clinical encounter record
///
/// A record with `id` set denotes a persisted row; one without is a candidate
/// that has not been stored yet. Optional text fields are `None` when no value
/// was supplied, never an empty-string sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: Option<RecordId>,
    pub subject_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub encounter_date: Option<NaiveDate>,
    pub provider: Option<String>,
    pub encounter_note: Option<String>,
    pub chief_complaint: Option<String>,
    pub provider_identifier: i32,
}

impl Record {
    /// Start building a record from its two required fields
    pub fn builder(subject_name: impl Into<String>, provider_identifier: i32) -> RecordBuilder {
        RecordBuilder {
            record: Record {
                id: None,
                subject_name: subject_name.into(),
                date_of_birth: None,
                encounter_date: None,
                provider: None,
                encounter_note: None,
                chief_complaint: None,
                provider_identifier,
            },
        }
    }

    /// Whether the record has been assigned an id by the store
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Copy of this record carrying the given store id
    pub fn with_id(&self, id: RecordId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }
}

/// Builder for [`Record`]
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn id(mut self, id: Option<RecordId>) -> Self {
        self.record.id = id;
        self
    }

    pub fn date_of_birth(mut self, date: Option<NaiveDate>) -> Self {
        self.record.date_of_birth = date;
        self
    }

    pub fn encounter_date(mut self, date: Option<NaiveDate>) -> Self {
        self.record.encounter_date = date;
        self
    }

    pub fn provider(mut self, provider: Option<String>) -> Self {
        self.record.provider = provider;
        self
    }

    pub fn encounter_note(mut self, note: Option<String>) -> Self {
        self.record.encounter_note = note;
        self
    }

    pub fn chief_complaint(mut self, complaint: Option<String>) -> Self {
        self.record.chief_complaint = complaint;
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_optional_fields_to_none() {
        let record = Record::builder("jane doe", 42).build();

        assert_eq!(record.subject_name, "jane doe");
        assert_eq!(record.provider_identifier, 42);
        assert!(record.id.is_none());
        assert!(record.date_of_birth.is_none());
        assert!(record.encounter_date.is_none());
        assert!(record.provider.is_none());
        assert!(record.encounter_note.is_none());
        assert!(record.chief_complaint.is_none());
        assert!(!record.is_persisted());
    }

    #[test]
    fn test_with_id_leaves_original_untouched() {
        let candidate = Record::builder("jane doe", 42)
            .chief_complaint(Some("cough".to_string()))
            .build();
        let stored = candidate.with_id(7);

        assert_eq!(stored.id, Some(7));
        assert!(stored.is_persisted());
        assert_eq!(stored.chief_complaint.as_deref(), Some("cough"));
        assert!(candidate.id.is_none());
    }

    #[test]
    fn test_json_shape() {
        let record = Record::builder("john smith", 5)
            .id(Some(1))
            .date_of_birth(NaiveDate::from_ymd_opt(1940, 1, 9))
            .build();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["subject_name"], "john smith");
        assert_eq!(value["date_of_birth"], "1940-01-09");
        assert!(value["encounter_date"].is_null());
        assert!(value["provider"].is_null());
        assert_eq!(value["provider_identifier"], 5);
    }
}
