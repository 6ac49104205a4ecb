use chrono::NaiveDate;
use encounters_common::{Record, RecordId};
use serde::{Deserialize, Serialize};

use crate::features::shared::validation::{require, RequiredFieldError};

/// JSON body accepted by create and update
///
/// Every field is optional at the wire level so that a missing required field
/// is reported by name instead of as a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    pub id: Option<RecordId>,
    pub subject_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub encounter_date: Option<NaiveDate>,
    pub provider: Option<String>,
    pub encounter_note: Option<String>,
    pub chief_complaint: Option<String>,
    pub provider_identifier: Option<i32>,
}

impl RecordPayload {
    /// Build a record without an id
    ///
    /// `subject_name` is checked before `provider_identifier`. Optional text is
    /// kept exactly as sent.
    pub fn to_candidate(&self) -> Result<Record, RequiredFieldError> {
        let subject_name = require(self.subject_name.clone(), "subject_name")?;
        let provider_identifier = require(self.provider_identifier, "provider_identifier")?;

        Ok(Record::builder(subject_name, provider_identifier)
            .date_of_birth(self.date_of_birth)
            .encounter_date(self.encounter_date)
            .provider(self.provider.clone())
            .encounter_note(self.encounter_note.clone())
            .chief_complaint(self.chief_complaint.clone())
            .build())
    }
}

impl From<Record> for RecordPayload {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            subject_name: Some(record.subject_name),
            date_of_birth: record.date_of_birth,
            encounter_date: record.encounter_date,
            provider: record.provider,
            encounter_note: record.encounter_note,
            chief_complaint: record.chief_complaint,
            provider_identifier: Some(record.provider_identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_checked_in_order() {
        let empty = RecordPayload::default();
        assert_eq!(
            empty.to_candidate(),
            Err(RequiredFieldError::Missing {
                field: "subject_name"
            })
        );

        let named = RecordPayload {
            subject_name: Some("jane".to_string()),
            ..Default::default()
        };
        assert_eq!(
            named.to_candidate(),
            Err(RequiredFieldError::Missing {
                field: "provider_identifier"
            })
        );
    }

    #[test]
    fn test_candidate_drops_id_and_keeps_text_verbatim() {
        let payload = RecordPayload {
            id: Some(12),
            subject_name: Some(String::new()),
            provider: Some("  ".to_string()),
            provider_identifier: Some(4),
            ..Default::default()
        };

        let record = payload.to_candidate().unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.subject_name, "");
        assert_eq!(record.provider.as_deref(), Some("  "));
    }

    #[test]
    fn test_round_trip_from_record() {
        let record = Record::builder("jane", 4)
            .id(Some(3))
            .encounter_date(NaiveDate::from_ymd_opt(2019, 10, 4))
            .build();

        let payload = RecordPayload::from(record.clone());
        assert_eq!(payload.to_candidate().unwrap(), Record { id: None, ..record });
    }
}
