use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

pub const MAX_NAME_CHARS: usize = 120;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const MAX_TONE_CHARS: usize = 200;

/// Suggested tones of voice offered to clients. Any non-empty tone is accepted.
pub const TONE_PRESETS: [&str; 5] = [
    "Formal",
    "Informal",
    "Inspiring and motivational",
    "Fun and light-hearted",
    "Professional and technical",
];

/// A row of the `personas` table. Timestamps are unix milliseconds.
#[derive(Debug, Clone, FromRow)]
pub struct PersonaRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub tone_of_voice: String,
    pub session_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Persona as returned by the API. The owning session is never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub tone_of_voice: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PersonaRow> for Persona {
    fn from(row: PersonaRow) -> Self {
        Persona {
            id: row.id,
            name: row.name,
            description: row.description,
            tone_of_voice: row.tone_of_voice,
            created_at: DateTime::from_timestamp_millis(row.created_at).unwrap_or_default(),
            updated_at: DateTime::from_timestamp_millis(row.updated_at).unwrap_or_default(),
        }
    }
}

/// The user-editable part of a persona: request body for create/update and
/// the input to prompt construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaInput {
    pub name: String,
    pub description: String,
    pub tone_of_voice: String,
}

impl PersonaInput {
    /// Trims every field and checks it is present and within length limits.
    pub fn validated(self) -> Result<Self, AppError> {
        Ok(PersonaInput {
            name: check_field("name", &self.name, MAX_NAME_CHARS)?,
            description: check_field("description", &self.description, MAX_DESCRIPTION_CHARS)?,
            tone_of_voice: check_field("tone_of_voice", &self.tone_of_voice, MAX_TONE_CHARS)?,
        })
    }
}

impl From<PersonaRow> for PersonaInput {
    fn from(row: PersonaRow) -> Self {
        PersonaInput {
            name: row.name,
            description: row.description,
            tone_of_voice: row.tone_of_voice,
        }
    }
}

/// Returns the trimmed value of a required text field.
pub fn check_field(field: &str, value: &str, max_chars: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, description: &str, tone: &str) -> PersonaInput {
        PersonaInput {
            name: name.to_string(),
            description: description.to_string(),
            tone_of_voice: tone.to_string(),
        }
    }

    #[test]
    fn test_validated_trims_fields() {
        let persona = input("  Dental Clinic ", "\tClinic in Fortaleza\n", " Informal ")
            .validated()
            .unwrap();
        assert_eq!(persona, input("Dental Clinic", "Clinic in Fortaleza", "Informal"));
    }

    #[test]
    fn test_validated_rejects_blank_fields() {
        let err = input("Pet Shop", "   ", "Formal").validated().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("description")));
    }

    #[test]
    fn test_validated_rejects_overlong_name() {
        let long_name = "a".repeat(MAX_NAME_CHARS + 1);
        assert!(input(&long_name, "desc", "Formal").validated().is_err());
    }

    #[test]
    fn test_length_limit_counts_chars_not_bytes() {
        let accented = "ç".repeat(MAX_NAME_CHARS);
        assert!(input(&accented, "Clínica odontológica", "Divertido").validated().is_ok());
    }

    #[test]
    fn test_row_converts_to_api_view_with_timestamps() {
        let row = PersonaRow {
            id: 7,
            name: "Clothing Store".to_string(),
            description: "Streetwear shop".to_string(),
            tone_of_voice: "Fun and light-hearted".to_string(),
            session_id: "abc".to_string(),
            created_at: 1_700_000_000_000,
            updated_at: 1_700_000_060_000,
        };
        let persona = Persona::from(row);
        assert_eq!(persona.id, 7);
        assert_eq!(persona.created_at.timestamp(), 1_700_000_000);
        assert_eq!(persona.updated_at.timestamp(), 1_700_000_060);
    }
}
