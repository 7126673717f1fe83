use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Free-text note attached to an interview. Notes are append-only: they
/// are created and listed, optionally deleted, never edited.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: i32,
    pub interview_id: i32,
    pub candidate_id: i32,
    pub note_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    pub interview_id: i32,
    #[validate(length(min = 1, message = "Note text is required"))]
    pub note_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn empty_note_text_is_rejected() {
        let payload = CreateNoteRequest {
            interview_id: 1,
            note_text: String::new(),
        };
        assert!(payload.validate().is_err());
    }
}
