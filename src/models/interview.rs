use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::candidate::JobType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interview {
    pub id: i32,
    pub candidate_id: i32,
    pub interview_date: NaiveDateTime,
    pub interview_type: InterviewType,
    pub round: InterviewRound,
    pub location: String,
    pub status: InterviewStatus,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Online,
    Offline,
}

/// The interview stage. "Reschedule" used to appear as a selectable round
/// in one console variant; rescheduling is a status concern, not a round,
/// so it is not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_round", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InterviewRound {
    TechnicalInterview,
    PracticalInterview,
    HrRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interview_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Created,
    Rescheduled,
    Completed,
    Rejected,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInterviewRequest {
    pub candidate_id: i32,
    pub interview_date: NaiveDateTime,
    pub interview_type: InterviewType,
    pub round: InterviewRound,
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInterviewRequest {
    pub interview_date: Option<NaiveDateTime>,
    pub interview_type: Option<InterviewType>,
    pub round: Option<InterviewRound>,
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: Option<String>,
    pub status: Option<InterviewStatus>,
}

/// Body of the status-change action: the only field the status dropdown
/// sends. Everything else on the record stays untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: InterviewStatus,
}

/// Body of the reschedule dialog: a single required date. Type, round and
/// location are carried over from the interview being rescheduled.
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub interview_date: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct InterviewListQuery {
    pub filter: Option<InterviewListFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewListFilter {
    Today,
    Upcoming,
}

/// Dashboard row: interview joined with candidate identity and technology,
/// so the schedule table renders without per-row lookups.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InterviewWithCandidate {
    pub id: i32,
    pub candidate_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub technology_name: String,
    pub job_type: JobType,
    pub interview_date: NaiveDateTime,
    pub interview_type: InterviewType,
    pub round: InterviewRound,
    pub location: String,
    pub status: InterviewStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn status_uses_lowercase_wire_values() {
        assert_eq!(
            serde_json::to_value(InterviewStatus::Rescheduled).unwrap(),
            serde_json::json!("rescheduled")
        );
        let parsed: InterviewStatus =
            serde_json::from_value(serde_json::json!("completed")).unwrap();
        assert_eq!(parsed, InterviewStatus::Completed);
    }

    #[test]
    fn round_uses_snake_case_wire_values() {
        assert_eq!(
            serde_json::to_value(InterviewRound::HrRound).unwrap(),
            serde_json::json!("hr_round")
        );
        let parsed: InterviewRound =
            serde_json::from_value(serde_json::json!("technical_interview")).unwrap();
        assert_eq!(parsed, InterviewRound::TechnicalInterview);
    }

    #[test]
    fn empty_location_is_rejected() {
        let payload = CreateInterviewRequest {
            candidate_id: 1,
            interview_date: "2024-05-01T10:00:00".parse().unwrap(),
            interview_type: InterviewType::Online,
            round: InterviewRound::HrRound,
            location: String::new(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn status_request_parses_dropdown_body() {
        let body: UpdateStatusRequest =
            serde_json::from_str(r#"{"status": "rejected"}"#).unwrap();
        assert_eq!(body.status, InterviewStatus::Rejected);
    }
}
