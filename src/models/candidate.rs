use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub technology_id: i32,
    pub job_type: JobType,
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Wfh,
    Office,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits_only = regex::Regex::new(r"^[0-9]{10}$").expect("valid phone pattern");
    if digits_only.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_number");
        err.message = Some("Phone number must be exactly 10 digits".into());
        Err(err)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCandidateRequest {
    #[validate(length(min = 1, message = "First Name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last Name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom = "validate_phone")]
    pub phone_number: String,
    pub technology_id: i32,
    pub job_type: JobType,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCandidateRequest {
    #[validate(length(min = 1, message = "First Name is required"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last Name is required"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone_number: Option<String>,
    pub technology_id: Option<i32>,
    pub job_type: Option<JobType>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Paginated list payload for the candidate screen: the table needs the
/// total to render page buttons, not just the current slice.
#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateWithTechnology>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// Candidate row joined with its technology name, saving the console the
/// second lookup it used to do per row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CandidateWithTechnology {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub technology_id: i32,
    pub technology_name: String,
    pub job_type: JobType,
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_payload() -> CreateCandidateRequest {
        CreateCandidateRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            technology_id: 1,
            job_type: JobType::Office,
        }
    }

    #[test]
    fn valid_candidate_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn phone_with_letters_is_rejected() {
        let mut payload = valid_payload();
        payload.phone_number = "98765abc10".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn short_phone_is_rejected() {
        let mut payload = valid_payload();
        payload.phone_number = "12345".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn job_type_uses_lowercase_wire_values() {
        assert_eq!(
            serde_json::to_value(JobType::Wfh).unwrap(),
            serde_json::json!("wfh")
        );
        let parsed: JobType = serde_json::from_value(serde_json::json!("office")).unwrap();
        assert_eq!(parsed, JobType::Office);
    }
}
