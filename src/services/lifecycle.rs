use std::time::Instant;

use chrono::NaiveDateTime;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::interview::{Interview, InterviewRound, InterviewStatus, InterviewType};
use crate::utils::logger::LOGGER;

/// What a requested status change requires before it may commit.
///
/// The status dropdown lets any status be picked from any other; there is
/// no transition matrix. The one special case is `Rescheduled`, which must
/// not be persisted until the reschedule dialog has collected a new date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPlan {
    /// Issue a single update changing only `status`.
    SetStatus(InterviewStatus),
    /// Defer persistence; the caller must run the reschedule workflow.
    CollectNewDate,
}

pub fn plan_transition(target: InterviewStatus) -> TransitionPlan {
    match target {
        InterviewStatus::Rescheduled => TransitionPlan::CollectNewDate,
        other => TransitionPlan::SetStatus(other),
    }
}

/// Fields of the superseding record created by the reschedule workflow:
/// everything except the date is carried over from the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupersedingInterview {
    pub candidate_id: i32,
    pub interview_date: NaiveDateTime,
    pub interview_type: InterviewType,
    pub round: InterviewRound,
    pub location: String,
    pub created_by: i32,
}

pub fn supersede(
    original: &Interview,
    new_date: NaiveDateTime,
    created_by: i32,
) -> SupersedingInterview {
    SupersedingInterview {
        candidate_id: original.candidate_id,
        interview_date: new_date,
        interview_type: original.interview_type,
        round: original.round,
        location: original.location.clone(),
        created_by,
    }
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Interview not found")]
    InterviewNotFound,
    #[error("Rescheduling requires a new interview date; use the reschedule action")]
    RescheduleRequiresDate,
    #[error("Database error occurred")]
    Database(#[from] sqlx::Error),
}

impl From<LifecycleError> for crate::utils::errors::AppError {
    fn from(err: LifecycleError) -> Self {
        use crate::utils::errors::AppError;
        match err {
            LifecycleError::InterviewNotFound => AppError::NotFound(err.to_string()),
            LifecycleError::RescheduleRequiresDate => AppError::Conflict(err.to_string()),
            LifecycleError::Database(db_err) => AppError::from(db_err),
        }
    }
}

/// HTTP-backed half of the lifecycle: applies the plans decided above
/// against the interviews table.
#[derive(Debug)]
pub struct InterviewLifecycle {
    pool: PgPool,
}

impl InterviewLifecycle {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply a direct status change. Only `status` is touched; the slot
    /// date, type, round and location stay as they are.
    pub async fn set_status(
        &self,
        interview_id: i32,
        target: InterviewStatus,
    ) -> Result<Interview, LifecycleError> {
        let query = r#"
            UPDATE interviews
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
        "#;

        match plan_transition(target) {
            TransitionPlan::CollectNewDate => Err(LifecycleError::RescheduleRequiresDate),
            TransitionPlan::SetStatus(status) => {
                let start = Instant::now();
                let interview = sqlx::query_as::<_, Interview>(query)
                    .bind(status)
                    .bind(interview_id)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or(LifecycleError::InterviewNotFound)?;
                LOGGER.log_database_query(query, start.elapsed().as_millis(), Some(1));

                LOGGER.log_business_event(
                    "interview_status_changed",
                    Some(interview.created_by),
                    [
                        (
                            "interview_id".to_string(),
                            serde_json::Value::from(interview.id),
                        ),
                        (
                            "status".to_string(),
                            serde_json::to_value(status).unwrap_or_default(),
                        ),
                    ]
                    .into_iter()
                    .collect(),
                );

                Ok(interview)
            }
        }
    }

    /// Reschedule workflow: history is preserved via superseding records.
    ///
    /// Two facts are written in one transaction: a new interview in
    /// `created` state carrying the original's type, round and location
    /// with the newly collected date, and the original marked
    /// `rescheduled`. Either both commit or neither does.
    pub async fn reschedule(
        &self,
        interview_id: i32,
        new_date: NaiveDateTime,
        created_by: i32,
    ) -> Result<Interview, LifecycleError> {
        let mut tx = self.pool.begin().await?;

        let original = sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
            .bind(interview_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(LifecycleError::InterviewNotFound)?;

        let replacement = supersede(&original, new_date, created_by);

        let insert_query = r#"
            INSERT INTO interviews
                (candidate_id, interview_date, interview_type, round, location, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        "#;

        let start = Instant::now();
        let created = sqlx::query_as::<_, Interview>(insert_query)
            .bind(replacement.candidate_id)
            .bind(replacement.interview_date)
            .bind(replacement.interview_type)
            .bind(replacement.round)
            .bind(&replacement.location)
            .bind(InterviewStatus::Created)
            .bind(replacement.created_by)
            .fetch_one(&mut *tx)
            .await?;
        LOGGER.log_database_query(insert_query, start.elapsed().as_millis(), Some(1));

        sqlx::query("UPDATE interviews SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(InterviewStatus::Rescheduled)
            .bind(original.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        LOGGER.log_business_event(
            "interview_rescheduled",
            Some(created_by),
            [
                (
                    "superseded_interview_id".to_string(),
                    serde_json::Value::from(original.id),
                ),
                (
                    "new_interview_id".to_string(),
                    serde_json::Value::from(created.id),
                ),
            ]
            .into_iter()
            .collect(),
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn sample_interview() -> Interview {
        Interview {
            id: 11,
            candidate_id: 3,
            interview_date: "2024-04-20T14:30:00".parse().unwrap(),
            interview_type: InterviewType::Online,
            round: InterviewRound::HrRound,
            location: "Zoom A".to_string(),
            status: InterviewStatus::Created,
            created_by: 1,
            created_at: DateTime::<Utc>::MIN_UTC,
            updated_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn completed_and_rejected_are_direct_updates() {
        assert_eq!(
            plan_transition(InterviewStatus::Completed),
            TransitionPlan::SetStatus(InterviewStatus::Completed)
        );
        assert_eq!(
            plan_transition(InterviewStatus::Rejected),
            TransitionPlan::SetStatus(InterviewStatus::Rejected)
        );
    }

    #[test]
    fn created_can_be_reselected_directly() {
        // The dropdown is a permissive trigger map: setting an interview
        // back to created is allowed from anywhere.
        assert_eq!(
            plan_transition(InterviewStatus::Created),
            TransitionPlan::SetStatus(InterviewStatus::Created)
        );
    }

    #[test]
    fn rescheduled_never_updates_directly() {
        assert_eq!(
            plan_transition(InterviewStatus::Rescheduled),
            TransitionPlan::CollectNewDate
        );
    }

    #[test]
    fn reschedule_guard_surfaces_as_conflict() {
        use crate::utils::errors::AppError;

        // The status endpoint answers 409 when asked for `rescheduled`
        // directly; the caller is pointed at the reschedule action.
        let err = AppError::from(LifecycleError::RescheduleRequiresDate);
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn superseding_record_carries_slot_details() {
        let original = sample_interview();
        let new_date: NaiveDateTime = "2024-05-01T10:00:00".parse().unwrap();

        let replacement = supersede(&original, new_date, 7);

        assert_eq!(replacement.candidate_id, original.candidate_id);
        assert_eq!(replacement.interview_type, original.interview_type);
        assert_eq!(replacement.round, original.round);
        assert_eq!(replacement.location, original.location);
        assert_eq!(replacement.interview_date, new_date);
        assert_eq!(replacement.created_by, 7);
    }

    #[test]
    fn superseding_record_does_not_reuse_original_date() {
        let original = sample_interview();
        let new_date: NaiveDateTime = "2024-05-01T10:00:00".parse().unwrap();

        let replacement = supersede(&original, new_date, 1);
        assert_ne!(replacement.interview_date, original.interview_date);
    }
}
