use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
};
use validator::Validate;

use crate::{
    middleware::auth::AuthUser,
    models::interview::{
        CreateInterviewRequest, Interview, InterviewListFilter, InterviewListQuery,
        InterviewStatus, InterviewWithCandidate, RescheduleRequest, UpdateInterviewRequest,
        UpdateStatusRequest,
    },
    services::lifecycle::InterviewLifecycle,
    utils::{errors::AppError, logger::LOGGER, response::ApiResponse},
    AppState,
};

/// All interviews for one candidate, newest slot first. The console calls
/// this again after every successful write so its table mirrors the server.
pub async fn list_for_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Interview>>>, AppError> {
    let interviews = sqlx::query_as::<_, Interview>(
        "SELECT * FROM interviews WHERE candidate_id = $1 ORDER BY interview_date DESC",
    )
    .bind(candidate_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ApiResponse::new(
        interviews,
        "Interviews fetched successfully",
    )))
}

/// Dashboard schedule: interviews joined with candidate and technology,
/// optionally narrowed to today's or upcoming slots.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<InterviewListQuery>,
) -> Result<Json<ApiResponse<Vec<InterviewWithCandidate>>>, AppError> {
    let base = r#"
        SELECT i.id, i.candidate_id, c.first_name, c.last_name,
               t.technology_name, c.job_type, i.interview_date,
               i.interview_type, i.round, i.location, i.status
        FROM interviews i
        JOIN candidates c ON i.candidate_id = c.id
        JOIN technologies t ON c.technology_id = t.id
    "#;

    let query_str = match query.filter {
        Some(InterviewListFilter::Today) => format!(
            "{} WHERE i.interview_date::date = CURRENT_DATE ORDER BY i.interview_date ASC",
            base
        ),
        Some(InterviewListFilter::Upcoming) => format!(
            "{} WHERE i.interview_date > NOW() ORDER BY i.interview_date ASC",
            base
        ),
        None => format!("{} ORDER BY i.interview_date DESC", base),
    };

    let interviews = sqlx::query_as::<_, InterviewWithCandidate>(&query_str)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(ApiResponse::new(
        interviews,
        "Interviews fetched successfully",
    )))
}

/// Schedule a new interview. The creator is taken from the request session,
/// not from the body.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<CreateInterviewRequest>,
) -> Result<Json<ApiResponse<Interview>>, AppError> {
    payload.validate()?;

    let interview = sqlx::query_as::<_, Interview>(
        r#"
        INSERT INTO interviews
            (candidate_id, interview_date, interview_type, round, location, status, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(payload.candidate_id)
    .bind(payload.interview_date)
    .bind(payload.interview_type)
    .bind(payload.round)
    .bind(&payload.location)
    .bind(InterviewStatus::Created)
    .bind(auth_user.user_id)
    .fetch_one(&state.db)
    .await?;

    LOGGER.log_business_event(
        "interview_scheduled",
        Some(auth_user.user_id),
        [(
            "interview_id".to_string(),
            serde_json::Value::from(interview.id),
        )]
        .into_iter()
        .collect(),
    );

    Ok(Json(ApiResponse::new(
        interview,
        "Interview scheduled successfully",
    )))
}

/// Edit the mutable slot details. Any subset of date, type, round,
/// location and status may be supplied; omitted fields keep their value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInterviewRequest>,
) -> Result<Json<ApiResponse<Interview>>, AppError> {
    payload.validate()?;

    let interview = sqlx::query_as::<_, Interview>(
        r#"
        UPDATE interviews
        SET interview_date = COALESCE($1, interview_date),
            interview_type = COALESCE($2, interview_type),
            round = COALESCE($3, round),
            location = COALESCE($4, location),
            status = COALESCE($5, status),
            updated_at = NOW()
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(payload.interview_date)
    .bind(payload.interview_type)
    .bind(payload.round)
    .bind(&payload.location)
    .bind(payload.status)
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        interview,
        "Interview updated successfully",
    )))
}

/// Status dropdown action. Direct targets update `status` and nothing
/// else; a `rescheduled` target is refused here and must go through the
/// reschedule workflow, which supplies the new date.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<Interview>>, AppError> {
    LOGGER.log_request("PUT", "/interview/status", Some(auth_user.user_id), 200);

    let lifecycle = InterviewLifecycle::new(state.db.clone());
    let interview = lifecycle.set_status(id, payload.status).await?;

    Ok(Json(ApiResponse::new(
        interview,
        "Interview status updated successfully",
    )))
}

/// Reschedule workflow: creates the superseding interview and marks the
/// original `rescheduled`. Returns the new record.
pub async fn reschedule(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<ApiResponse<Interview>>, AppError> {
    LOGGER.log_request("POST", "/interview/reschedule", Some(auth_user.user_id), 200);

    let lifecycle = InterviewLifecycle::new(state.db.clone());
    let interview = lifecycle
        .reschedule(id, payload.interview_date, auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::new(
        interview,
        "Interview rescheduled successfully",
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Interview not found".to_string()));
    }

    Ok(Json(ApiResponse::new(
        serde_json::json!({ "id": id }),
        "Interview deleted successfully",
    )))
}
