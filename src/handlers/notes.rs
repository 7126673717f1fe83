use axum::{
    extract::{Path, State},
    response::Json,
};
use validator::Validate;

use crate::{
    models::note::{CreateNoteRequest, Note},
    utils::{errors::AppError, response::ApiResponse},
    AppState,
};

pub async fn list_for_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Note>>>, AppError> {
    let notes = sqlx::query_as::<_, Note>(
        "SELECT * FROM notes WHERE interview_id = $1 ORDER BY created_at ASC",
    )
    .bind(interview_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ApiResponse::new(notes, "Notes fetched successfully")))
}

/// Append a note to an interview. The owning candidate is derived from the
/// interview, never taken from the caller.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateNoteRequest>,
) -> Result<Json<ApiResponse<Note>>, AppError> {
    payload.validate()?;

    let candidate_id = sqlx::query_scalar::<_, i32>(
        "SELECT candidate_id FROM interviews WHERE id = $1",
    )
    .bind(payload.interview_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))?;

    let note = sqlx::query_as::<_, Note>(
        r#"
        INSERT INTO notes (interview_id, candidate_id, note_text)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(payload.interview_id)
    .bind(candidate_id)
    .bind(&payload.note_text)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(ApiResponse::new(note, "Note added successfully")))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let result = sqlx::query("DELETE FROM notes WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Note not found".to_string()));
    }

    Ok(Json(ApiResponse::new(
        serde_json::json!({ "id": id }),
        "Note deleted successfully",
    )))
}
