use axum::{
    extract::{Path, State},
    response::Json,
};
use validator::Validate;

use crate::{
    models::technology::{CreateTechnologyRequest, Technology, UpdateTechnologyRequest},
    utils::{errors::AppError, response::ApiResponse},
    AppState,
};

pub async fn read_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Technology>>>, AppError> {
    let technologies = sqlx::query_as::<_, Technology>(
        "SELECT * FROM technologies ORDER BY technology_name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ApiResponse::new(
        technologies,
        "Technologies fetched successfully",
    )))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Technology>>, AppError> {
    let technology = sqlx::query_as::<_, Technology>("SELECT * FROM technologies WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Technology not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        technology,
        "Technology fetched successfully",
    )))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateTechnologyRequest>,
) -> Result<Json<ApiResponse<Technology>>, AppError> {
    payload.validate()?;

    let technology = sqlx::query_as::<_, Technology>(
        r#"
        INSERT INTO technologies (technology_name)
        VALUES ($1)
        RETURNING *
        "#,
    )
    .bind(&payload.technology_name)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match AppError::from(e) {
        AppError::Conflict(_) => AppError::Conflict("Technology already exists".to_string()),
        other => other,
    })?;

    Ok(Json(ApiResponse::new(
        technology,
        "Technology added successfully",
    )))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTechnologyRequest>,
) -> Result<Json<ApiResponse<Technology>>, AppError> {
    payload.validate()?;

    let technology = sqlx::query_as::<_, Technology>(
        r#"
        UPDATE technologies
        SET technology_name = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(&payload.technology_name)
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Technology not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        technology,
        "Technology updated successfully",
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let result = sqlx::query("DELETE FROM technologies WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Technology not found".to_string()));
    }

    Ok(Json(ApiResponse::new(
        serde_json::json!({ "id": id }),
        "Technology deleted successfully",
    )))
}
