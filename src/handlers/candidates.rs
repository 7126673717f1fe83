use axum::{
    extract::{Multipart, Path, Query, State},
    response::Json,
};
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::candidate::{
        Candidate, CandidateListQuery, CandidateListResponse, CandidateWithTechnology,
        CreateCandidateRequest, UpdateCandidateRequest,
    },
    utils::{errors::AppError, response::ApiResponse},
    AppState,
};

const MAX_RESUME_SIZE: usize = 5 * 1024 * 1024; // 5MB
const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// Clamp the raw query paging values into (page, limit, offset). The page
/// is caller-supplied, so the offset multiply must not overflow.
fn normalize_paging(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit, (page - 1).saturating_mul(limit))
}

fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

fn validate_resume_type(filename: &str) -> Result<&'static str, AppError> {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| AppError::BadRequest("Resume file has no extension".to_string()))?;

    match extension.as_str() {
        "pdf" => Ok("pdf"),
        "doc" => Ok("doc"),
        "docx" => Ok("docx"),
        _ => Err(AppError::UnsupportedMediaType(
            "Resume must be a PDF or Word document".to_string(),
        )),
    }
}

pub async fn read_all(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<Json<ApiResponse<CandidateListResponse>>, AppError> {
    let (page, limit, offset) = normalize_paging(query.page, query.limit);
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s));

    let candidates = sqlx::query_as::<_, CandidateWithTechnology>(
        r#"
        SELECT c.id, c.first_name, c.last_name, c.email, c.phone_number,
               c.technology_id, t.technology_name, c.job_type, c.resume,
               c.created_at, c.updated_at
        FROM candidates c
        JOIN technologies t ON c.technology_id = t.id
        WHERE $1::text IS NULL
           OR c.first_name ILIKE $1
           OR c.last_name ILIKE $1
           OR c.email ILIKE $1
           OR t.technology_name ILIKE $1
        ORDER BY c.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(&search)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.db)
    .await?;

    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM candidates c
        JOIN technologies t ON c.technology_id = t.id
        WHERE $1::text IS NULL
           OR c.first_name ILIKE $1
           OR c.last_name ILIKE $1
           OR c.email ILIKE $1
           OR t.technology_name ILIKE $1
        "#,
    )
    .bind(&search)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(ApiResponse::new(
        CandidateListResponse {
            candidates,
            total,
            page,
            total_pages: total_pages(total, limit),
        },
        "Candidates fetched successfully",
    )))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CandidateWithTechnology>>, AppError> {
    let candidate = sqlx::query_as::<_, CandidateWithTechnology>(
        r#"
        SELECT c.id, c.first_name, c.last_name, c.email, c.phone_number,
               c.technology_id, t.technology_name, c.job_type, c.resume,
               c.created_at, c.updated_at
        FROM candidates c
        JOIN technologies t ON c.technology_id = t.id
        WHERE c.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        candidate,
        "Candidate fetched successfully",
    )))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidateRequest>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    payload.validate()?;

    let candidate = sqlx::query_as::<_, Candidate>(
        r#"
        INSERT INTO candidates (first_name, last_name, email, phone_number, technology_id, job_type)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.phone_number)
    .bind(payload.technology_id)
    .bind(payload.job_type)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(ApiResponse::new(
        candidate,
        "Candidate added successfully",
    )))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCandidateRequest>,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    payload.validate()?;

    let candidate = sqlx::query_as::<_, Candidate>(
        r#"
        UPDATE candidates
        SET first_name = COALESCE($1, first_name),
            last_name = COALESCE($2, last_name),
            email = COALESCE($3, email),
            phone_number = COALESCE($4, phone_number),
            technology_id = COALESCE($5, technology_id),
            job_type = COALESCE($6, job_type),
            updated_at = NOW()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&payload.phone_number)
    .bind(payload.technology_id)
    .bind(payload.job_type)
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        candidate,
        "Candidate updated successfully",
    )))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Candidate not found".to_string()));
    }

    Ok(Json(ApiResponse::new(
        serde_json::json!({ "id": id }),
        "Candidate deleted successfully",
    )))
}

pub async fn upload_resume(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Candidate>>, AppError> {
    // The candidate must exist before we touch the disk.
    sqlx::query_scalar::<_, i32>("SELECT id FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Candidate not found".to_string()))?;

    let mut stored_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Invalid multipart payload".to_string()))?
    {
        if field.name() != Some("resume") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::BadRequest("Resume filename is missing".to_string()))?
            .to_string();
        let extension = validate_resume_type(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::BadRequest("Failed to read resume upload".to_string()))?;

        if data.len() > MAX_RESUME_SIZE {
            return Err(AppError::PayloadTooLarge(
                "Resume must be smaller than 5MB".to_string(),
            ));
        }

        let unique_filename = format!("{}.{}", Uuid::new_v4(), extension);
        let target = PathBuf::from(&state.upload_dir).join(&unique_filename);
        fs::write(&target, &data)
            .await
            .map_err(|_| AppError::InternalServerError("Failed to store resume".to_string()))?;

        stored_name = Some(unique_filename);
    }

    let stored_name = stored_name
        .ok_or_else(|| AppError::BadRequest("No resume file was provided".to_string()))?;

    let candidate = sqlx::query_as::<_, Candidate>(
        r#"
        UPDATE candidates
        SET resume = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(&stored_name)
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(ApiResponse::new(
        candidate,
        "Resume uploaded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_to_first_page() {
        assert_eq!(normalize_paging(None, None), (1, DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn paging_computes_offset() {
        assert_eq!(normalize_paging(Some(3), Some(20)), (3, 20, 40));
    }

    #[test]
    fn paging_clamps_out_of_range_values() {
        let (page, limit, offset) = normalize_paging(Some(0), Some(10_000));
        assert_eq!(page, 1);
        assert_eq!(limit, MAX_PAGE_SIZE);
        assert_eq!(offset, 0);
    }

    #[test]
    fn paging_survives_absurd_page_numbers() {
        let (_, _, offset) = normalize_paging(Some(i64::MAX), Some(100));
        assert!(offset >= 0);
        assert_eq!(offset, i64::MAX);

        let (_, _, offset) = normalize_paging(Some(i64::MAX), None);
        assert!(offset >= 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn resume_type_accepts_documents_only() {
        assert_eq!(validate_resume_type("cv.pdf").unwrap(), "pdf");
        assert_eq!(validate_resume_type("cv.DOCX").unwrap(), "docx");
        assert!(validate_resume_type("cv.exe").is_err());
        assert!(validate_resume_type("cv").is_err());
    }
}
