use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::{
    utils::{errors::AppError, response::ApiResponse},
    AppState,
};

/// Counter cards on the dashboard. Field names are camelCase because the
/// console binds them directly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTotals {
    pub candidate_total: i64,
    pub technology_total: i64,
    pub interview_total: i64,
}

pub async fn totals(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardTotals>>, AppError> {
    let candidate_total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM candidates")
        .fetch_one(&state.db)
        .await?;
    let technology_total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM technologies")
        .fetch_one(&state.db)
        .await?;
    let interview_total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM interviews")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(ApiResponse::new(
        DashboardTotals {
            candidate_total,
            technology_total,
            interview_total,
        },
        "Dashboard totals fetched successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_serialize_camel_case() {
        let totals = DashboardTotals {
            candidate_total: 3,
            technology_total: 2,
            interview_total: 5,
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["candidateTotal"], 3);
        assert_eq!(json["technologyTotal"], 2);
        assert_eq!(json["interviewTotal"], 5);
    }
}
