use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Technology {
    pub id: i32,
    pub technology_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTechnologyRequest {
    #[validate(length(min = 1, max = 100, message = "Technology is required"))]
    pub technology_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTechnologyRequest {
    #[validate(length(min = 1, max = 100, message = "Technology is required"))]
    pub technology_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn empty_name_is_rejected() {
        let payload = CreateTechnologyRequest {
            technology_name: String::new(),
        };
        assert!(payload.validate().is_err());
    }
}
