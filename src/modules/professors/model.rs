//! Professor domain models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::ids::PROFESSOR_ID_FORMAT;
use crate::utils::pagination::PaginationMeta;

#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Professor {
    pub professor_id: String,
    pub name: String,
    pub surname: String,
    pub salary: Option<f64>,
    pub hire_date: Option<NaiveDate>,
}

/// DTO for creating a professor. Salary, when present, must be positive;
/// the service rejects non-positive values before the insert.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateProfessorDto {
    #[validate(regex(
        path = *PROFESSOR_ID_FORMAT,
        message = "professor_id must match the format P<number>"
    ))]
    pub professor_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    pub salary: Option<f64>,
    pub hire_date: Option<NaiveDate>,
}

/// Paginated response containing professors.
#[derive(Serialize, ToSchema)]
pub struct PaginatedProfessorsResponse {
    pub data: Vec<Professor>,
    pub meta: PaginationMeta,
}
