//! Student domain models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::ids::STUDENT_ID_FORMAT;
use crate::utils::pagination::PaginationMeta;

/// A student record. Identifiers are immutable once created; there is no
/// update path.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Student {
    pub student_id: String,
    pub name: String,
    pub surname: String,
    pub birth_date: Option<NaiveDate>,
    pub enrollment_date: NaiveDate,
}

/// DTO for creating a student.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(regex(
        path = *STUDENT_ID_FORMAT,
        message = "student_id must match the format S<number>"
    ))]
    pub student_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    pub birth_date: Option<NaiveDate>,
    /// Defaults to the current date when omitted.
    pub enrollment_date: Option<NaiveDate>,
}

/// Paginated response containing students.
#[derive(Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}
