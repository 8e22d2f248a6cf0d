//! Course domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::ids::COURSE_ID_FORMAT;
use crate::utils::pagination::PaginationMeta;

/// A course. `professor_id` is null until a professor is assigned, and
/// reverts to null if the professor is deleted.
#[derive(Serialize, FromRow, Debug, ToSchema)]
pub struct Course {
    pub course_id: String,
    pub name: String,
    pub description: Option<String>,
    pub professor_id: Option<String>,
}

/// DTO for creating a course. Professor assignment is a separate operation.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateCourseDto {
    #[validate(regex(
        path = *COURSE_ID_FORMAT,
        message = "course_id must match the format C<number>"
    ))]
    pub course_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Paginated response containing courses.
#[derive(Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub data: Vec<Course>,
    pub meta: PaginationMeta,
}
