use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::policy::{Action, authorize};
use crate::modules::auth::model::MessageResponse;
use crate::modules::courses::model::{Course, CreateCourseDto, PaginatedCoursesResponse};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::ids::{validate_course_id, validate_professor_id};
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::validator::ValidatedJson;

/// Create a course
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Course ID already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    authorize(&state.db, &auth_user, Action::CreateCourse).await?;
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List courses
#[utoipa::path(
    get,
    path = "/courses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated courses", body = PaginatedCoursesResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    authorize(&state.db, &auth_user, Action::ListCourses).await?;

    let limit = params.limit();
    let offset = params.offset();
    let (courses, total) = CourseService::get_courses(&state.db, limit, offset).await?;

    let has_more = offset + (courses.len() as i64) < total;
    Ok(Json(PaginatedCoursesResponse {
        data: courses,
        meta: PaginationMeta {
            total,
            limit,
            offset,
            has_more,
        },
    }))
}

/// Fetch a single course
#[utoipa::path(
    get,
    path = "/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 400, description = "Malformed course ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<String>,
) -> Result<Json<Course>, AppError> {
    validate_course_id(&course_id)?;
    authorize(&state.db, &auth_user, Action::ReadCourse).await?;

    let course = CourseService::get_course(&state.db, &course_id).await?;
    Ok(Json(course))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 400, description = "Malformed course ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_course_id(&course_id)?;
    authorize(&state.db, &auth_user, Action::DeleteCourse).await?;

    CourseService::delete_course(&state.db, &course_id).await?;
    Ok(Json(MessageResponse {
        message: "Course deleted successfully".to_string(),
    }))
}

/// Assign a professor to a course
#[utoipa::path(
    patch,
    path = "/professors/{professor_id}/courses/{course_id}",
    params(
        ("professor_id" = String, Path, description = "Professor identifier"),
        ("course_id" = String, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "Professor assigned", body = Course),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Professor or course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn assign_professor_to_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((professor_id, course_id)): Path<(String, String)>,
) -> Result<Json<Course>, AppError> {
    validate_professor_id(&professor_id)?;
    validate_course_id(&course_id)?;
    authorize(&state.db, &auth_user, Action::AssignProfessorToCourse).await?;

    let course = CourseService::assign_professor(&state.db, &professor_id, &course_id).await?;
    Ok(Json(course))
}
