use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::policy::{Action, authorize};
use crate::modules::auth::model::MessageResponse;
use crate::modules::students::model::{CreateStudentDto, PaginatedStudentsResponse, Student};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::ids::{validate_professor_id, validate_student_id};
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::validator::ValidatedJson;

/// Create a student record
#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Student ID already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    authorize(&state.db, &auth_user, Action::CreateStudent).await?;
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// List students
#[utoipa::path(
    get,
    path = "/students",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated students", body = PaginatedStudentsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    authorize(&state.db, &auth_user, Action::ListStudents).await?;

    let limit = params.limit();
    let offset = params.offset();
    let (students, total) = StudentService::get_students(&state.db, limit, offset).await?;

    let has_more = offset + (students.len() as i64) < total;
    Ok(Json(PaginatedStudentsResponse {
        data: students,
        meta: PaginationMeta {
            total,
            limit,
            offset,
            has_more,
        },
    }))
}

/// Fetch a single student
#[utoipa::path(
    get,
    path = "/students/{student_id}",
    params(("student_id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 400, description = "Malformed student ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's own record", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, AppError> {
    validate_student_id(&student_id)?;
    authorize(
        &state.db,
        &auth_user,
        Action::ReadStudent {
            student_id: &student_id,
        },
    )
    .await?;

    let student = StudentService::get_student(&state.db, &student_id).await?;
    Ok(Json(student))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/students/{student_id}",
    params(("student_id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 400, description = "Malformed student ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_student_id(&student_id)?;
    authorize(&state.db, &auth_user, Action::DeleteStudent).await?;

    StudentService::delete_student(&state.db, &student_id).await?;
    Ok(Json(MessageResponse {
        message: "Student deleted successfully".to_string(),
    }))
}

/// List the students taught by a professor
#[utoipa::path(
    get,
    path = "/professors/{professor_id}/students",
    params(
        ("professor_id" = String, Path, description = "Professor identifier"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Paginated students", body = PaginatedStudentsResponse),
        (status = 400, description = "Malformed professor ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's own roster", body = ErrorResponse),
        (status = 404, description = "Professor not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_professor_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(professor_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    validate_professor_id(&professor_id)?;
    authorize(
        &state.db,
        &auth_user,
        Action::ListProfessorStudents {
            professor_id: &professor_id,
        },
    )
    .await?;

    let limit = params.limit();
    let offset = params.offset();
    let (students, total) =
        StudentService::get_students_of_professor(&state.db, &professor_id, limit, offset).await?;

    let has_more = offset + (students.len() as i64) < total;
    Ok(Json(PaginatedStudentsResponse {
        data: students,
        meta: PaginationMeta {
            total,
            limit,
            offset,
            has_more,
        },
    }))
}
