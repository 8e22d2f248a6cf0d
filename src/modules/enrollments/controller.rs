use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::policy::{Action, authorize};
use crate::modules::enrollments::model::{
    AssignResultDto, CourseRankingEntry, Enrollment, StudentCourseResult,
    StudentStatisticsResponse,
};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::ids::{validate_course_id, validate_student_id};
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::validator::ValidatedJson;

/// Enroll a student in a course
#[utoipa::path(
    post,
    path = "/students/{student_id}/courses/{course_id}",
    params(
        ("student_id" = String, Path, description = "Student identifier"),
        ("course_id" = String, Path, description = "Course identifier")
    ),
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Student or course not found", body = ErrorResponse),
        (status = 409, description = "Already enrolled", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn enroll_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    validate_student_id(&student_id)?;
    validate_course_id(&course_id)?;
    authorize(&state.db, &auth_user, Action::EnrollStudent).await?;

    let enrollment = EnrollmentService::enroll_student(&state.db, &student_id, &course_id).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// Assign a grade result for an enrollment
#[utoipa::path(
    patch,
    path = "/students/{student_id}/courses/{course_id}/results",
    params(
        ("student_id" = String, Path, description = "Student identifier"),
        ("course_id" = String, Path, description = "Course identifier")
    ),
    request_body = AssignResultDto,
    responses(
        (status = 200, description = "Result assigned", body = Enrollment),
        (status = 400, description = "Malformed identifier or result out of range", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not a course the caller teaches", body = ErrorResponse),
        (status = 404, description = "Student, course or enrollment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, dto))]
pub async fn assign_result(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((student_id, course_id)): Path<(String, String)>,
    ValidatedJson(dto): ValidatedJson<AssignResultDto>,
) -> Result<Json<Enrollment>, AppError> {
    validate_student_id(&student_id)?;
    validate_course_id(&course_id)?;
    authorize(
        &state.db,
        &auth_user,
        Action::AssignResult {
            student_id: &student_id,
            course_id: &course_id,
        },
    )
    .await?;

    let enrollment =
        EnrollmentService::assign_result(&state.db, &student_id, &course_id, dto.result).await?;
    Ok(Json(enrollment))
}

/// List a student's per-course results
#[utoipa::path(
    get,
    path = "/students/{student_id}/courses/results",
    params(("student_id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "The student's results", body = [StudentCourseResult]),
        (status = 400, description = "Malformed student ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's own results", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn student_results(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<StudentCourseResult>>, AppError> {
    validate_student_id(&student_id)?;
    authorize(
        &state.db,
        &auth_user,
        Action::ReadStudentResults {
            student_id: &student_id,
        },
    )
    .await?;

    let results = EnrollmentService::student_results(&state.db, &student_id).await?;
    Ok(Json(results))
}

/// Global student ranking by average result
#[utoipa::path(
    get,
    path = "/students/statistics",
    params(PaginationParams),
    responses(
        (status = 200, description = "Ranked students", body = StudentStatisticsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Students may not view statistics", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn student_statistics(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<StudentStatisticsResponse>, AppError> {
    authorize(&state.db, &auth_user, Action::ReadStudentStatistics).await?;

    let limit = params.limit();
    let offset = params.offset();
    let (statistics, total) =
        EnrollmentService::student_statistics(&state.db, limit, offset).await?;

    let has_more = offset + (statistics.len() as i64) < total;
    Ok(Json(StudentStatisticsResponse {
        data: statistics,
        meta: PaginationMeta {
            total,
            limit,
            offset,
            has_more,
        },
    }))
}

/// Best students of a course
#[utoipa::path(
    get,
    path = "/courses/{course_id}/rank",
    params(("course_id" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Ranked graded students", body = [CourseRankingEntry]),
        (status = 400, description = "Malformed course ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not a course the caller teaches", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn course_ranking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<CourseRankingEntry>>, AppError> {
    validate_course_id(&course_id)?;
    authorize(
        &state.db,
        &auth_user,
        Action::ReadCourseRanking {
            course_id: &course_id,
        },
    )
    .await?;

    let ranking = EnrollmentService::course_ranking(&state.db, &course_id).await?;
    Ok(Json(ranking))
}
