use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::policy::{Action, authorize};
use crate::modules::auth::model::MessageResponse;
use crate::modules::professors::model::{
    CreateProfessorDto, PaginatedProfessorsResponse, Professor,
};
use crate::modules::professors::service::ProfessorService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::utils::ids::validate_professor_id;
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::validator::ValidatedJson;

/// Create a professor record
#[utoipa::path(
    post,
    path = "/professors",
    request_body = CreateProfessorDto,
    responses(
        (status = 201, description = "Professor created", body = Professor),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Professor ID already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professors"
)]
#[instrument(skip(state, dto))]
pub async fn create_professor(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateProfessorDto>,
) -> Result<(StatusCode, Json<Professor>), AppError> {
    authorize(&state.db, &auth_user, Action::CreateProfessor).await?;
    let professor = ProfessorService::create_professor(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(professor)))
}

/// List professors
#[utoipa::path(
    get,
    path = "/professors",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated professors", body = PaginatedProfessorsResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professors"
)]
#[instrument(skip(state))]
pub async fn get_professors(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedProfessorsResponse>, AppError> {
    authorize(&state.db, &auth_user, Action::ListProfessors).await?;

    let limit = params.limit();
    let offset = params.offset();
    let (professors, total) = ProfessorService::get_professors(&state.db, limit, offset).await?;

    let has_more = offset + (professors.len() as i64) < total;
    Ok(Json(PaginatedProfessorsResponse {
        data: professors,
        meta: PaginationMeta {
            total,
            limit,
            offset,
            has_more,
        },
    }))
}

/// Fetch a single professor
#[utoipa::path(
    get,
    path = "/professors/{professor_id}",
    params(("professor_id" = String, Path, description = "Professor identifier")),
    responses(
        (status = 200, description = "The professor", body = Professor),
        (status = 400, description = "Malformed professor ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the caller's own record", body = ErrorResponse),
        (status = 404, description = "Professor not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professors"
)]
#[instrument(skip(state))]
pub async fn get_professor(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(professor_id): Path<String>,
) -> Result<Json<Professor>, AppError> {
    validate_professor_id(&professor_id)?;
    authorize(
        &state.db,
        &auth_user,
        Action::ReadProfessor {
            professor_id: &professor_id,
        },
    )
    .await?;

    let professor = ProfessorService::get_professor(&state.db, &professor_id).await?;
    Ok(Json(professor))
}

/// Delete a professor
#[utoipa::path(
    delete,
    path = "/professors/{professor_id}",
    params(("professor_id" = String, Path, description = "Professor identifier")),
    responses(
        (status = 200, description = "Professor deleted", body = MessageResponse),
        (status = 400, description = "Malformed professor ID", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Professor not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Professors"
)]
#[instrument(skip(state))]
pub async fn delete_professor(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(professor_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_professor_id(&professor_id)?;
    authorize(&state.db, &auth_user, Action::DeleteProfessor).await?;

    ProfessorService::delete_professor(&state.db, &professor_id).await?;
    Ok(Json(MessageResponse {
        message: "Professor deleted successfully".to_string(),
    }))
}
