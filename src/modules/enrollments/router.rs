use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::modules::enrollments::controller::{assign_result, enroll_student, student_results};
use crate::state::AppState;

/// Mounted under `/students/{student_id}/courses`. The static `/results`
/// segment wins over the `{course_id}` capture, so the listing route never
/// shadows an enrollment.
pub fn init_student_courses_router() -> Router<AppState> {
    Router::new()
        .route("/results", get(student_results))
        .route("/{course_id}", post(enroll_student))
        .route("/{course_id}/results", patch(assign_result))
}
