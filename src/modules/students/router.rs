use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::enrollments::controller::student_statistics;
use crate::modules::enrollments::router::init_student_courses_router;
use crate::modules::students::controller::{
    create_student, delete_student, get_student, get_students, list_professor_students,
};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/statistics", get(student_statistics))
        .route("/{student_id}", get(get_student).delete(delete_student))
        .nest("/{student_id}/courses", init_student_courses_router())
}

/// Mounted under `/professors/{professor_id}/students`.
pub fn init_professor_students_router() -> Router<AppState> {
    Router::new().route("/", get(list_professor_students))
}
