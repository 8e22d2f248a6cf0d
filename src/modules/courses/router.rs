use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::courses::controller::{
    create_course, delete_course, get_course, get_courses,
};
use crate::modules::enrollments::controller::course_ranking;
use crate::state::AppState;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_courses))
        .route("/{course_id}", get(get_course).delete(delete_course))
        .route("/{course_id}/rank", get(course_ranking))
}
