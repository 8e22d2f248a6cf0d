use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::modules::courses::controller::assign_professor_to_course;
use crate::modules::professors::controller::{
    create_professor, delete_professor, get_professor, get_professors,
};
use crate::state::AppState;

pub fn init_professors_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_professor).get(get_professors))
        .route("/{professor_id}", get(get_professor).delete(delete_professor))
        .route(
            "/{professor_id}/courses/{course_id}",
            patch(assign_professor_to_course),
        )
}
