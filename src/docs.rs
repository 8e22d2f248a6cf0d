use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto, RegisterRole, User, UserRole,
};
use crate::modules::courses::model::{Course, CreateCourseDto, PaginatedCoursesResponse};
use crate::modules::enrollments::model::{
    AssignResultDto, CourseRankingEntry, Enrollment, StudentCourseResult, StudentStatistics,
    StudentStatisticsResponse,
};
use crate::modules::professors::model::{
    CreateProfessorDto, PaginatedProfessorsResponse, Professor,
};
use crate::modules::students::model::{CreateStudentDto, PaginatedStudentsResponse, Student};
use crate::utils::errors::ErrorResponse;
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::list_professor_students,
        crate::modules::professors::controller::create_professor,
        crate::modules::professors::controller::get_professors,
        crate::modules::professors::controller::get_professor,
        crate::modules::professors::controller::delete_professor,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::assign_professor_to_course,
        crate::modules::enrollments::controller::enroll_student,
        crate::modules::enrollments::controller::assign_result,
        crate::modules::enrollments::controller::student_results,
        crate::modules::enrollments::controller::student_statistics,
        crate::modules::enrollments::controller::course_ranking,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRole,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            ErrorResponse,
            Student,
            CreateStudentDto,
            PaginatedStudentsResponse,
            Professor,
            CreateProfessorDto,
            PaginatedProfessorsResponse,
            Course,
            CreateCourseDto,
            PaginatedCoursesResponse,
            Enrollment,
            AssignResultDto,
            StudentCourseResult,
            StudentStatistics,
            StudentStatisticsResponse,
            CourseRankingEntry,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and credential registration"),
        (name = "Students", description = "Student records"),
        (name = "Professors", description = "Professor records"),
        (name = "Courses", description = "Courses and professor assignment"),
        (name = "Enrollments", description = "Enrollments, results and rankings")
    ),
    info(
        title = "Ateneo API",
        version = "0.1.0",
        description = "A role-based REST API for school records built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
