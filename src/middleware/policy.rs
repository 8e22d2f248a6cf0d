//! Table-driven authorization policy.
//!
//! Every guarded operation is an [`Action`]. Authorization runs in two
//! stages: a role gate against a static table, then an optional ownership
//! check that may consult the database (professor-course and
//! professor-enrollment relationships). Handlers call [`authorize`] once,
//! after path-ID validation and before touching the repository.
//!
//! Both stages fail with 403: the caller is authenticated by the time the
//! policy runs, so every denial here is an authorization failure.

use sqlx::PgPool;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::check_any_role;
use crate::modules::auth::model::UserRole;
use crate::utils::errors::AppError;

/// A guarded operation, carrying the path identifiers scoping may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    RegisterUser,
    CreateStudent,
    ReadStudent { student_id: &'a str },
    ListStudents,
    DeleteStudent,
    ListProfessorStudents { professor_id: &'a str },
    EnrollStudent,
    CreateProfessor,
    ReadProfessor { professor_id: &'a str },
    ListProfessors,
    DeleteProfessor,
    CreateCourse,
    ReadCourse,
    ListCourses,
    DeleteCourse,
    AssignProfessorToCourse,
    AssignResult { student_id: &'a str, course_id: &'a str },
    ReadStudentResults { student_id: &'a str },
    ReadStudentStatistics,
    ReadCourseRanking { course_id: &'a str },
}

/// What, beyond the role gate, the caller must prove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipCheck<'a> {
    /// Role gate alone is sufficient.
    None,
    /// The caller's username must equal this identifier (self-scoping).
    SubjectIs(&'a str),
    /// The caller must be the professor assigned to this course.
    ProfessorOwnsCourse(&'a str),
    /// The enrollment must exist in a course taught by the caller.
    ProfessorOwnsEnrollment {
        student_id: &'a str,
        course_id: &'a str,
    },
}

impl<'a> Action<'a> {
    /// The role-gate table. Admins hold every row by construction.
    pub fn allowed_roles(&self) -> &'static [UserRole] {
        use UserRole::*;

        match self {
            Action::RegisterUser
            | Action::CreateStudent
            | Action::ListStudents
            | Action::DeleteStudent
            | Action::EnrollStudent
            | Action::CreateProfessor
            | Action::ListProfessors
            | Action::DeleteProfessor
            | Action::CreateCourse
            | Action::DeleteCourse
            | Action::AssignProfessorToCourse => &[Admin],

            Action::ListProfessorStudents { .. }
            | Action::ReadProfessor { .. }
            | Action::AssignResult { .. }
            | Action::ReadStudentStatistics
            | Action::ReadCourseRanking { .. } => &[Admin, Professor],

            Action::ReadStudent { .. }
            | Action::ReadCourse
            | Action::ListCourses
            | Action::ReadStudentResults { .. } => &[Admin, Professor, Student],
        }
    }

    /// The ownership requirement for a caller holding `role`. Pure, so the
    /// table is testable without a database.
    pub fn ownership_check(&self, role: UserRole) -> OwnershipCheck<'a> {
        match (self, role) {
            (Action::ReadStudent { student_id }, UserRole::Student)
            | (Action::ReadStudentResults { student_id }, UserRole::Student) => {
                OwnershipCheck::SubjectIs(student_id)
            }

            (Action::ReadProfessor { professor_id }, UserRole::Professor)
            | (Action::ListProfessorStudents { professor_id }, UserRole::Professor) => {
                OwnershipCheck::SubjectIs(professor_id)
            }

            (Action::ReadCourseRanking { course_id }, UserRole::Professor) => {
                OwnershipCheck::ProfessorOwnsCourse(course_id)
            }

            (
                Action::AssignResult {
                    student_id,
                    course_id,
                },
                UserRole::Professor,
            ) => OwnershipCheck::ProfessorOwnsEnrollment {
                student_id,
                course_id,
            },

            _ => OwnershipCheck::None,
        }
    }
}

/// Evaluates the policy for one request. Role gate first, then ownership.
pub async fn authorize(
    db: &PgPool,
    auth_user: &AuthUser,
    action: Action<'_>,
) -> Result<(), AppError> {
    check_any_role(auth_user, action.allowed_roles())?;

    match action.ownership_check(auth_user.role()) {
        OwnershipCheck::None => Ok(()),

        OwnershipCheck::SubjectIs(id) => {
            if auth_user.username() == id {
                Ok(())
            } else {
                Err(AppError::forbidden(
                    "Access denied. You can only access your own records",
                ))
            }
        }

        OwnershipCheck::ProfessorOwnsCourse(course_id) => {
            let owns = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE course_id = $1 AND professor_id = $2)",
            )
            .bind(course_id)
            .bind(auth_user.username())
            .fetch_one(db)
            .await?;

            if owns {
                Ok(())
            } else {
                Err(AppError::forbidden(
                    "Access denied. You do not teach this course",
                ))
            }
        }

        OwnershipCheck::ProfessorOwnsEnrollment {
            student_id,
            course_id,
        } => {
            let owns = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(
                     SELECT 1 FROM enrollments e
                     JOIN courses c ON c.course_id = e.course_id
                     WHERE e.student_id = $1 AND e.course_id = $2 AND c.professor_id = $3
                 )",
            )
            .bind(student_id)
            .bind(course_id)
            .bind(auth_user.username())
            .fetch_one(db)
            .await?;

            if owns {
                Ok(())
            } else {
                Err(AppError::forbidden(
                    "Access denied. The student is not enrolled in a course you teach",
                ))
            }
        }
    }
}
