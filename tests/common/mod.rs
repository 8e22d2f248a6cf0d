use ateneo::modules::auth::model::UserRole;
use ateneo::utils::password::hash_password;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};

#[allow(dead_code)]
pub struct TestUser {
    pub username: String,
    pub password: String,
}

/// Create a login credential with the given role.
/// role should be one of: "admin", "professor", "student"
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
    password: &str,
    role: &str,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let role = match role {
        "admin" => UserRole::Admin,
        "professor" => UserRole::Professor,
        "student" => UserRole::Student,
        _ => panic!("Invalid role: {}", role),
    };

    sqlx::query("INSERT INTO users (username, password, role) VALUES ($1, $2, $3)")
        .bind(username)
        .bind(hashed)
        .bind(role)
        .execute(&mut **tx)
        .await
        .unwrap();

    TestUser {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_student(tx: &mut Transaction<'_, Postgres>, student_id: &str) {
    sqlx::query(
        "INSERT INTO students (student_id, name, surname, birth_date)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(student_id)
    .bind("Test")
    .bind("Student")
    .bind(chrono::NaiveDate::from_ymd_opt(2001, 6, 15).unwrap())
    .execute(&mut **tx)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn create_test_professor(tx: &mut Transaction<'_, Postgres>, professor_id: &str) {
    sqlx::query(
        "INSERT INTO professors (professor_id, name, surname, salary)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(professor_id)
    .bind("Test")
    .bind("Professor")
    .bind(45_000.0_f64)
    .execute(&mut **tx)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn create_test_course(
    tx: &mut Transaction<'_, Postgres>,
    course_id: &str,
    professor_id: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO courses (course_id, name, professor_id)
         VALUES ($1, $2, $3)",
    )
    .bind(course_id)
    .bind(format!("Test Course {}", course_id))
    .bind(professor_id)
    .execute(&mut **tx)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn create_test_enrollment(
    tx: &mut Transaction<'_, Postgres>,
    student_id: &str,
    course_id: &str,
    result: Option<i32>,
) {
    sqlx::query(
        "INSERT INTO enrollments (student_id, course_id, result)
         VALUES ($1, $2, $3)",
    )
    .bind(student_id)
    .bind(course_id)
    .bind(result)
    .execute(&mut **tx)
    .await
    .unwrap();
}
