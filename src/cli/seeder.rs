//! Demo data seeding for local development.
//!
//! Populates students, professors, courses, and enrollments with plausible
//! fake data, plus a login credential for every student and professor
//! (username equal to the record ID). Rows whose IDs already exist are left
//! alone, so the command is safe to re-run.

use chrono::{Duration, NaiveDate, Utc};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::seq::SliceRandom;
use rand::{Rng, thread_rng};
use sqlx::PgPool;
use std::time::Instant;

use crate::modules::auth::model::UserRole;

const NUM_STUDENTS: usize = 25;
const NUM_PROFESSORS: usize = 6;
const COURSES_PER_STUDENT: usize = 4;

const COURSE_NAMES: [&str; 8] = [
    "Calculus I",
    "Linear Algebra",
    "Operating Systems",
    "Databases",
    "Algorithms and Data Structures",
    "Computer Networks",
    "Software Engineering",
    "Theoretical Computer Science",
];

/// Row counts inserted by [`seed_database`].
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub students: u64,
    pub professors: u64,
    pub courses: u64,
    pub enrollments: u64,
}

struct StudentSeed {
    student_id: String,
    name: String,
    surname: String,
    birth_date: NaiveDate,
}

struct ProfessorSeed {
    professor_id: String,
    name: String,
    surname: String,
    salary: f64,
    hire_date: NaiveDate,
}

struct EnrollmentSeed {
    student_id: String,
    course_id: String,
    result: Option<i32>,
}

/// Seeds the database with demo students, professors, courses, enrollments,
/// and matching login credentials.
pub async fn seed_database(db: &PgPool) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding demo data...");

    // Low bcrypt cost keeps seeding fast; these are throwaway credentials.
    let password_hash = bcrypt::hash("password123", 4)?;

    // Generate everything before touching the database
    let professors = generate_professors();
    let students = generate_students();
    let course_ids: Vec<String> = (1..=COURSE_NAMES.len())
        .map(|i| format!("C{}", i))
        .collect();
    let enrollments = generate_enrollments(&students, &course_ids);

    let mut summary = SeedSummary::default();
    let mut tx = db.begin().await?;

    for professor in &professors {
        summary.professors += sqlx::query(
            "INSERT INTO professors (professor_id, name, surname, salary, hire_date)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (professor_id) DO NOTHING",
        )
        .bind(&professor.professor_id)
        .bind(&professor.name)
        .bind(&professor.surname)
        .bind(professor.salary)
        .bind(professor.hire_date)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        insert_login(&mut tx, &professor.professor_id, &password_hash, UserRole::Professor).await?;
    }

    for student in &students {
        summary.students += sqlx::query(
            "INSERT INTO students (student_id, name, surname, birth_date)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (student_id) DO NOTHING",
        )
        .bind(&student.student_id)
        .bind(&student.name)
        .bind(&student.surname)
        .bind(student.birth_date)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        insert_login(&mut tx, &student.student_id, &password_hash, UserRole::Student).await?;
    }

    // Courses round-robin across the professors
    for (i, name) in COURSE_NAMES.iter().enumerate() {
        let professor_id = format!("P{}", (i % NUM_PROFESSORS) + 1);
        summary.courses += sqlx::query(
            "INSERT INTO courses (course_id, name, professor_id)
             VALUES ($1, $2, $3)
             ON CONFLICT (course_id) DO NOTHING",
        )
        .bind(&course_ids[i])
        .bind(name)
        .bind(&professor_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for enrollment in &enrollments {
        summary.enrollments += sqlx::query(
            "INSERT INTO enrollments (student_id, course_id, result)
             VALUES ($1, $2, $3)
             ON CONFLICT (student_id, course_id) DO NOTHING",
        )
        .bind(&enrollment.student_id)
        .bind(&enrollment.course_id)
        .bind(enrollment.result)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students, {} professors, {} courses, {} enrollments in {:?}",
        summary.students,
        summary.professors,
        summary.courses,
        summary.enrollments,
        start_time.elapsed()
    );
    println!("📝 Default password for all seeded users: password123");

    Ok(summary)
}

async fn insert_login(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    username: &str,
    password_hash: &str,
    role: UserRole,
) -> Result<(), Box<dyn std::error::Error>> {
    sqlx::query(
        "INSERT INTO users (username, password, role)
         VALUES ($1, $2, $3)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

fn generate_professors() -> Vec<ProfessorSeed> {
    let mut rng = thread_rng();
    let today = Utc::now().date_naive();

    (1..=NUM_PROFESSORS)
        .map(|i| ProfessorSeed {
            professor_id: format!("P{}", i),
            name: FirstName().fake(),
            surname: LastName().fake(),
            salary: rng.gen_range(28_000.0..75_000.0_f64).round(),
            hire_date: today - Duration::days(rng.gen_range(90..365 * 15)),
        })
        .collect()
}

fn generate_students() -> Vec<StudentSeed> {
    let mut rng = thread_rng();
    let today = Utc::now().date_naive();

    (1..=NUM_STUDENTS)
        .map(|i| StudentSeed {
            student_id: format!("S{}", i),
            name: FirstName().fake(),
            surname: LastName().fake(),
            birth_date: today - Duration::days(rng.gen_range(19 * 365..26 * 365)),
        })
        .collect()
}

fn generate_enrollments(students: &[StudentSeed], course_ids: &[String]) -> Vec<EnrollmentSeed> {
    let mut rng = thread_rng();
    let mut enrollments = Vec::with_capacity(students.len() * COURSES_PER_STUDENT);

    for student in students {
        for course_id in course_ids.choose_multiple(&mut rng, COURSES_PER_STUDENT) {
            // Roughly a quarter of enrollments are still waiting for a result
            let result = rng
                .gen_bool(0.75)
                .then(|| rng.gen_range(18..=30));

            enrollments.push(EnrollmentSeed {
                student_id: student.student_id.clone(),
                course_id: course_id.clone(),
                result,
            });
        }
    }

    enrollments
}
