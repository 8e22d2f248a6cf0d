use std::sync::LazyLock;

use regex::Regex;

use crate::utils::errors::AppError;

/// Student IDs are the letter `S` followed by one or more digits.
pub static STUDENT_ID_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^S\d+$").unwrap());

/// Professor IDs are the letter `P` followed by one or more digits.
pub static PROFESSOR_ID_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^P\d+$").unwrap());

/// Course IDs are the letter `C` followed by one or more digits.
pub static COURSE_ID_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^C\d+$").unwrap());

pub fn validate_student_id(student_id: &str) -> Result<(), AppError> {
    if STUDENT_ID_FORMAT.is_match(student_id) {
        Ok(())
    } else {
        Err(AppError::bad_request(anyhow::anyhow!(
            "student_id must match the format S<number>"
        )))
    }
}

pub fn validate_professor_id(professor_id: &str) -> Result<(), AppError> {
    if PROFESSOR_ID_FORMAT.is_match(professor_id) {
        Ok(())
    } else {
        Err(AppError::bad_request(anyhow::anyhow!(
            "professor_id must match the format P<number>"
        )))
    }
}

pub fn validate_course_id(course_id: &str) -> Result<(), AppError> {
    if COURSE_ID_FORMAT.is_match(course_id) {
        Ok(())
    } else {
        Err(AppError::bad_request(anyhow::anyhow!(
            "course_id must match the format C<number>"
        )))
    }
}
