use bcrypt::{DEFAULT_COST, hash, verify};

use crate::utils::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(AppError::database)
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed).map_err(AppError::database)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hashed = hash_password("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(verify_password("hunter2", &hashed).unwrap());
        assert!(!verify_password("hunter3", &hashed).unwrap());
    }
}
