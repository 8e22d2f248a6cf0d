//! Role-check helpers shared by the policy evaluator.

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::UserRole;
use crate::utils::errors::AppError;

/// Checks that the caller holds one of the allowed roles.
///
/// The caller is already authenticated at this point, so a mismatch is an
/// authorization failure (403), never a 401.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[UserRole]) -> Result<(), AppError> {
    let user_role = auth_user.role();

    if !allowed_roles.contains(&user_role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles, user_role
        )));
    }

    Ok(())
}
