//! Middleware and extractors for authentication and authorization.
//!
//! # Request Flow
//!
//! 1. Client sends a request with an `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] validates the JWT and extracts the claims
//! 3. The handler asks [`policy::authorize`] whether the caller may perform
//!    the operation (role gate, then ownership)
//! 4. Handler executes if all checks pass

pub mod auth;
pub mod policy;
pub mod role;
