//! Feature modules. Each follows the same structure: `model.rs` for data
//! types and DTOs, `service.rs` for business logic over the pool,
//! `controller.rs` for HTTP handlers, `router.rs` for route wiring.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod professors;
pub mod students;
