//! Configuration modules for the Ateneo API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables with development-friendly defaults.
//!
//! # Modules
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT authentication configuration
//! - [`server`]: Bind address and port

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
