pub mod errors;
pub mod ids;
pub mod jwt;
pub mod pagination;
pub mod password;
