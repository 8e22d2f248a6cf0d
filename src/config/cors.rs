use std::env;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    /// Origins allowed to call the API, comma-separated in `ALLOWED_ORIGINS`.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self {
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }
}
