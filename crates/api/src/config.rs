use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Externally visible origin used for image and pagination URLs,
    /// without a trailing slash.
    pub app_url: String,
    /// Root of the public storage tree served under `/storage`.
    pub storage_root: PathBuf,
    /// Request body cap for the admin form endpoints.
    pub max_body_bytes: usize,
}

/// Default body cap. Must stay above the photo limit so oversized photos
/// reach validation instead of failing with 413.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APP_URL`              | `http://localhost:3000`    |
    /// | `STORAGE_ROOT`         | `storage/app/public`       |
    /// | `MAX_BODY_BYTES`       | `10485760`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_url = normalize_app_url(
            &std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let storage_root = PathBuf::from(
            std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage/app/public".into()),
        );

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .map(|v| v.parse().expect("MAX_BODY_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_url,
            storage_root,
            max_body_bytes,
        }
    }
}

/// Strip trailing slashes so URLs can be joined with `format!`.
pub fn normalize_app_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
