/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | DATABASE_URL | sqlite://cafe.db?mode=rwc | SQLite connection string |
/// | HTTP_PORT | 8000 | HTTP listen port |
/// | ENVIRONMENT | development | development / staging / production |
/// | SESSION_TTL_MINUTES | 720 | Worker session lifetime |
/// | ADMIN_EMAIL | (none) | Recipient of login notifications |
/// | SES_FROM_EMAIL | noreply@cafe.local | Sender address for SES |
/// | SES_REGION | (aws default) | Region override for SES |
/// | LOG_LEVEL | info | Default log level (RUST_LOG wins) |
/// | LOG_DIR | (none) | Daily rolling log directory |
/// | NOTIFY_QUEUE_CAPACITY | 64 | Pending login notifications |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite://data/cafe.db?mode=rwc HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub session_ttl_minutes: i64,
    /// Login notifications are only logged when unset
    pub admin_email: Option<String>,
    pub ses_from_email: String,
    pub ses_region: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub notify_queue_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://cafe.db?mode=rwc".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &i64| *v > 0)
                .unwrap_or(720),
            admin_email: std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            ses_from_email: std::env::var("SES_FROM_EMAIL")
                .unwrap_or_else(|_| "noreply@cafe.local".into()),
            ses_region: std::env::var("SES_REGION").ok().filter(|v| !v.is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty()),
            notify_queue_capacity: std::env::var("NOTIFY_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &usize| *v > 0)
                .unwrap_or(64),
        }
    }

    /// In-memory configuration for tests (no env, no email)
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "test".into(),
            session_ttl_minutes: 720,
            admin_email: None,
            ses_from_email: "noreply@cafe.local".into(),
            ses_region: None,
            log_level: "debug".into(),
            log_dir: None,
            notify_queue_capacity: 8,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
