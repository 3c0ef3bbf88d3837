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
    /// Serve fixture data instead of calling providers and integrations.
    pub mock_mode: bool,
    /// Timeout applied to every outbound provider/integration call (default: `15`).
    pub integration_timeout_secs: u64,
    /// Third-party credentials.
    pub integrations: IntegrationConfig,
}

/// Credentials for the outbound integrations. A `None` section means the
/// integration is not configured.
#[derive(Debug, Clone, Default)]
pub struct IntegrationConfig {
    pub socrata_app_token: Option<String>,
    pub google_drive: Option<GoogleDriveConfig>,
    pub skip_trace: Option<ApiCredentials>,
    pub mortgage: Option<ApiCredentials>,
}

#[derive(Debug, Clone)]
pub struct GoogleDriveConfig {
    pub api_key: String,
    pub folder_id: String,
}

#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub api_url: String,
    pub api_key: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `MOCK_MODE`                | `false`                    |
    /// | `INTEGRATION_TIMEOUT_SECS` | `15`                       |
    ///
    /// Integration credentials (`SOCRATA_APP_TOKEN`, `GOOGLE_DRIVE_API_KEY` +
    /// `GOOGLE_DRIVE_FOLDER_ID`, `SKIP_TRACE_API_URL` + `SKIP_TRACE_API_KEY`,
    /// `MORTGAGE_API_URL` + `MORTGAGE_API_KEY`) have no defaults; an
    /// integration counts as configured only when all of its variables are set.
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

        let integration_timeout_secs: u64 = std::env::var("INTEGRATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("INTEGRATION_TIMEOUT_SECS must be a valid u64");

        let mock_mode = env_flag("MOCK_MODE");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            mock_mode,
            integration_timeout_secs,
            integrations: IntegrationConfig::from_env(),
        }
    }
}

impl IntegrationConfig {
    pub fn from_env() -> Self {
        let google_drive = match (
            env_opt("GOOGLE_DRIVE_API_KEY"),
            env_opt("GOOGLE_DRIVE_FOLDER_ID"),
        ) {
            (Some(api_key), Some(folder_id)) => Some(GoogleDriveConfig { api_key, folder_id }),
            _ => None,
        };

        Self {
            socrata_app_token: env_opt("SOCRATA_APP_TOKEN"),
            google_drive,
            skip_trace: ApiCredentials::from_env("SKIP_TRACE_API_URL", "SKIP_TRACE_API_KEY"),
            mortgage: ApiCredentials::from_env("MORTGAGE_API_URL", "MORTGAGE_API_KEY"),
        }
    }
}

impl ApiCredentials {
    fn from_env(url_var: &str, key_var: &str) -> Option<Self> {
        Some(Self {
            api_url: env_opt(url_var)?,
            api_key: env_opt(key_var)?,
        })
    }
}

/// A non-blank environment variable.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `1`, `true`, `yes` and `on` (any case) are true; anything else is false.
fn env_flag(name: &str) -> bool {
    env_opt(name).is_some_and(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
