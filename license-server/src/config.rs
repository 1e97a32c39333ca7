//! License server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// License server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// License store connection URL (PostgreSQL; credentials ride in the URL)
    pub database_url: String,
    /// HTTP listening port
    pub port: u16,
    /// Signing secret for session credentials
    pub jwt_secret: String,
    /// Administrative secret for the license generation endpoint
    pub admin_secret: String,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            admin_secret: Self::require_secret("ADMIN_SECRET", &environment)?,
            environment,
        })
    }
}
