use once_cell::sync::Lazy;
use serde::Serialize;
use std::env;
use thiserror::Error;

/// Signing secret used when running locally without `JWT_SECRET`.
const DEVELOPMENT_JWT_SECRET: &str = "estate-api-development-secret";

/// Longest admin token lifetime accepted from configuration (one year)
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub integrations: IntegrationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Clone)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub jwt_secret: Option<String>,
    pub jwt_expiry_hours: u64,
}

/// Third-party credentials the service only reports on, never uses directly.
#[derive(Clone, Default)]
pub struct IntegrationConfig {
    pub auth_secret: Option<String>,
    pub auth_url: Option<String>,
    pub email_user: Option<String>,
    pub email_password: Option<String>,
    pub maps_api_key: Option<String>,
}

/// Presence flags for configured secrets, safe to expose over HTTP.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentReport {
    pub mode: &'static str,
    pub has_database_url: bool,
    pub has_auth_secret: bool,
    pub has_auth_url: bool,
    pub has_jwt_secret: bool,
    pub has_email_credentials: bool,
    pub has_maps_api_key: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set outside development")]
    MissingJwtSecret,

    #[error("JWT_EXPIRY_HOURS must be between 1 and {max}, got {0}", max = MAX_JWT_EXPIRY_HOURS)]
    JwtExpiryOutOfRange(u64),
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env::var("ESTATE_API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        self.database.url = non_empty_var("DATABASE_URL");
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        self.security.jwt_secret = non_empty_var("JWT_SECRET");
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self.integrations = IntegrationConfig {
            auth_secret: non_empty_var("AUTH_SECRET"),
            auth_url: non_empty_var("AUTH_URL"),
            email_user: non_empty_var("EMAIL_USER"),
            email_password: non_empty_var("EMAIL_PASSWORD"),
            maps_api_key: non_empty_var("MAPS_API_KEY"),
        };

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string()],
                jwt_secret: None,
                jwt_expiry_hours: 24 * 7, // 1 week
            },
            integrations: IntegrationConfig::default(),
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                jwt_secret: None,
                jwt_expiry_hours: 24,
            },
            integrations: IntegrationConfig::default(),
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                jwt_secret: None,
                jwt_expiry_hours: 24,
            },
            integrations: IntegrationConfig::default(),
        }
    }

    /// Secret used to sign admin tokens. Development falls back to a fixed secret.
    pub fn signing_secret(&self) -> Result<&str, ConfigError> {
        match (&self.security.jwt_secret, self.environment) {
            (Some(secret), _) => Ok(secret.as_str()),
            (None, Environment::Development) => {
                tracing::warn!("JWT_SECRET not set; using the development signing secret");
                Ok(DEVELOPMENT_JWT_SECRET)
            }
            (None, _) => Err(ConfigError::MissingJwtSecret),
        }
    }

    /// Token lifetime, rejected at startup when outside 1..=MAX_JWT_EXPIRY_HOURS
    pub fn jwt_expiry_hours(&self) -> Result<u64, ConfigError> {
        match self.security.jwt_expiry_hours {
            hours @ 1..=MAX_JWT_EXPIRY_HOURS => Ok(hours),
            hours => Err(ConfigError::JwtExpiryOutOfRange(hours)),
        }
    }

    pub fn environment_report(&self) -> EnvironmentReport {
        let integrations = &self.integrations;
        EnvironmentReport {
            mode: self.environment.as_str(),
            has_database_url: self.database.url.is_some(),
            has_auth_secret: integrations.auth_secret.is_some(),
            has_auth_url: integrations.auth_url.is_some(),
            has_jwt_secret: self.security.jwt_secret.is_some(),
            has_email_credentials: integrations.email_user.is_some()
                && integrations.email_password.is_some(),
            has_maps_api_key: integrations.maps_api_key.is_some(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
