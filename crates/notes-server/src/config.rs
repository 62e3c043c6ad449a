//! Server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Minimum length of the HMAC secret used to sign tokens.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime: one year.
pub const MAX_JWT_EXPIRY_MINUTES: u64 = 365 * 24 * 60;

/// Where notes and users are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process memory; everything is lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                name: "STORAGE_BACKEND".to_string(),
                reason: format!("expected 'postgres' or 'memory', got '{}'", other),
            }),
        }
    }
}

/// Token signing settings.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret.
    pub secret: String,
    /// `iss` claim written and required.
    pub issuer: String,
    /// Token lifetime in minutes.
    pub expiry_minutes: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("expiry_minutes", &self.expiry_minutes)
            .finish_non_exhaustive()
    }
}

/// How the caller's identity is resolved for note requests.
#[derive(Debug, Clone)]
pub enum IdentityMode {
    /// Signed bearer token issued at login/registration.
    Token(JwtConfig),
    /// Plain `X-User-Id` header, trusted as-is. Demo mode only.
    Header,
}

impl IdentityMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Token(_) => "token",
            Self::Header => "header",
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Storage backend.
    pub storage: StorageBackend,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Identity resolution strategy.
    pub identity: IdentityMode,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `STORAGE_BACKEND`: `postgres` (default) or `memory`
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "http://localhost:5173")
    /// - `IDENTITY_MODE`: `token` (default) or `header`
    /// - `JWT_ISSUER`: Token issuer (default: "notes-api")
    /// - `JWT_EXPIRY_MINUTES`: Token lifetime (default: 60)
    ///
    /// Required in token mode:
    /// - `JWT_SECRET`: at least 32 bytes
    ///
    /// Database settings are read separately by `StoreConfig::from_env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match lookup("STORAGE_BACKEND") {
            Some(s) => s.parse()?,
            None => StorageBackend::Postgres,
        };

        let port = match lookup("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT".to_string(),
                reason: format!("'{}' is not a valid port", s),
            })?,
            None => 3000,
        };

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "http://localhost:5173".to_string());

        let mode = lookup("IDENTITY_MODE").unwrap_or_else(|| "token".to_string());
        let identity = match mode.trim().to_ascii_lowercase().as_str() {
            "token" => IdentityMode::Token(jwt_from_lookup(&lookup)?),
            "header" => IdentityMode::Header,
            other => {
                return Err(ConfigError::InvalidValue {
                    name: "IDENTITY_MODE".to_string(),
                    reason: format!("expected 'token' or 'header', got '{}'", other),
                });
            }
        };

        Ok(Self {
            storage,
            port,
            log_level,
            cors_allowed_origins,
            identity,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn jwt_from_lookup<F>(lookup: &F) -> Result<JwtConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secret =
        lookup("JWT_SECRET").ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
    if secret.len() < MIN_JWT_SECRET_LEN {
        return Err(ConfigError::InvalidValue {
            name: "JWT_SECRET".to_string(),
            reason: format!("must be at least {} bytes", MIN_JWT_SECRET_LEN),
        });
    }

    let issuer = lookup("JWT_ISSUER").unwrap_or_else(|| "notes-api".to_string());

    let expiry_minutes = match lookup("JWT_EXPIRY_MINUTES") {
        Some(s) => match s.parse::<u64>() {
            Ok(m) if (1..=MAX_JWT_EXPIRY_MINUTES).contains(&m) => m,
            _ => {
                return Err(ConfigError::InvalidValue {
                    name: "JWT_EXPIRY_MINUTES".to_string(),
                    reason: format!(
                        "'{}' is not between 1 and {} minutes",
                        s, MAX_JWT_EXPIRY_MINUTES
                    ),
                });
            }
        },
        None => 60,
    };

    Ok(JwtConfig {
        secret,
        issuer,
        expiry_minutes,
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_default_values() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", SECRET)])).unwrap();

        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "http://localhost:5173");
        match config.identity {
            IdentityMode::Token(jwt) => {
                assert_eq!(jwt.issuer, "notes-api");
                assert_eq!(jwt.expiry_minutes, 60);
            }
            IdentityMode::Header => panic!("expected token mode"),
        }
    }

    #[test]
    fn test_token_mode_requires_secret() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "JWT_SECRET"));

        let err = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "short")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_header_mode_needs_no_secret() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("IDENTITY_MODE", "Header"),
            ("STORAGE_BACKEND", "memory"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert!(matches!(config.identity, IdentityMode::Header));
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ServerConfig::from_lookup(lookup(&[("IDENTITY_MODE", "cookie")])).is_err());
        assert!(
            ServerConfig::from_lookup(lookup(&[("IDENTITY_MODE", "header"), ("PORT", "http")]))
                .is_err()
        );
        assert!(
            ServerConfig::from_lookup(lookup(&[
                ("JWT_SECRET", SECRET),
                ("JWT_EXPIRY_MINUTES", "0"),
            ]))
            .is_err()
        );
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_oversized_token_expiry_rejected() {
        for expiry in ["525601", "1000000000000", "18446744073709551615"] {
            let err = ServerConfig::from_lookup(lookup(&[
                ("JWT_SECRET", SECRET),
                ("JWT_EXPIRY_MINUTES", expiry),
            ]))
            .unwrap_err();
            match err {
                ConfigError::InvalidValue { name, .. } => assert_eq!(name, "JWT_EXPIRY_MINUTES"),
                other => panic!("unexpected error for {}: {:?}", expiry, other),
            }
        }

        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", SECRET),
            ("JWT_EXPIRY_MINUTES", "525600"),
        ]))
        .unwrap();
        match config.identity {
            IdentityMode::Token(jwt) => assert_eq!(jwt.expiry_minutes, MAX_JWT_EXPIRY_MINUTES),
            IdentityMode::Header => panic!("expected token mode"),
        }
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", SECRET)])).unwrap();
        assert!(!format!("{:?}", config).contains(SECRET));
    }
}
