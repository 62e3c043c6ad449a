//! Authentication module: JWT token management and password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use notes_core::{OwnerId, User, UserId};
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::ApiError;

/// JWT claims.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID (subject).
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Issuer.
    pub iss: String,
    /// Expiration time (unix timestamp).
    pub exp: usize,
    /// Issued at (unix timestamp).
    pub iat: usize,
}

impl Claims {
    /// The user this token was issued to.
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        self.sub
            .parse()
            .map_err(|_| ApiError::Unauthenticated("Invalid token subject".to_string()))
    }

    /// Owner identity for note access.
    pub fn owner_id(&self) -> Result<OwnerId, ApiError> {
        Ok(self.user_id()?.owner_id())
    }
}

/// A freshly minted token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    expiry_minutes: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("expiry_minutes", &self.expiry_minutes)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            expiry_minutes: i64::try_from(config.expiry_minutes).unwrap_or(i64::MAX),
        }
    }

    /// Create a JWT token for a user.
    pub fn issue(&self, user: &User) -> Result<IssuedToken, ApiError> {
        let now = Utc::now();
        let expires_at = TimeDelta::try_minutes(self.expiry_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                ApiError::Internal(format!(
                    "Token lifetime of {} minutes is out of range",
                    self.expiry_minutes
                ))
            })?;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a JWT token and return claims.
    ///
    /// Signature, issuer and expiry are all checked.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            ApiError::Unauthenticated(format!("Invalid token: {}", e))
        })?;

        Ok(token_data.claims)
    }
}

/// Argon2id password hashing with configurable cost.
#[derive(Clone)]
pub struct Passwords {
    argon2: Argon2<'static>,
}

impl Default for Passwords {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl std::fmt::Debug for Passwords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Passwords").finish_non_exhaustive()
    }
}

impl Passwords {
    /// Argon2id with explicit memory (KiB), iteration and parallelism costs.
    pub fn with_cost(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, ApiError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| ApiError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password using Argon2 with a random salt.
    pub fn hash(&self, password: &str) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(password_hash.to_string())
    }

    /// Verify a password against a hash.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, ApiError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| ApiError::Internal(format!("Invalid password hash: {}", e)))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            issuer: "notes-api".to_string(),
            expiry_minutes: 60,
        }
    }

    fn user() -> User {
        User {
            id: UserId::new(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            created_at: notes_core::now(),
        }
    }

    fn fast() -> Passwords {
        Passwords::with_cost(1024, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify_password() {
        let passwords = fast();
        let password = "test_password_123";
        let hash = passwords.hash(password).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(passwords.verify(password, &hash).unwrap());
        assert!(!passwords.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let passwords = fast();
        assert_ne!(passwords.hash("same").unwrap(), passwords.hash("same").unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(fast().verify("pw", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_issue_and_verify_token() {
        let issuer = TokenIssuer::new(&jwt_config("test_secret_key_12345_test_secret"));
        let user = user();

        let issued = issuer.issue(&user).unwrap();
        let claims = issuer.verify(&issued.token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.owner_id().unwrap(), user.id.owner_id());
        assert!(issued.expires_at > Utc::now());
    }

    #[test]
    fn test_issue_with_out_of_range_lifetime_fails() {
        for expiry_minutes in [u64::MAX, 1_000_000_000_000] {
            let mut config = jwt_config("lifetime-secret-lifetime-secret-life");
            config.expiry_minutes = expiry_minutes;
            let issuer = TokenIssuer::new(&config);
            assert!(matches!(issuer.issue(&user()), Err(ApiError::Internal(_))));
        }
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let a = TokenIssuer::new(&jwt_config("secret-one-secret-one-secret-one-1"));
        let b = TokenIssuer::new(&jwt_config("secret-two-secret-two-secret-two-2"));
        let token = a.issue(&user()).unwrap().token;
        assert!(matches!(b.verify(&token), Err(ApiError::Unauthenticated(_))));
    }

    #[test]
    fn test_verify_token_wrong_issuer() {
        let secret = "shared-secret-shared-secret-shared";
        let issuer = TokenIssuer::new(&jwt_config(secret));
        let mut other = jwt_config(secret);
        other.issuer = "someone-else".to_string();
        let token = TokenIssuer::new(&other).issue(&user()).unwrap().token;
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn test_verify_expired_token() {
        let secret = "expiry-secret-expiry-secret-expiry";
        let past = Utc::now().timestamp() as usize - 7200;
        let claims = Claims {
            sub: UserId::new().to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            iss: "notes-api".to_string(),
            exp: past + 3600,
            iat: past,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let issuer = TokenIssuer::new(&jwt_config(secret));
        assert!(matches!(issuer.verify(&token), Err(ApiError::Unauthenticated(_))));
    }

    #[test]
    fn test_verify_garbage() {
        let issuer = TokenIssuer::new(&jwt_config("garbage-secret-garbage-secret-garb"));
        assert!(issuer.verify("not.a.jwt").is_err());
        assert!(issuer.verify("").is_err());
    }
}
