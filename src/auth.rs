//! Session authenticator for the single admin role.
//!
//! Sessions are HS256 JWTs signed with the configured admin secret. Nothing
//! about a session is stored server-side: a token is valid as long as its
//! signature verifies and its `exp` lies in the future.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::AdminConfig;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminClaims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: i64,
    pub max_age: Duration,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("admin credentials are not configured: {0}")]
    NotConfigured(&'static str),

    #[error("failed to issue session token: {0}")]
    TokenIssue(#[from] jsonwebtoken::errors::Error),

    #[error("failed to verify password hash: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

enum Credential {
    Plain(String),
    Bcrypt(String),
}

pub struct Authenticator {
    credential: Option<Credential>,
    secret: Option<String>,
    ttl: Duration,
}

impl Authenticator {
    pub fn new(config: &AdminConfig) -> Self {
        let credential = match (&config.password_hash, &config.password) {
            (Some(hash), _) => Some(Credential::Bcrypt(hash.clone())),
            (None, Some(password)) => Some(Credential::Plain(password.clone())),
            (None, None) => None,
        };

        Self {
            credential,
            secret: config.secret_key.clone(),
            ttl: config.session_ttl(),
        }
    }

    fn secret(&self) -> Result<&str, AuthError> {
        self.secret
            .as_deref()
            .ok_or(AuthError::NotConfigured("ADMIN_SECRET_KEY"))
    }

    /// Checks the password and issues a session token on match.
    pub fn login(&self, password: &str) -> Result<SessionToken, AuthError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(AuthError::NotConfigured("ADMIN_PASSWORD"))?;
        let secret = self.secret()?;

        let matches = match credential {
            Credential::Plain(expected) => constant_time_eq(password, expected),
            Credential::Bcrypt(hash) => bcrypt::verify(password, hash)?,
        };

        if !matches {
            tracing::warn!("admin login rejected");
            return Err(AuthError::Unauthorized);
        }

        let session = issue_token(secret, self.ttl)?;
        tracing::info!(expires_at = session.expires_at, "admin session issued");
        Ok(session)
    }

    /// Gate for protected operations. Missing, malformed, forged and expired
    /// tokens all yield `Unauthorized`.
    pub fn authorize(&self, token: Option<&str>) -> Result<AdminClaims, AuthError> {
        let secret = self.secret()?;
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::Unauthorized)?;

        let claims = verify_token(token, secret).map_err(|e| {
            tracing::debug!("session token rejected: {}", e);
            AuthError::Unauthorized
        })?;

        if claims.role != ADMIN_ROLE {
            return Err(AuthError::Unauthorized);
        }

        Ok(claims)
    }
}

pub fn issue_token(secret: &str, ttl: Duration) -> Result<SessionToken, AuthError> {
    let now = Utc::now().timestamp();
    let expires_at = now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));

    let claims = AdminClaims {
        sub: ADMIN_ROLE.to_string(),
        role: ADMIN_ROLE.to_string(),
        iat: now,
        exp: expires_at,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(SessionToken {
        token,
        expires_at,
        max_age: ttl,
    })
}

fn verify_token(token: &str, secret: &str) -> Result<AdminClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(data.claims)
}

/// Compares fixed-size digests so the running time does not depend on where
/// the inputs first differ, nor on their lengths.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = Sha256::digest(a.as_bytes());
    let b = Sha256::digest(b.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AdminConfig {
        AdminConfig {
            password: Some("hunter2".into()),
            password_hash: None,
            secret_key: Some("s3cret-key".into()),
            session_ttl_secs: 24 * 3600,
        }
    }

    #[test]
    fn login_issues_token_for_the_configured_password() {
        let auth = Authenticator::new(&config());
        let session = auth.login("hunter2").unwrap();
        assert_eq!(session.max_age, Duration::from_secs(86_400));

        let claims = auth.authorize(Some(&session.token)).unwrap();
        assert_eq!(claims.role, ADMIN_ROLE);
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn login_rejects_every_other_string() {
        let auth = Authenticator::new(&config());
        for attempt in ["", "hunter", "hunter22", "HUNTER2", " hunter2", "s3cret-key"] {
            assert!(
                matches!(auth.login(attempt), Err(AuthError::Unauthorized)),
                "{attempt:?} should be rejected"
            );
        }
    }

    #[test]
    fn login_accepts_bcrypt_hash_credential() {
        let hash = bcrypt::hash("hunter2", 4).unwrap();
        let auth = Authenticator::new(&AdminConfig {
            password: None,
            password_hash: Some(hash),
            ..config()
        });
        assert!(auth.login("hunter2").is_ok());
        assert!(matches!(auth.login("wrong"), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn missing_configuration_fails_closed() {
        let no_secret = Authenticator::new(&AdminConfig {
            secret_key: None,
            ..config()
        });
        assert!(matches!(no_secret.login("hunter2"), Err(AuthError::NotConfigured(_))));
        assert!(matches!(no_secret.authorize(Some("anything")), Err(AuthError::NotConfigured(_))));
        assert!(matches!(no_secret.authorize(None), Err(AuthError::NotConfigured(_))));

        let no_password = Authenticator::new(&AdminConfig {
            password: None,
            ..config()
        });
        assert!(matches!(no_password.login("hunter2"), Err(AuthError::NotConfigured(_))));
    }

    #[test]
    fn authorize_rejects_missing_forged_and_expired_tokens() {
        let auth = Authenticator::new(&config());

        assert!(matches!(auth.authorize(None), Err(AuthError::Unauthorized)));
        assert!(matches!(auth.authorize(Some("")), Err(AuthError::Unauthorized)));
        assert!(matches!(auth.authorize(Some("not-a-jwt")), Err(AuthError::Unauthorized)));

        let forged = issue_token("other-secret", Duration::from_secs(3600)).unwrap();
        assert!(matches!(auth.authorize(Some(&forged.token)), Err(AuthError::Unauthorized)));

        let expired = expired_token("s3cret-key");
        assert!(matches!(auth.authorize(Some(&expired)), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn authorize_is_repeatable() {
        let auth = Authenticator::new(&config());
        let session = auth.login("hunter2").unwrap();
        let first = auth.authorize(Some(&session.token)).unwrap();
        let second = auth.authorize(Some(&session.token)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn constant_time_eq_compares_content() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(constant_time_eq("", ""));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
    }

    fn expired_token(secret: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: ADMIN_ROLE.into(),
            role: ADMIN_ROLE.into(),
            iat: now - 2 * 86_400,
            exp: now - 86_400,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }
}
