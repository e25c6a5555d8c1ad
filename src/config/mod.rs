use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub admin: AdminConfig,
    pub mail: MailConfig,
    pub cors_origins: Vec<String>,
}

/// Admin credential material. Every field is optional so that a missing
/// variable surfaces as a configuration error at request time instead of
/// preventing the public routes from starting.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct AdminConfig {
    pub password: Option<String>,
    pub password_hash: Option<String>,
    pub secret_key: Option<String>,
    pub session_ttl_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_name: Option<String>,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            server_host: optional("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port: optional("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            api_base_uri: optional("API_BASE_URI").unwrap_or_else(|| "/api/v1".into()),
            admin: AdminConfig {
                password: optional("ADMIN_PASSWORD"),
                password_hash: optional("ADMIN_PASSWORD_HASH"),
                secret_key: optional("ADMIN_SECRET_KEY"),
                session_ttl_secs: session_ttl_secs(
                    optional("SESSION_TTL_HOURS").as_deref(),
                ),
            },
            mail: MailConfig {
                smtp_host: optional("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".into()),
                smtp_port: optional("SMTP_PORT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(587),
                username: optional("EMAIL_USER").unwrap_or_default(),
                password: optional("EMAIL_PASS").unwrap_or_default(),
                from_name: optional("MAIL_FROM_NAME"),
                timeout_secs: optional("MAIL_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(20),
            },
            cors_origins: parse_origins(
                &optional("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:5173".into()),
            ),
        })
    }
}

impl AdminConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl MailConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Mailbox used as `From:` on every outgoing mail.
    pub fn sender(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.username),
            None => self.username.clone(),
        }
    }

    /// The owner inbox that receives contact form notifications.
    pub fn owner_address(&self) -> &str {
        &self.username
    }
}

/// Unset and blank variables are treated the same.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

/// `SESSION_TTL_HOURS` in seconds. Unparsable, zero or overflowing values
/// fall back to 24 hours.
fn session_ttl_secs(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().trim_end_matches('h').parse::<u64>().ok())
        .filter(|&hours| hours > 0)
        .and_then(|hours| hours.checked_mul(3600))
        .filter(|&secs| i64::try_from(secs).is_ok())
        .unwrap_or(DEFAULT_SESSION_TTL_HOURS * 3600)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
