use anyhow::Context;
use serde::Deserialize;

/// Longest accepted session lifetime: one year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub cookie_secure: bool,
}

/// Credentials for the single admin account. `password_hash` is an argon2
/// PHC string; `None` disables admin login.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub session: SessionConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://gym.db?mode=rwc".into());
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "fitzone".into()),
            audience: std::env::var("SESSION_AUDIENCE").unwrap_or_else(|_| "fitzone-web".into()),
            ttl_minutes: session_ttl_minutes(std::env::var("SESSION_TTL_MINUTES").ok())?,
            cookie_secure: std::env::var("SESSION_COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        let admin = AdminConfig {
            username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            password_hash: std::env::var("ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        };

        Ok(Self {
            database_url,
            db_max_connections,
            session,
            admin,
        })
    }
}

fn session_ttl_minutes(raw: Option<String>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(60 * 12);
    };
    let minutes: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("SESSION_TTL_MINUTES is not a number: {raw}"))?;
    if !(1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) {
        anyhow::bail!(
            "SESSION_TTL_MINUTES must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}"
        );
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ttl_defaults_and_bounds() {
        assert_eq!(session_ttl_minutes(None).unwrap(), 720);
        assert_eq!(session_ttl_minutes(Some(" 30 ".into())).unwrap(), 30);
        assert!(session_ttl_minutes(Some("0".into())).is_err());
        assert!(session_ttl_minutes(Some("abc".into())).is_err());
        assert!(session_ttl_minutes(Some(i64::MAX.to_string())).is_err());
        assert!(session_ttl_minutes(Some((MAX_SESSION_TTL_MINUTES + 1).to_string())).is_err());
    }
}
