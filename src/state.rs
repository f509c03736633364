use crate::config::AppConfig;
use crate::db;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url, config.db_max_connections).await?;
        db::migrate(&db).await?;

        if config.admin.password_hash.is_none() {
            tracing::warn!("ADMIN_PASSWORD_HASH not set; admin login is disabled");
        }

        Ok(Self { db, config })
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// In-memory database, fixed session secret and an admin account
    /// `admin` / `admin-pass`.
    #[cfg(test)]
    pub async fn fake() -> Self {
        use crate::config::{AdminConfig, SessionConfig};

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            db_max_connections: 1,
            session: SessionConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                cookie_secure: false,
            },
            admin: AdminConfig {
                username: "admin".into(),
                password_hash: Some(
                    crate::auth::password::hash_password("admin-pass").expect("hash admin"),
                ),
            },
        });
        Self::from_parts(db::in_memory().await, config)
    }
}
