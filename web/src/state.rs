use crate::config::EnvConfig;
use anyhow::{Context, Result};
use liborgmap::Database;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug)]
pub struct SharedState {
    pub db: Database,
    pub config: EnvConfig,
}

impl SharedState {
    pub async fn new(env: EnvConfig) -> Result<Self> {
        trace!("Creating shared app state");
        Ok(Self {
            db: Database::open(&env.database)
                .await
                .with_context(|| format!("Unable to open database {}", &env.database))?,
            config: env,
        })
    }

    #[cfg(test)]
    pub fn test(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        use crate::config::ListenConfig;
        use tracing::debug;

        debug!("Creating test shared app state");
        Self {
            db: pool.into(),
            config: EnvConfig {
                listen: ListenConfig {
                    host: "127.0.0.1".to_string(),
                    port: 8080,
                },
                database: "test-database.sqlite".to_string(),
            },
        }
    }
}

pub type AppState = Arc<SharedState>;
