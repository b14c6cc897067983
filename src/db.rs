use sqlx::{
    pool::PoolConnection,
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool, Postgres,
};
use tracing::error;

use crate::config::DbConfig;
use crate::error::RepoError;

/// Hands out one Postgres connection per repository call.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn connect_options(cfg: &DbConfig) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .username(&cfg.user)
            .password(&cfg.password)
            .database(&cfg.database)
    }

    /// Builds the pool without opening a session; connection errors surface on
    /// the first `get_connection`.
    pub fn connect_lazy(cfg: &DbConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect_lazy_with(Self::connect_options(cfg));
        Self { pool }
    }

    /// The connection goes back to the pool when the guard is dropped.
    pub async fn get_connection(&self) -> Result<PoolConnection<Postgres>, RepoError> {
        self.pool.acquire().await.map_err(|e| {
            error!(error = %e, "acquire connection failed");
            match RepoError::from(e) {
                RepoError::Unknown(msg) => RepoError::ConnectionFailure(msg),
                other => other,
            }
        })
    }
}
