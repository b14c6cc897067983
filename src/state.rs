use crate::config::AppConfig;
use crate::db::Database;
use crate::users::{PgUserRepository, UserRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init(config: AppConfig) -> Self {
        let db = Database::connect_lazy(&config.db);
        let users = Arc::new(PgUserRepository::new(db)) as Arc<dyn UserRepository>;
        Self::from_parts(users, Arc::new(config))
    }

    pub fn from_parts(users: Arc<dyn UserRepository>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }
}

#[cfg(test)]
impl AppState {
    /// In-memory users and fixed metadata.
    pub fn fake() -> Self {
        use crate::config::{DbConfig, SystemConfig};
        use crate::users::repo::memory::MemoryUserRepository;

        let config = AppConfig {
            secret_key: "test".into(),
            db: DbConfig {
                host: "localhost".into(),
                port: 5432,
                user: "postgres".into(),
                password: "postgres".into(),
                database: "postgres".into(),
                max_connections: 1,
            },
            system: SystemConfig {
                name: Some("usuarios".into()),
                version: Some("1.0.0".into()),
                developer: Some("Equipo Usuarios".into()),
                email: Some("equipo@example.com".into()),
            },
            host: "127.0.0.1".into(),
            port: 0,
        };
        Self::from_parts(Arc::new(MemoryUserRepository::default()), Arc::new(config))
    }

    pub fn with_users(self, users: Arc<dyn UserRepository>) -> Self {
        Self { users, ..self }
    }

    pub fn with_config(self, config: Arc<AppConfig>) -> Self {
        Self { config, ..self }
    }
}
