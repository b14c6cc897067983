use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration key {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Service metadata reported by `/estado`. Each key is optional at startup;
/// the status endpoint fails when one is missing.
#[derive(Debug, Clone, Default)]
pub struct SystemConfig {
    pub name: Option<String>,
    pub version: Option<String>,
    pub developer: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub secret_key: String,
    pub db: DbConfig,
    pub system: SystemConfig,
    pub host: String,
    pub port: u16,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("secret_key", &"<redacted>")
            .field("db", &self.db)
            .field("system", &self.system)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let db = DbConfig {
            host: required("PGSQL_HOST")?,
            port: parse_or(&lookup, "PGSQL_PORT", 5432)?,
            user: required("PGSQL_USER")?,
            password: required("PGSQL_PASSWORD")?,
            database: required("PGSQL_DATABASE")?,
            max_connections: parse_or(&lookup, "PGSQL_MAX_CONNECTIONS", 10)?,
        };
        let system = SystemConfig {
            name: lookup("SYSTEM_NAME"),
            version: lookup("SYSTEM_VERSION"),
            developer: lookup("DEVELOPER_NAME"),
            email: lookup("DEVELOPER_EMAIL"),
        };

        Ok(Self {
            secret_key: required("SECRET_KEY")?,
            db,
            system,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "APP_PORT", 5000)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("SECRET_KEY", "s3cret"),
            ("PGSQL_HOST", "db.local"),
            ("PGSQL_USER", "app"),
            ("PGSQL_PASSWORD", "hunter2"),
            ("PGSQL_DATABASE", "usuarios"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn applies_defaults() {
        let cfg = load(&base()).unwrap();
        assert_eq!(cfg.db.host, "db.local");
        assert_eq!(cfg.db.port, 5432);
        assert_eq!(cfg.db.max_connections, 10);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert!(cfg.system.name.is_none());
    }

    #[test]
    fn missing_required_key_is_reported() {
        let mut vars = base();
        vars.remove("PGSQL_PASSWORD");
        assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing("PGSQL_PASSWORD"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut vars = base();
        vars.insert("APP_PORT", "http");
        let err = load(&vars).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "APP_PORT", .. }));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = load(&base()).unwrap();
        let dbg = format!("{:?}", cfg);
        assert!(!dbg.contains("s3cret"));
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("db.local"));
    }
}
