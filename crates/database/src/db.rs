use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::{env, str::FromStr};

/// Connection settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub sql_logging: bool,
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;

    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `DATABASE_SQL_LOGGING`,
    /// loading a `.env` file first if one exists
    pub fn from_env() -> Result<Self, DbErr> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DbErr> {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| DbErr::Custom("DATABASE_URL is not set".to_owned()))?;

        let max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?
            .unwrap_or(Self::DEFAULT_MAX_CONNECTIONS);
        let sql_logging = parse_var(&lookup, "DATABASE_SQL_LOGGING")?.unwrap_or(false);

        Ok(Self {
            url,
            max_connections,
            sql_logging,
        })
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        options
            .max_connections(self.max_connections)
            .sqlx_logging(self.sql_logging);
        options
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, DbErr> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| DbErr::Custom(format!("{key} has an invalid value: {raw}")))
        })
        .transpose()
}

/// Creates a database connection
pub async fn create_connection() -> Result<DatabaseConnection, DbErr> {
    let config = DatabaseConfig::from_env()?;
    log::info!(
        "Connecting to database (max {} connections)",
        config.max_connections
    );
    Database::connect(config.connect_options()).await
}

#[cfg(test)]
mod test {
    use crate::db::DatabaseConfig;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config =
            DatabaseConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]))
                .unwrap();

        assert_eq!(config.url, "sqlite::memory:");
        assert_eq!(config.max_connections, 10);
        assert!(!config.sql_logging);
    }

    #[test]
    fn test_config_overrides() {
        let config = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/university"),
            ("DATABASE_MAX_CONNECTIONS", "3"),
            ("DATABASE_SQL_LOGGING", "true"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 3);
        assert!(config.sql_logging);
    }

    #[test]
    fn test_config_missing_url() {
        let err = DatabaseConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL is not set"));
    }

    #[test]
    fn test_config_invalid_number() {
        let err = DatabaseConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));
    }
}
