// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{
    DatabaseSettings, LogFormat, LoggingSettings, ServerSettings, Settings, StorageBackend,
};

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, `config.toml`,
/// `config.<APP_ENV>.toml` (`APP_ENV` defaults to `dev`), then environment
/// variables such as `APP_DATABASE__HOST` or `APP_SERVER__PORT`. Both files
/// are optional.
pub fn load_config() -> Result<Settings, ConfigError> {
    let env = std::env::var("APP_ENV")
        .unwrap_or_else(|_| "dev".to_string())
        .to_lowercase();

    let builder = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::File::with_name(&format!("config.{env}")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;
    Ok(settings)
}

/// Rejects settings that would only fail later, at bind or connect time.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.server.port == 0 {
        return Err(ConfigError::ValidationError("server.port must be non-zero".into()));
    }
    if settings.storage == StorageBackend::Postgres {
        let db = &settings.database;
        if db.host.trim().is_empty() || db.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.host and database.name are required for postgres storage".into(),
            ));
        }
        if db.max_connections == 0 || db.min_connections > db.max_connections {
            return Err(ConfigError::ValidationError(format!(
                "invalid pool size: min_connections={} max_connections={}",
                db.min_connections, db.max_connections
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Settings {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let settings = from_toml("");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.storage, StorageBackend::Postgres);
        assert_eq!(settings.database.max_connections, 100);
        assert_eq!(settings.database.min_connections, 20);
        assert_eq!(settings.database.max_lifetime().as_secs(), 1800);
        assert_eq!(settings.logging.format, LogFormat::Pretty);
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let settings = from_toml(
            r#"
            storage = "memory"

            [server]
            port = 9000

            [database]
            host = "db.internal"
            sslmode = "require"

            [logging]
            format = "json"
            "#,
        );
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert_eq!(settings.database.host, "db.internal");
        assert_eq!(settings.database.port, 5432);
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    #[test]
    fn connection_string_masks_password() {
        let db = DatabaseSettings {
            password: "hunter2".into(),
            ..DatabaseSettings::default()
        };
        let dsn = db.connection_string();
        assert_eq!(
            dsn,
            "host=localhost port=5432 dbname=campus user=postgres password=**** sslmode=disable"
        );
        assert!(!dsn.contains("hunter2"));
    }

    #[test]
    fn validate_rejects_bad_pool_and_port() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(matches!(validate(&settings), Err(ConfigError::ValidationError(_))));

        let mut settings = Settings::default();
        settings.database.min_connections = 200;
        assert!(validate(&settings).is_err());

        // Pool settings are irrelevant without postgres.
        settings.storage = StorageBackend::Memory;
        assert!(validate(&settings).is_ok());
    }
}
