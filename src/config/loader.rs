//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{LogFormat, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Load configuration from an optional TOML file, overlay the process
/// environment and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// Unset or empty variables leave the current value. An unparsable
/// `PORT` or `LOG_FORMAT` is ignored with a warning.
pub fn apply_env<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(user) = var("DB_USER") {
        config.database.user = user;
    }
    if let Some(password) = var("DB_PASS") {
        config.database.password = password;
    }
    if let Some(name) = var("DB_NAME") {
        config.database.name = name;
    }
    if let Some(address) = var("DB_ADDR") {
        config.database.address = address;
    }
    if let Some(port) = var("PORT") {
        match port.parse() {
            Ok(port) => config.listener.port = port,
            Err(_) => tracing::warn!(value = %port, "Ignoring invalid PORT"),
        }
    }
    if let Some(format) = var("LOG_FORMAT") {
        match format.to_ascii_lowercase().as_str() {
            "json" => config.logging.format = LogFormat::Json,
            "pretty" | "text" => config.logging.format = LogFormat::Pretty,
            _ => tracing::warn!(value = %format, "Ignoring invalid LOG_FORMAT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::service::MalformedIdPolicy;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_defaults() {
        let mut config = ServiceConfig::default();
        apply_env(
            &mut config,
            env(&[
                ("DB_USER", "kba"),
                ("DB_PASS", "secret"),
                ("DB_NAME", "kba"),
                ("DB_ADDR", "db:5433"),
                ("PORT", "9000"),
                ("LOG_FORMAT", "json"),
            ]),
        );

        assert_eq!(config.database.user, "kba");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.name, "kba");
        assert_eq!(config.database.host_and_port(), Some(("db", 5433)));
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port_keeps_default() {
        let mut config = ServiceConfig::default();
        apply_env(&mut config, env(&[("PORT", "http"), ("DB_USER", "")]));
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.database.user, "postgres");
    }

    #[test]
    fn test_parse_partial_file() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            port = 3000

            [service]
            malformed_id = "not_found"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.database.address, "localhost:5432");
        assert_eq!(config.service.malformed_id, MalformedIdPolicy::NotFound);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/vehicle-service.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![ValidationError::ZeroPoolSize, ValidationError::EmptyDatabaseName]);
        assert_eq!(
            err.to_string(),
            "Validation failed: database.pool_size must be greater than zero, database.name must not be empty"
        );
    }
}
