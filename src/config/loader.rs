//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ClientConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_valid_config() {
        let path = std::env::temp_dir().join(format!(
            "submit-relay-loader-test-{}.toml",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"
endpoints = ["http://localhost:3000/post", "http://127.0.0.1:3000/post"]

[timeouts]
attempt_ms = 5000
probe_ms = 2000
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.timeouts.attempt_ms, 5000);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/submit-relay.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn invalid_values_surface_every_validation_error() {
        let path = std::env::temp_dir().join(format!(
            "submit-relay-loader-invalid-{}.toml",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"
endpoints = ["not a url"]

[timeouts]
attempt_ms = 0
probe_ms = 2000
"#,
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        fs::remove_file(&path).ok();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }
}
