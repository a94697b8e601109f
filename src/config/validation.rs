//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every endpoint is a usable http(s) URL
//! - Validate value ranges (timeouts > 0)
//!
//! Validation is a pure function over the parsed config and returns all
//! errors, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("endpoint list must not be empty")]
    NoEndpoints,

    #[error("endpoint '{endpoint}' is not a valid http(s) URL: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("{field} must be positive")]
    ZeroTimeout { field: &'static str },
}

/// Validate a parsed config, collecting every error.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.endpoints.is_empty() {
        errors.push(ValidationError::NoEndpoints);
    }
    for endpoint in &config.endpoints {
        match Url::parse(endpoint) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidEndpoint {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.timeouts.attempt_ms == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.attempt_ms",
        });
    }
    if config.timeouts.probe_ms == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "timeouts.probe_ms",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
