//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("cms.api_base '{0}' is not a valid http(s) URL")]
    InvalidApiBase(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.cms.api_base) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidApiBase(config.cms.api_base.clone())),
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.lookup_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("lookup_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_collected() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.cms.api_base = "ftp://example.com".to_string();
        config.timeouts.lookup_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_https_api_base_is_accepted() {
        let mut config = GatewayConfig::default();
        config.cms.api_base = "https://cms.example.com/wp-json".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
