//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Returns all
//! violations, not just the first, so a bad config file can be fixed in
//! one pass.

use std::fmt;

use crate::config::schema::ForwarderConfig;

/// A single semantic violation in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    ZeroConnectTimeout,
    ZeroRequestTimeout,
    ZeroResponseCap,
    EmptyUserAgent,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroConnectTimeout => {
                write!(f, "timeouts.connect_secs must be greater than zero")
            }
            ValidationError::ZeroRequestTimeout => {
                write!(f, "timeouts.request_secs must be greater than zero")
            }
            ValidationError::ZeroResponseCap => {
                write!(f, "limits.max_response_bytes must be greater than zero")
            }
            ValidationError::EmptyUserAgent => {
                write!(f, "wire.user_agent must not be empty when set")
            }
        }
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ForwarderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.limits.max_response_bytes == 0 {
        errors.push(ValidationError::ZeroResponseCap);
    }
    if matches!(&config.wire.user_agent, Some(agent) if agent.is_empty()) {
        errors.push(ValidationError::EmptyUserAgent);
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
        assert!(validate_config(&ForwarderConfig::default()).is_ok());
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut config = ForwarderConfig::default();
        config.timeouts.connect_secs = 0;
        config.timeouts.request_secs = 0;
        config.limits.max_response_bytes = 0;
        config.wire.user_agent = Some(String::new());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(errors.contains(&ValidationError::EmptyUserAgent));
    }
}
