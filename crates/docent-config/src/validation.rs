// SPDX-FileCopyrightText: 2026 Docent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as URL schemes, value ranges, and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::DocentConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &DocentConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.service.log_level
            ),
        });
    }

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    if let Some(endpoint) = &config.azure.endpoint {
        validate_url("azure.endpoint", endpoint, &mut errors);
    }

    if config.azure.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "azure.timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(endpoint) = &config.search.endpoint {
        validate_url("search.endpoint", endpoint, &mut errors);
    }

    if !(1..=5).contains(&config.search.strictness) {
        errors.push(ConfigError::Validation {
            message: format!(
                "search.strictness must be between 1 and 5, got {}",
                config.search.strictness
            ),
        });
    }

    if config.search.top_n_documents == 0 {
        errors.push(ConfigError::Validation {
            message: "search.top_n_documents must be at least 1".to_string(),
        });
    }

    if config.feedback.store_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "feedback.store_path must not be empty".to_string(),
        });
    }

    for (key, value) in [
        ("guide.max_tokens", config.guide.max_tokens),
        ("feedback.analysis_max_tokens", config.feedback.analysis_max_tokens),
        ("feedback.script_max_tokens", config.feedback.script_max_tokens),
    ] {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be at least 1"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_url(key: &str, value: &str, errors: &mut Vec<ConfigError>) {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("{key} must be an http(s) URL, got `{value}`"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = DocentConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = DocentConfig::default();
        config.service.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn non_http_endpoint_fails_validation() {
        let mut config = DocentConfig::default();
        config.azure.endpoint = Some("example.openai.azure.com".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("azure.endpoint"))));
    }

    #[test]
    fn out_of_range_strictness_fails_validation() {
        let mut config = DocentConfig::default();
        config.search.strictness = 9;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("strictness"))));
    }

    #[test]
    fn empty_store_path_fails_validation() {
        let mut config = DocentConfig::default();
        config.feedback.store_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("store_path"))));
    }

    #[test]
    fn sections_deny_unknown_fields() {
        let toml_str = r#"
[azure]
endpoint = "https://example.openai.azure.com"
unknown_field = "bad"
"#;
        let result = toml::from_str::<DocentConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = DocentConfig::default();
        config.service.log_level = "loud".to_string();
        config.search.strictness = 0;
        config.feedback.store_path = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
