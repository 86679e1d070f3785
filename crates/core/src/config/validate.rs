use super::{types::WidgetConfig, ConfigError};

/// Validate configuration
/// Currently validates:
/// - max_results is not 0
/// - the selector is not blank
/// - at least one trigger event is configured
/// - an attach timeout, when set, is not 0
pub fn validate_config(config: &WidgetConfig) -> Result<(), ConfigError> {
    if config.max_results == 0 {
        return Err(ConfigError::ValidationError(
            "max_results cannot be 0".to_string(),
        ));
    }

    if config.selector.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "selector cannot be empty".to_string(),
        ));
    }

    if config.trigger.events.iter().all(|event| event.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "trigger.events must name at least one event".to_string(),
        ));
    }

    if config.attach_timeout_ms == Some(0) {
        return Err(ConfigError::ValidationError(
            "attach_timeout_ms cannot be 0; omit it to wait indefinitely".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriggerConfig;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&WidgetConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_max_results_fails() {
        let config = WidgetConfig {
            max_results: 0,
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_no_trigger_events_fails() {
        let config = WidgetConfig {
            trigger: TriggerConfig { events: vec![] },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let config = WidgetConfig {
            trigger: TriggerConfig {
                events: vec!["  ".to_string()],
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_blank_selector_fails() {
        let config = WidgetConfig {
            selector: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_zero_attach_timeout_fails() {
        let config = WidgetConfig {
            attach_timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());

        let config = WidgetConfig {
            attach_timeout_ms: Some(250),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }
}
