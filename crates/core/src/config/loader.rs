use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::WidgetConfig, ConfigError};

const HOST_VARIABLES: [&str; 3] = ["config", "data", "metrics"];

/// Load configuration from file with environment variable overrides.
///
/// Nested keys are addressed with a double underscore, e.g.
/// `AUTOCOMPLETE_DATA__CACHE=false`. The host binary's own variables
/// (`AUTOCOMPLETE_CONFIG`, `AUTOCOMPLETE_DATA`, `AUTOCOMPLETE_METRICS`) are
/// not configuration keys.
pub fn load_config(path: &Path) -> Result<WidgetConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: WidgetConfig = Figment::new()
        .merge(Toml::file(path))
        .merge(
            Env::prefixed("AUTOCOMPLETE_")
                .ignore(&HOST_VARIABLES)
                .split("__"),
        )
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<WidgetConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
threshold = 1
max_results = 8
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.threshold, 1);
        assert_eq!(config.max_results, 8);
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
max_results = "many"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/autocomplete.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r##"
selector = "#city"
highlight = true

[data]
key = "city"
src = [{{ city = "Oslo" }}, {{ city = "Lisbon" }}]
"##
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.selector, "#city");
        assert!(config.highlight);
        assert_eq!(config.data.key.as_deref(), Some("city"));
        assert_eq!(config.data.src.map(|src| src.len()), Some(2));
    }
}
