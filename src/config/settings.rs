use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://api.agentforge.dev";
pub const DEFAULT_SANDBOX_TEMPLATE: &str = "code-interpreter";
pub const DEFAULT_SANDBOX_TIMEOUT_SECONDS: u64 = 3600;

/// Client settings for the agent platform backend. The bearer token is
/// consumed opaquely; agentforge never mints or refreshes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub api_base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_sandbox_template")]
    pub sandbox_template_id: String,
    #[serde(default = "default_sandbox_timeout")]
    pub sandbox_timeout_seconds: u64,
}

fn default_sandbox_template() -> String {
    DEFAULT_SANDBOX_TEMPLATE.to_string()
}

fn default_sandbox_timeout() -> u64 {
    DEFAULT_SANDBOX_TIMEOUT_SECONDS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            api_token: None,
            sandbox_template_id: default_sandbox_template(),
            sandbox_timeout_seconds: default_sandbox_timeout(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Settings(
                "api_base_url must be non-empty".to_string(),
            ));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::Settings(format!(
                "api_base_url must use http or https, got `{base}`"
            )));
        }
        if self.sandbox_template_id.trim().is_empty() {
            return Err(ConfigError::Settings(
                "sandbox_template_id must be non-empty".to_string(),
            ));
        }
        if self.sandbox_timeout_seconds < 1 {
            return Err(ConfigError::Settings(
                "sandbox_timeout_seconds must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_parse_fills_sandbox_defaults() {
        let settings: Settings = serde_yaml::from_str(
            r#"
api_base_url: https://backend.example.com
api_token: tok-123
"#,
        )
        .expect("parse settings");
        assert_eq!(settings.sandbox_template_id, DEFAULT_SANDBOX_TEMPLATE);
        assert_eq!(
            settings.sandbox_timeout_seconds,
            DEFAULT_SANDBOX_TIMEOUT_SECONDS
        );
        settings.validate().expect("validation succeeds");
    }

    #[test]
    fn settings_validation_rejects_blank_or_non_http_base_url() {
        let mut settings = Settings::default();
        settings.api_base_url = "  ".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Settings(message)) if message.contains("non-empty")
        ));

        settings.api_base_url = "ftp://backend.example.com".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Settings(message)) if message.contains("http")
        ));
    }

    #[test]
    fn settings_validation_rejects_zero_sandbox_timeout() {
        let mut settings = Settings::default();
        settings.sandbox_timeout_seconds = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Settings(message)) if message.contains("sandbox_timeout_seconds")
        ));
    }

    #[test]
    fn settings_reject_unknown_fields() {
        let err = serde_yaml::from_str::<Settings>(
            r#"
api_base_url: https://backend.example.com
legacy_field: true
"#,
        )
        .expect_err("unknown field must fail");
        assert!(err.to_string().contains("unknown field"));
    }
}
