use crate::wizard::draft::{AgentType, Architecture, LlmSettings};

pub const TEMPERATURE_MIN: f64 = 0.0;
pub const TEMPERATURE_MAX: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentTypeOption {
    pub value: AgentType,
    pub label: &'static str,
    pub summary: &'static str,
}

pub const AGENT_TYPE_OPTIONS: [AgentTypeOption; 3] = [
    AgentTypeOption {
        value: AgentType::Textual,
        label: "Textual",
        summary: "Chat agent answering over text",
    },
    AgentTypeOption {
        value: AgentType::Voice,
        label: "Voice",
        summary: "Speech agent (opens the voice studio)",
    },
    AgentTypeOption {
        value: AgentType::Coding,
        label: "Coding",
        summary: "Code agent with a provisioned sandbox",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchitectureOption {
    pub value: Architecture,
    pub label: &'static str,
    pub summary: &'static str,
}

pub const ARCHITECTURE_OPTIONS: [ArchitectureOption; 2] = [
    ArchitectureOption {
        value: Architecture::Mono,
        label: "Single agent",
        summary: "One agent handles every request",
    },
    ArchitectureOption {
        value: Architecture::Multi,
        label: "Multi agent",
        summary: "Composed team (opens the workflow builder)",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkOption {
    pub id: &'static str,
    pub label: &'static str,
    /// Only frameworks with a full configuration form collect LLM settings;
    /// the rest show a placeholder step and proceed with defaults.
    pub has_configuration_form: bool,
}

const MONO_FRAMEWORKS: [FrameworkOption; 3] = [
    FrameworkOption {
        id: "langchain",
        label: "LangChain",
        has_configuration_form: true,
    },
    FrameworkOption {
        id: "llama_index",
        label: "LlamaIndex",
        has_configuration_form: false,
    },
    FrameworkOption {
        id: "agno",
        label: "Agno",
        has_configuration_form: false,
    },
];

pub fn framework_options(architecture: Architecture) -> &'static [FrameworkOption] {
    match architecture {
        Architecture::Mono => &MONO_FRAMEWORKS,
        // Multi-agent drafts exit to the workflow builder before the
        // framework step, so no catalog exists for them.
        Architecture::Multi => &[],
    }
}

pub fn framework_option(architecture: Architecture, id: &str) -> Option<FrameworkOption> {
    framework_options(architecture)
        .iter()
        .copied()
        .find(|option| option.id == id)
}

/// Everything the LangChain configuration form collects in one submit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigureForm {
    pub name: String,
    pub description: String,
    pub settings: LlmSettings,
}

/// Field-level validation failure; blocks the configure step's own submit,
/// never the wizard as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

pub fn validate_configure_form(form: &ConfigureForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if form.settings.api_key.trim().is_empty() {
        errors.push(FieldError {
            field: "api_key",
            message: "API key must be non-empty".to_string(),
        });
    }
    let temperature = form.settings.temperature;
    if !temperature.is_finite() || !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&temperature) {
        errors.push(FieldError {
            field: "temperature",
            message: format!("temperature must be between {TEMPERATURE_MIN} and {TEMPERATURE_MAX}"),
        });
    }
    if let Some(mcp) = &form.settings.mcp {
        if mcp.enabled && mcp.url.trim().is_empty() {
            errors.push(FieldError {
                field: "mcp_url",
                message: "MCP adapter URL must be non-empty when the adapter is enabled"
                    .to_string(),
            });
        }
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
    use crate::wizard::draft::{McpAdapterConfig, McpTransport};

    fn valid_form() -> ConfigureForm {
        let mut form = ConfigureForm::default();
        form.name = "weather-bot".to_string();
        form.settings.api_key = "sk-test".to_string();
        form.settings.provider_id = "groq".to_string();
        form.settings.model_id = "llama-3.1-70b".to_string();
        form
    }

    #[test]
    fn only_langchain_carries_a_configuration_form() {
        let with_form: Vec<&str> = framework_options(Architecture::Mono)
            .iter()
            .filter(|option| option.has_configuration_form)
            .map(|option| option.id)
            .collect();
        assert_eq!(with_form, vec!["langchain"]);
        assert!(framework_options(Architecture::Multi).is_empty());
    }

    #[test]
    fn configure_validation_accepts_a_complete_form() {
        assert!(validate_configure_form(&valid_form()).is_ok());
    }

    #[test]
    fn configure_validation_flags_blank_api_key() {
        let mut form = valid_form();
        form.settings.api_key = "  ".to_string();
        let errors = validate_configure_form(&form).expect_err("blank key must fail");
        assert!(errors.iter().any(|err| err.field == "api_key"));
    }

    #[test]
    fn configure_validation_flags_out_of_range_temperature() {
        for bad in [-0.1, 2.5, f64::NAN] {
            let mut form = valid_form();
            form.settings.temperature = bad;
            let errors = validate_configure_form(&form).expect_err("bad temperature must fail");
            assert!(errors.iter().any(|err| err.field == "temperature"));
        }
        let mut edge = valid_form();
        edge.settings.temperature = 2.0;
        assert!(validate_configure_form(&edge).is_ok());
    }

    #[test]
    fn configure_validation_requires_mcp_url_only_when_enabled() {
        let mut form = valid_form();
        form.settings.mcp = Some(McpAdapterConfig {
            enabled: false,
            transport: McpTransport::Sse,
            url: String::new(),
        });
        assert!(validate_configure_form(&form).is_ok());

        form.settings.mcp = Some(McpAdapterConfig {
            enabled: true,
            transport: McpTransport::Http,
            url: "  ".to_string(),
        });
        let errors = validate_configure_form(&form).expect_err("enabled mcp needs url");
        assert!(errors.iter().any(|err| err.field == "mcp_url"));
    }
}
