use crate::wizard::tools::{
    new_param, new_tool, ParamKind, ParamPair, ToolDefinition, ToolField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Textual,
    Voice,
    Coding,
}

impl AgentType {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentType::Textual => "textual",
            AgentType::Voice => "voice",
            AgentType::Coding => "coding",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Mono,
    Multi,
}

impl Architecture {
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::Mono => "mono",
            Architecture::Multi => "multi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpTransport {
    Sse,
    Http,
}

impl McpTransport {
    pub fn as_str(self) -> &'static str {
        match self {
            McpTransport::Sse => "sse",
            McpTransport::Http => "http",
        }
    }
}

/// Optional remote tool-serving endpoint, forwarded opaquely to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpAdapterConfig {
    pub enabled: bool,
    pub transport: McpTransport,
    pub url: String,
}

impl Default for McpAdapterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            transport: McpTransport::Sse,
            url: String::new(),
        }
    }
}

pub const DEFAULT_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    pub provider_id: String,
    pub model_id: String,
    pub api_key: String,
    pub model_name: String,
    pub temperature: f64,
    pub base_url: String,
    pub system_prompt: String,
    #[serde(default)]
    pub mcp: Option<McpAdapterConfig>,
    #[serde(default)]
    pub attached_sandbox_id: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider_id: String::new(),
            model_id: String::new(),
            api_key: String::new(),
            model_name: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: String::new(),
            system_prompt: String::new(),
            mcp: None,
            attached_sandbox_id: None,
        }
    }
}

/// In-memory agent configuration being assembled by the wizard. Owned by one
/// wizard machine for the lifetime of a session; discarded on abandon,
/// consumed by the submission adapter on completion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub agent_type: Option<AgentType>,
    pub architecture: Option<Architecture>,
    pub framework: Option<String>,
    pub settings: LlmSettings,
    pub tools: Vec<ToolDefinition>,
}

impl AgentDraft {
    pub fn add_tool(&mut self) -> Result<String, String> {
        let tool = new_tool(&self.tools)?;
        let id = tool.id.clone();
        self.tools.push(tool);
        Ok(id)
    }

    pub fn remove_tool(&mut self, tool_id: &str) -> Result<(), String> {
        if !self.tools.iter().any(|tool| tool.id == tool_id) {
            return Err(format!("tool `{tool_id}` does not exist"));
        }
        self.tools.retain(|tool| tool.id != tool_id);
        Ok(())
    }

    pub fn update_tool_field(&mut self, tool_id: &str, field: ToolField) -> Result<(), String> {
        let tool = self.tool_mut(tool_id)?;
        match field {
            ToolField::Name(value) => tool.name = value,
            ToolField::Description(value) => tool.description = value,
            ToolField::ApiUrl(value) => tool.api_url = value,
            ToolField::ApiMethod(value) => tool.api_method = value,
            ToolField::DynamicSubstitution(value) => tool.dynamic_substitution = value,
            ToolField::RequestPayload(value) => tool.request_payload = value,
        }
        Ok(())
    }

    pub fn add_param(&mut self, tool_id: &str, kind: ParamKind) -> Result<String, String> {
        let tool = self.tool_mut(tool_id)?;
        let pair = new_param(tool.params(kind))?;
        let id = pair.id.clone();
        tool.params_mut(kind).push(pair);
        Ok(id)
    }

    pub fn remove_param(
        &mut self,
        tool_id: &str,
        kind: ParamKind,
        param_id: &str,
    ) -> Result<(), String> {
        let tool = self.tool_mut(tool_id)?;
        let params = tool.params_mut(kind);
        if !params.iter().any(|pair| pair.id == param_id) {
            return Err(format!(
                "{} param `{param_id}` does not exist",
                kind.as_str()
            ));
        }
        params.retain(|pair| pair.id != param_id);
        Ok(())
    }

    pub fn update_param(
        &mut self,
        tool_id: &str,
        kind: ParamKind,
        param_id: &str,
        key: String,
        value: String,
    ) -> Result<(), String> {
        let tool = self.tool_mut(tool_id)?;
        let pair = tool
            .params_mut(kind)
            .iter_mut()
            .find(|pair| pair.id == param_id)
            .ok_or_else(|| format!("{} param `{param_id}` does not exist", kind.as_str()))?;
        pair.key = key;
        pair.value = value;
        Ok(())
    }

    /// Appends an Authorization header referencing a backend secret by name.
    /// The value stays a `{{name}}` reference; resolution happens backend-side.
    pub fn add_secret_header(&mut self, tool_id: &str, secret_name: &str) -> Result<(), String> {
        if secret_name.trim().is_empty() {
            return Err("secret name must be non-empty".to_string());
        }
        let tool = self.tool_mut(tool_id)?;
        let mut pair = new_param(&tool.api_headers)?;
        pair.key = "Authorization".to_string();
        pair.value = format!("Bearer {{{{{}}}}}", secret_name.trim());
        tool.api_headers.push(pair);
        Ok(())
    }

    fn tool_mut(&mut self, tool_id: &str) -> Result<&mut ToolDefinition, String> {
        self.tools
            .iter_mut()
            .find(|tool| tool.id == tool_id)
            .ok_or_else(|| format!("tool `{tool_id}` does not exist"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::tools::HttpMethod;

    #[test]
    fn add_tool_defaults_to_get_with_empty_fields() {
        let mut draft = AgentDraft::default();
        let id = draft.add_tool().expect("add tool");
        let tool = &draft.tools[0];
        assert_eq!(tool.id, id);
        assert_eq!(tool.api_method, HttpMethod::Get);
        assert!(tool.name.is_empty());
        assert!(!tool.dynamic_substitution);
    }

    #[test]
    fn update_tool_field_replaces_one_field_and_preserves_order() {
        let mut draft = AgentDraft::default();
        let first = draft.add_tool().expect("add tool");
        let second = draft.add_tool().expect("add tool");
        draft
            .update_tool_field(&second, ToolField::Name("getWeather".to_string()))
            .expect("update name");
        assert_eq!(draft.tools[0].id, first);
        assert_eq!(draft.tools[1].name, "getWeather");
        assert!(draft
            .update_tool_field("missing", ToolField::Name("x".to_string()))
            .is_err());
    }

    #[test]
    fn param_crud_is_scoped_to_one_list_of_one_tool() {
        let mut draft = AgentDraft::default();
        let tool_id = draft.add_tool().expect("add tool");
        let param_id = draft
            .add_param(&tool_id, ParamKind::Query)
            .expect("add param");
        draft
            .update_param(
                &tool_id,
                ParamKind::Query,
                &param_id,
                "city".to_string(),
                "{{city}}".to_string(),
            )
            .expect("update param");
        assert!(draft.tools[0].api_headers.is_empty());
        assert_eq!(draft.tools[0].api_query_params[0].key, "city");

        assert!(draft
            .remove_param(&tool_id, ParamKind::Header, &param_id)
            .is_err());
        draft
            .remove_param(&tool_id, ParamKind::Query, &param_id)
            .expect("remove param");
        assert!(draft.tools[0].api_query_params.is_empty());
    }

    #[test]
    fn add_secret_header_references_the_secret_by_name_only() {
        let mut draft = AgentDraft::default();
        let tool_id = draft.add_tool().expect("add tool");
        draft
            .add_secret_header(&tool_id, "WEATHER_KEY")
            .expect("add secret header");
        let header = &draft.tools[0].api_headers[0];
        assert_eq!(header.key, "Authorization");
        assert_eq!(header.value, "Bearer {{WEATHER_KEY}}");
        assert!(draft.add_secret_header(&tool_id, "  ").is_err());
    }
}
