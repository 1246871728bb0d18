use crate::wizard::{HttpMethod, LlmSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire form of one tool: parameter lists flattened to maps, editing tokens
/// stripped, placeholder names extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPayload {
    pub name: String,
    pub description: String,
    pub api_url: String,
    pub api_method: HttpMethod,
    pub api_headers: BTreeMap<String, String>,
    pub api_query_params: BTreeMap<String, String>,
    pub api_path_params: BTreeMap<String, String>,
    pub dynamic_boolean: bool,
    pub dynamic_variables: Vec<String>,
    pub request_payload: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub description: String,
    pub architecture: String,
    pub framework: String,
    pub settings: LlmSettings,
    pub tools: Vec<ToolPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentCreated {
    pub agent_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSandboxRequest {
    pub template_id: String,
    pub timeout_seconds: u64,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SandboxCreated {
    pub sandbox_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub context_length: u64,
    #[serde(default)]
    pub supports_tools: bool,
    #[serde(default)]
    pub supports_vision: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProviderDescriptor {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct ProvidersResponse {
    #[serde(default)]
    pub(crate) providers: Vec<ProviderDescriptor>,
}

/// Secrets are referenced by name only; the backend never returns values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecretSummary {
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct SecretsResponse {
    #[serde(default)]
    pub(crate) secrets: Vec<SecretSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSecretRequest {
    pub name: String,
    pub value: String,
}
