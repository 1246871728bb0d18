use crate::backend::{
    AgentCreated, ApiClient, BackendError, CreateAgentRequest, CreateSandboxRequest,
    SandboxCreated, ToolPayload,
};
use crate::config::Settings;
use crate::wizard::{extract_placeholders, flatten_params, AgentDraft, AgentType, Architecture};
use std::collections::BTreeMap;

pub const FALLBACK_AGENT_NAME: &str = "untitled-agent";

/// Seam between the wizard and the backend, so the adapter's ordering and
/// fallback behavior is testable without a network.
pub trait BackendGateway {
    fn create_sandbox(
        &self,
        request: &CreateSandboxRequest,
    ) -> Result<SandboxCreated, BackendError>;
    fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentCreated, BackendError>;
}

impl BackendGateway for ApiClient {
    fn create_sandbox(
        &self,
        request: &CreateSandboxRequest,
    ) -> Result<SandboxCreated, BackendError> {
        ApiClient::create_sandbox(self, request)
    }

    fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentCreated, BackendError> {
        ApiClient::create_agent(self, request)
    }
}

/// Where the host view goes after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSubmitNavigation {
    Chat,
    WorkflowBuilder,
}

/// Result of one submission. Produced exactly once per call, whether or not
/// the backend cooperated: the wizard degrades instead of dead-ending.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub draft: AgentDraft,
    pub agent_id: Option<String>,
    pub navigation: PostSubmitNavigation,
    /// Operator-facing notices (toasts) for non-fatal failures, in the
    /// order they occurred.
    pub notices: Vec<String>,
}

impl SubmitOutcome {
    pub fn succeeded(&self) -> bool {
        self.agent_id.is_some()
    }
}

pub(crate) fn tool_payload(tool: &crate::wizard::ToolDefinition) -> ToolPayload {
    let dynamic_variables = if tool.dynamic_substitution {
        extract_placeholders(tool)
    } else {
        Vec::new()
    };
    ToolPayload {
        name: tool.name.clone(),
        description: tool.description.clone(),
        api_url: tool.api_url.clone(),
        api_method: tool.api_method,
        api_headers: flatten_params(&tool.api_headers),
        api_query_params: flatten_params(&tool.api_query_params),
        api_path_params: flatten_params(&tool.api_path_params),
        dynamic_boolean: tool.dynamic_substitution,
        dynamic_variables,
        request_payload: tool.request_payload.clone(),
    }
}

/// Pure draft-to-wire transformation: flattens every tool's parameter lists
/// and fills identity fallbacks. Kept separate from the request dispatch so
/// the wire shape is testable on its own.
pub fn build_create_agent_request(draft: &AgentDraft) -> CreateAgentRequest {
    let name = if draft.name.trim().is_empty() {
        FALLBACK_AGENT_NAME.to_string()
    } else {
        draft.name.trim().to_string()
    };
    CreateAgentRequest {
        name,
        description: draft.description.clone(),
        architecture: draft
            .architecture
            .unwrap_or(Architecture::Mono)
            .as_str()
            .to_string(),
        framework: draft.framework.clone().unwrap_or_default(),
        settings: draft.settings.clone(),
        tools: draft.tools.iter().map(tool_payload).collect(),
    }
}

fn sandbox_request(settings: &Settings, draft: &AgentDraft) -> CreateSandboxRequest {
    let mut metadata = BTreeMap::new();
    if !draft.name.trim().is_empty() {
        metadata.insert("agent_name".to_string(), draft.name.trim().to_string());
    }
    if let Some(agent_type) = draft.agent_type {
        metadata.insert("agent_type".to_string(), agent_type.as_str().to_string());
    }
    CreateSandboxRequest {
        template_id: settings.sandbox_template_id.clone(),
        timeout_seconds: settings.sandbox_timeout_seconds,
        metadata,
    }
}

/// Submits a finished draft. For coding agents a sandbox is provisioned
/// first and must fully resolve before the agent request is built, because
/// the agent body embeds the sandbox id. Both failure modes are non-fatal:
/// sandbox failure drops the sandbox reference, agent-creation failure
/// yields an outcome without a backend id.
pub fn submit_agent(
    gateway: &dyn BackendGateway,
    settings: &Settings,
    mut draft: AgentDraft,
) -> SubmitOutcome {
    let mut notices = Vec::new();

    if draft.agent_type == Some(AgentType::Coding) {
        match gateway.create_sandbox(&sandbox_request(settings, &draft)) {
            Ok(sandbox) => {
                draft.settings.attached_sandbox_id = Some(sandbox.sandbox_id);
            }
            Err(err) => {
                notices.push(format!(
                    "sandbox provisioning failed, continuing without a sandbox: {err}"
                ));
            }
        }
    }

    let request = build_create_agent_request(&draft);
    let agent_id = match gateway.create_agent(&request) {
        Ok(created) => Some(created.agent_id),
        Err(err) => {
            notices.push(format!("agent creation failed: {err}"));
            None
        }
    };

    let navigation = if draft.architecture == Some(Architecture::Multi) {
        PostSubmitNavigation::WorkflowBuilder
    } else {
        PostSubmitNavigation::Chat
    };

    SubmitOutcome {
        draft,
        agent_id,
        navigation,
        notices,
    }
}
