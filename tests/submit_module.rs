use agentforge::backend::{
    AgentCreated, BackendError, CreateAgentRequest, CreateSandboxRequest, SandboxCreated,
};
use agentforge::config::Settings;
use agentforge::submit::{submit_agent, BackendGateway, PostSubmitNavigation};
use agentforge::wizard::{AgentDraft, AgentType, Architecture};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Sandbox,
    Agent,
}

struct ScriptedGateway {
    calls: RefCell<Vec<Call>>,
    sandbox_response: Result<String, String>,
    agent_response: Result<String, String>,
    seen_sandbox_ids: RefCell<Vec<Option<String>>>,
}

impl ScriptedGateway {
    fn new(sandbox_response: Result<&str, &str>, agent_response: Result<&str, &str>) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            sandbox_response: sandbox_response
                .map(str::to_string)
                .map_err(str::to_string),
            agent_response: agent_response.map(str::to_string).map_err(str::to_string),
            seen_sandbox_ids: RefCell::new(Vec::new()),
        }
    }
}

impl BackendGateway for ScriptedGateway {
    fn create_sandbox(
        &self,
        _request: &CreateSandboxRequest,
    ) -> Result<SandboxCreated, BackendError> {
        self.calls.borrow_mut().push(Call::Sandbox);
        match &self.sandbox_response {
            Ok(sandbox_id) => Ok(SandboxCreated {
                sandbox_id: sandbox_id.clone(),
            }),
            Err(message) => Err(BackendError::Request {
                endpoint: "v1/sandboxes".to_string(),
                message: message.clone(),
            }),
        }
    }

    fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentCreated, BackendError> {
        self.calls.borrow_mut().push(Call::Agent);
        self.seen_sandbox_ids
            .borrow_mut()
            .push(request.settings.attached_sandbox_id.clone());
        match &self.agent_response {
            Ok(agent_id) => Ok(AgentCreated {
                agent_id: agent_id.clone(),
            }),
            Err(message) => Err(BackendError::Status {
                endpoint: "v1/agents".to_string(),
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

fn coding_draft() -> AgentDraft {
    let mut draft = AgentDraft::default();
    draft.name = "fixit".to_string();
    draft.agent_type = Some(AgentType::Coding);
    draft.architecture = Some(Architecture::Mono);
    draft.framework = Some("langchain".to_string());
    draft
}

#[test]
fn coding_agents_provision_the_sandbox_before_the_agent_request() {
    let gateway = ScriptedGateway::new(Ok("sbx-1"), Ok("agent-1"));
    let outcome = submit_agent(&gateway, &Settings::default(), coding_draft());

    assert_eq!(*gateway.calls.borrow(), vec![Call::Sandbox, Call::Agent]);
    // The agent request body already carried the resolved sandbox id.
    assert_eq!(
        gateway.seen_sandbox_ids.borrow()[0].as_deref(),
        Some("sbx-1")
    );
    assert!(outcome.succeeded());
    assert_eq!(
        outcome.draft.settings.attached_sandbox_id.as_deref(),
        Some("sbx-1")
    );
    assert!(outcome.notices.is_empty());
}

#[test]
fn non_coding_agents_never_touch_the_sandbox_endpoint() {
    let gateway = ScriptedGateway::new(Ok("sbx-unused"), Ok("agent-2"));
    let mut draft = coding_draft();
    draft.agent_type = Some(AgentType::Textual);

    let outcome = submit_agent(&gateway, &Settings::default(), draft);
    assert_eq!(*gateway.calls.borrow(), vec![Call::Agent]);
    assert!(outcome.draft.settings.attached_sandbox_id.is_none());
}

#[test]
fn sandbox_failure_degrades_to_an_agent_without_a_sandbox() {
    let gateway = ScriptedGateway::new(Err("quota exceeded"), Ok("agent-3"));
    let outcome = submit_agent(&gateway, &Settings::default(), coding_draft());

    // Still exactly one agent call after the failed sandbox call.
    assert_eq!(*gateway.calls.borrow(), vec![Call::Sandbox, Call::Agent]);
    assert!(outcome.succeeded());
    assert!(outcome.draft.settings.attached_sandbox_id.is_none());
    assert_eq!(outcome.notices.len(), 1);
    assert!(outcome.notices[0].contains("sandbox provisioning failed"));
    assert!(outcome.notices[0].contains("quota exceeded"));
}

#[test]
fn agent_creation_failure_still_produces_exactly_one_outcome() {
    let gateway = ScriptedGateway::new(Ok("sbx-4"), Err("backend down"));
    let outcome = submit_agent(&gateway, &Settings::default(), coding_draft());

    assert!(!outcome.succeeded());
    assert!(outcome.agent_id.is_none());
    assert_eq!(outcome.notices.len(), 1);
    assert!(outcome.notices[0].contains("agent creation failed"));
    // The draft survives for retry or inspection.
    assert_eq!(outcome.draft.name, "fixit");
}

#[test]
fn navigation_targets_chat_except_for_multi_agent_drafts() {
    let gateway = ScriptedGateway::new(Ok("sbx"), Ok("agent-5"));
    let outcome = submit_agent(&gateway, &Settings::default(), coding_draft());
    assert_eq!(outcome.navigation, PostSubmitNavigation::Chat);

    let gateway = ScriptedGateway::new(Ok("sbx"), Ok("agent-6"));
    let mut draft = coding_draft();
    draft.agent_type = Some(AgentType::Textual);
    draft.architecture = Some(Architecture::Multi);
    let outcome = submit_agent(&gateway, &Settings::default(), draft);
    assert_eq!(outcome.navigation, PostSubmitNavigation::WorkflowBuilder);
}
