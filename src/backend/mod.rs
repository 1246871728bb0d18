pub mod api;
pub mod error;
pub mod types;

pub use api::ApiClient;
pub use error::BackendError;
pub use types::{
    AgentCreated, CreateAgentRequest, CreateSandboxRequest, CreateSecretRequest, ModelDescriptor,
    ProviderDescriptor, SandboxCreated, SecretSummary, ToolPayload,
};
