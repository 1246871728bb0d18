pub mod draft;
pub mod machine;
pub mod steps;
pub mod tools;

pub use draft::{
    AgentDraft, AgentType, Architecture, LlmSettings, McpAdapterConfig, McpTransport,
    DEFAULT_TEMPERATURE,
};
pub use machine::{ConfigureKind, Direction, WizardError, WizardMachine, WizardStage};
pub use steps::{
    framework_option, framework_options, validate_configure_form, AgentTypeOption,
    ArchitectureOption, ConfigureForm, FieldError, FrameworkOption, AGENT_TYPE_OPTIONS,
    ARCHITECTURE_OPTIONS, TEMPERATURE_MAX, TEMPERATURE_MIN,
};
pub use tools::{
    extract_placeholders, flatten_params, HttpMethod, ParamKind, ParamPair, ToolDefinition,
    ToolField, HTTP_METHOD_OPTIONS,
};
