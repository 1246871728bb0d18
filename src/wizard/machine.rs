use crate::wizard::draft::{AgentDraft, AgentType, Architecture};
use crate::wizard::steps::{
    framework_option, validate_configure_form, ConfigureForm, FieldError,
};
use crate::wizard::tools::ToolDefinition;

/// Named wizard states. The three terminal stages absorb: `Submitted` after
/// the adapter ran, and the two redirects exit the wizard without ever
/// submitting the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    SelectAgentType,
    SelectArchitecture,
    SelectFramework,
    Configure,
    Tools,
    Review,
    Submitted,
    VoiceRedirect,
    WorkflowBuilderRedirect,
}

impl WizardStage {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStage::SelectAgentType => "select_agent_type",
            WizardStage::SelectArchitecture => "select_architecture",
            WizardStage::SelectFramework => "select_framework",
            WizardStage::Configure => "configure",
            WizardStage::Tools => "tools",
            WizardStage::Review => "review",
            WizardStage::Submitted => "submitted",
            WizardStage::VoiceRedirect => "voice_redirect",
            WizardStage::WorkflowBuilderRedirect => "workflow_builder_redirect",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WizardStage::Submitted
                | WizardStage::VoiceRedirect
                | WizardStage::WorkflowBuilderRedirect
        )
    }
}

/// Transition animation hint only; no functional effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What the configure stage renders for the selected framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureKind {
    LangchainForm,
    Placeholder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardError {
    InvalidTransition {
        stage: WizardStage,
        operation: &'static str,
    },
    UnknownFramework {
        id: String,
    },
    ConfigureRejected(Vec<FieldError>),
    SubmissionInFlight,
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::InvalidTransition { stage, operation } => {
                write!(
                    f,
                    "invalid wizard transition: stage={} operation={operation}",
                    stage.as_str()
                )
            }
            WizardError::UnknownFramework { id } => {
                write!(f, "unknown framework `{id}`")
            }
            WizardError::ConfigureRejected(errors) => {
                let fields: Vec<&str> = errors.iter().map(|err| err.field).collect();
                write!(f, "configuration rejected: {}", fields.join(", "))
            }
            WizardError::SubmissionInFlight => {
                write!(f, "a submission is already in progress")
            }
        }
    }
}

/// Owns the draft for one wizard session and enforces the transition table.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardMachine {
    stage: WizardStage,
    direction: Direction,
    draft: AgentDraft,
    submitting: bool,
}

impl Default for WizardMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardMachine {
    pub fn new() -> Self {
        Self {
            stage: WizardStage::SelectAgentType,
            direction: Direction::Forward,
            draft: AgentDraft::default(),
            submitting: false,
        }
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn draft(&self) -> &AgentDraft {
        &self.draft
    }

    /// Tool editing mutates the single owned draft in place; the machine
    /// still controls every stage transition.
    pub fn draft_mut(&mut self) -> &mut AgentDraft {
        &mut self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn select_agent_type(&mut self, agent_type: AgentType) -> Result<(), WizardError> {
        self.require_stage(WizardStage::SelectAgentType, "select_agent_type")?;
        self.draft.agent_type = Some(agent_type);
        self.direction = Direction::Forward;
        self.stage = match agent_type {
            AgentType::Voice => WizardStage::VoiceRedirect,
            AgentType::Coding => {
                // Coding agents are always single-agent; the wizard skips
                // the architecture screen for them.
                self.draft.architecture = Some(Architecture::Mono);
                WizardStage::SelectFramework
            }
            AgentType::Textual => WizardStage::SelectArchitecture,
        };
        Ok(())
    }

    pub fn select_architecture(&mut self, architecture: Architecture) -> Result<(), WizardError> {
        self.require_stage(WizardStage::SelectArchitecture, "select_architecture")?;
        self.draft.architecture = Some(architecture);
        self.direction = Direction::Forward;
        self.stage = match architecture {
            Architecture::Multi => WizardStage::WorkflowBuilderRedirect,
            Architecture::Mono => WizardStage::SelectFramework,
        };
        Ok(())
    }

    pub fn select_framework(&mut self, framework_id: &str) -> Result<(), WizardError> {
        self.require_stage(WizardStage::SelectFramework, "select_framework")?;
        let architecture = self.draft.architecture.unwrap_or(Architecture::Mono);
        if framework_option(architecture, framework_id).is_none() {
            return Err(WizardError::UnknownFramework {
                id: framework_id.to_string(),
            });
        }
        self.draft.framework = Some(framework_id.to_string());
        self.direction = Direction::Forward;
        self.stage = WizardStage::Configure;
        Ok(())
    }

    pub fn configure_kind(&self) -> Option<ConfigureKind> {
        if self.stage != WizardStage::Configure {
            return None;
        }
        let architecture = self.draft.architecture?;
        let framework = self.draft.framework.as_deref()?;
        let option = framework_option(architecture, framework)?;
        Some(if option.has_configuration_form {
            ConfigureKind::LangchainForm
        } else {
            ConfigureKind::Placeholder
        })
    }

    pub fn submit_configuration(&mut self, form: ConfigureForm) -> Result<(), WizardError> {
        self.require_stage(WizardStage::Configure, "submit_configuration")?;
        if self.configure_kind() != Some(ConfigureKind::LangchainForm) {
            return Err(WizardError::InvalidTransition {
                stage: self.stage,
                operation: "submit_configuration",
            });
        }
        validate_configure_form(&form).map_err(WizardError::ConfigureRejected)?;
        self.draft.name = form.name;
        self.draft.description = form.description;
        self.draft.settings = form.settings;
        self.direction = Direction::Forward;
        self.stage = WizardStage::Tools;
        Ok(())
    }

    /// Frameworks without a configuration form proceed with default
    /// settings; the placeholder is a first-class step, not a gap.
    pub fn confirm_placeholder(&mut self) -> Result<(), WizardError> {
        self.require_stage(WizardStage::Configure, "confirm_placeholder")?;
        if self.configure_kind() != Some(ConfigureKind::Placeholder) {
            return Err(WizardError::InvalidTransition {
                stage: self.stage,
                operation: "confirm_placeholder",
            });
        }
        self.direction = Direction::Forward;
        self.stage = WizardStage::Tools;
        Ok(())
    }

    pub fn submit_tools(&mut self, tools: Vec<ToolDefinition>) -> Result<(), WizardError> {
        self.require_stage(WizardStage::Tools, "submit_tools")?;
        self.draft.tools = tools;
        self.direction = Direction::Forward;
        self.stage = WizardStage::Review;
        Ok(())
    }

    /// Gating contract: while this is false the Next control is hidden, not
    /// merely disabled — `advance()` is unreachable from the UI.
    pub fn can_advance(&self) -> bool {
        match self.stage {
            WizardStage::SelectAgentType => self.draft.agent_type.is_some(),
            WizardStage::SelectArchitecture => self.draft.architecture.is_some(),
            WizardStage::SelectFramework => self.draft.framework.is_some(),
            // The configure step's own form submit is the only way forward.
            WizardStage::Configure => false,
            WizardStage::Tools => true,
            WizardStage::Review => false,
            _ => false,
        }
    }

    /// Re-advances through an already-completed selection (after `retreat`).
    /// Returns false when gated.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.direction = Direction::Forward;
        self.stage = match self.stage {
            WizardStage::SelectAgentType => match self.draft.agent_type {
                Some(AgentType::Voice) => WizardStage::VoiceRedirect,
                Some(AgentType::Coding) => WizardStage::SelectFramework,
                Some(AgentType::Textual) => WizardStage::SelectArchitecture,
                None => return false,
            },
            WizardStage::SelectArchitecture => match self.draft.architecture {
                Some(Architecture::Multi) => WizardStage::WorkflowBuilderRedirect,
                Some(Architecture::Mono) => WizardStage::SelectFramework,
                None => return false,
            },
            WizardStage::SelectFramework => WizardStage::Configure,
            WizardStage::Tools => WizardStage::Review,
            _ => return false,
        };
        true
    }

    /// Bounded backward movement; no-op at the first step and in terminal
    /// stages.
    pub fn retreat(&mut self) -> bool {
        let previous = match self.stage {
            WizardStage::SelectArchitecture => WizardStage::SelectAgentType,
            WizardStage::SelectFramework => match self.draft.agent_type {
                Some(AgentType::Textual) => WizardStage::SelectArchitecture,
                _ => WizardStage::SelectAgentType,
            },
            WizardStage::Configure => WizardStage::SelectFramework,
            WizardStage::Tools => WizardStage::Configure,
            WizardStage::Review => WizardStage::Tools,
            _ => return false,
        };
        self.direction = Direction::Backward;
        self.stage = previous;
        true
    }

    /// Terminal operation: hands the draft to the submission adapter. A
    /// second call while a submission is in flight is refused, so one
    /// confirm produces exactly one submission.
    pub fn finalize(&mut self) -> Result<AgentDraft, WizardError> {
        self.require_stage(WizardStage::Review, "finalize")?;
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        self.submitting = true;
        Ok(self.draft.clone())
    }

    pub fn complete_submission(&mut self) {
        self.submitting = false;
        self.stage = WizardStage::Submitted;
    }

    fn require_stage(
        &self,
        expected: WizardStage,
        operation: &'static str,
    ) -> Result<(), WizardError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                stage: self.stage,
                operation,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_selection_absorbs_without_reaching_later_stages() {
        let mut machine = WizardMachine::new();
        machine
            .select_agent_type(AgentType::Voice)
            .expect("select voice");
        assert_eq!(machine.stage(), WizardStage::VoiceRedirect);
        assert!(machine.stage().is_terminal());
        assert!(!machine.retreat());
        assert!(!machine.advance());
        assert!(machine.finalize().is_err());
    }

    #[test]
    fn coding_selection_fixes_mono_architecture_and_skips_to_framework() {
        let mut machine = WizardMachine::new();
        machine
            .select_agent_type(AgentType::Coding)
            .expect("select coding");
        assert_eq!(machine.stage(), WizardStage::SelectFramework);
        assert_eq!(machine.draft().architecture, Some(Architecture::Mono));
    }

    #[test]
    fn retreat_is_bounded_and_tracks_the_branch_taken() {
        let mut machine = WizardMachine::new();
        assert!(!machine.retreat());

        machine
            .select_agent_type(AgentType::Coding)
            .expect("select coding");
        assert!(machine.retreat());
        // Coding skipped architecture, so retreat lands on the type screen.
        assert_eq!(machine.stage(), WizardStage::SelectAgentType);
        assert_eq!(machine.direction(), Direction::Backward);
    }

    #[test]
    fn advance_is_gated_until_a_selection_exists() {
        let mut machine = WizardMachine::new();
        assert!(!machine.can_advance());
        assert!(!machine.advance());
        machine
            .select_agent_type(AgentType::Textual)
            .expect("select textual");
        assert!(machine.retreat());
        // Selection persists, so Next is reachable again.
        assert!(machine.can_advance());
        assert!(machine.advance());
        assert_eq!(machine.stage(), WizardStage::SelectArchitecture);
    }

    #[test]
    fn unknown_framework_is_rejected() {
        let mut machine = WizardMachine::new();
        machine
            .select_agent_type(AgentType::Textual)
            .expect("select textual");
        machine
            .select_architecture(Architecture::Mono)
            .expect("select mono");
        let err = machine
            .select_framework("autogen")
            .expect_err("unknown framework");
        assert_eq!(
            err,
            WizardError::UnknownFramework {
                id: "autogen".to_string()
            }
        );
    }

    #[test]
    fn placeholder_framework_uses_confirm_and_rejects_the_form_path() {
        let mut machine = WizardMachine::new();
        machine
            .select_agent_type(AgentType::Textual)
            .expect("select textual");
        machine
            .select_architecture(Architecture::Mono)
            .expect("select mono");
        machine.select_framework("agno").expect("select agno");
        assert_eq!(machine.configure_kind(), Some(ConfigureKind::Placeholder));
        assert!(machine
            .submit_configuration(ConfigureForm::default())
            .is_err());
        machine.confirm_placeholder().expect("confirm placeholder");
        assert_eq!(machine.stage(), WizardStage::Tools);
        // Settings stay at their defaults for placeholder frameworks.
        assert!(machine.draft().settings.api_key.is_empty());
    }

    #[test]
    fn finalize_refuses_while_a_submission_is_in_flight() {
        let mut machine = WizardMachine::new();
        machine
            .select_agent_type(AgentType::Textual)
            .expect("select textual");
        machine
            .select_architecture(Architecture::Mono)
            .expect("select mono");
        machine.select_framework("agno").expect("select agno");
        machine.confirm_placeholder().expect("confirm placeholder");
        machine.submit_tools(Vec::new()).expect("submit tools");

        machine.finalize().expect("first finalize");
        assert_eq!(
            machine.finalize().expect_err("second finalize"),
            WizardError::SubmissionInFlight
        );
        machine.complete_submission();
        assert_eq!(machine.stage(), WizardStage::Submitted);
        assert!(!machine.is_submitting());
    }
}
