use crate::backend::ApiClient;
use crate::config::{default_state_root, load_global_settings_or_default, Settings};
use crate::shared::logging::append_wizard_log_line;
use crate::submit::submit_agent;
use crate::tui::navigation::{clamp_selection, ui_action_from_key, UiAction};
use crate::tui::screens::{
    agent_type_items, architecture_items, centered_rect, configure_rows, draw_field_screen,
    draw_list_screen, framework_items, review_rows, tail_for_display, tool_list_items, tool_rows,
};
use crate::wizard::{
    framework_option, framework_options, Architecture, ConfigureForm, ConfigureKind,
    HttpMethod, McpAdapterConfig, McpTransport, ParamKind, ToolField, WizardMachine, WizardStage,
    AGENT_TYPE_OPTIONS, ARCHITECTURE_OPTIONS, HTTP_METHOD_OPTIONS,
};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};
use ratatui::Terminal;
use std::io::{self, IsTerminal};
use std::time::Duration;

const TOOLS_HINT: &str = "Up/Down move | a add | d delete | Enter edit | s continue | Esc back";
const CONFIGURE_HINT: &str = "Up/Down move | Enter edit | s save and continue | Esc back";
const REVIEW_HINT: &str = "s submit | Esc back";
const SELECT_HINT: &str = "Up/Down move | Enter select | Esc back";

pub fn run_wizard() -> Result<String, String> {
    let settings =
        load_global_settings_or_default().map_err(|err| format!("failed to load config: {err}"))?;
    if !is_interactive() {
        return Err("the agent builder requires an interactive terminal".to_string());
    }
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter builder screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create builder terminal: {e}"))?;
    let result = run_wizard_loop(&settings, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave builder screen: {e}"))?;
    result
}

fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn run_wizard_loop(
    settings: &Settings,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<String, String> {
    let mut machine = WizardMachine::new();
    let mut selected = 0usize;
    let mut status = "Pick the kind of agent to build.".to_string();
    let mut form = ConfigureForm::default();
    let mut form_stage_entered = false;

    loop {
        match machine.stage() {
            WizardStage::SelectAgentType => {
                form_stage_entered = false;
                let items = agent_type_items();
                draw_list_screen(
                    terminal,
                    "New Agent > Type",
                    &items,
                    selected,
                    &status,
                    "Up/Down move | Enter select | Esc quit",
                )?;
                let Some(action) = next_action(machine.stage())? else {
                    continue;
                };
                match action {
                    UiAction::MovePrev => selected = selected.saturating_sub(1),
                    UiAction::MoveNext => selected = clamp_selection(selected + 1, items.len()),
                    UiAction::Enter => {
                        let option = AGENT_TYPE_OPTIONS[clamp_selection(selected, items.len())];
                        match machine.select_agent_type(option.value) {
                            Ok(()) => {
                                selected = 0;
                                status = format!("{} agent selected.", option.label);
                            }
                            Err(err) => status = err.to_string(),
                        }
                    }
                    UiAction::Cancel => return Ok("agent builder canceled".to_string()),
                    _ => {}
                }
            }
            WizardStage::SelectArchitecture => {
                form_stage_entered = false;
                let items = architecture_items();
                draw_list_screen(
                    terminal,
                    "New Agent > Architecture",
                    &items,
                    selected,
                    &status,
                    SELECT_HINT,
                )?;
                let Some(action) = next_action(machine.stage())? else {
                    continue;
                };
                match action {
                    UiAction::MovePrev => selected = selected.saturating_sub(1),
                    UiAction::MoveNext => selected = clamp_selection(selected + 1, items.len()),
                    UiAction::Enter => {
                        let option = ARCHITECTURE_OPTIONS[clamp_selection(selected, items.len())];
                        match machine.select_architecture(option.value) {
                            Ok(()) => {
                                selected = 0;
                                status = format!("{} selected.", option.label);
                            }
                            Err(err) => status = err.to_string(),
                        }
                    }
                    UiAction::Back => {
                        machine.retreat();
                        selected = 0;
                    }
                    UiAction::Cancel => return Ok("agent builder canceled".to_string()),
                    _ => {}
                }
            }
            WizardStage::SelectFramework => {
                form_stage_entered = false;
                let architecture = machine.draft().architecture.unwrap_or(Architecture::Mono);
                let items = framework_items(architecture);
                draw_list_screen(
                    terminal,
                    "New Agent > Framework",
                    &items,
                    selected,
                    &status,
                    SELECT_HINT,
                )?;
                let Some(action) = next_action(machine.stage())? else {
                    continue;
                };
                match action {
                    UiAction::MovePrev => selected = selected.saturating_sub(1),
                    UiAction::MoveNext => selected = clamp_selection(selected + 1, items.len()),
                    UiAction::Enter => {
                        let options = framework_options(architecture);
                        let option = options[clamp_selection(selected, options.len())];
                        match machine.select_framework(option.id) {
                            Ok(()) => {
                                selected = 0;
                                status = format!("{} selected.", option.label);
                            }
                            Err(err) => status = err.to_string(),
                        }
                    }
                    UiAction::Back => {
                        machine.retreat();
                        selected = 0;
                    }
                    UiAction::Cancel => return Ok("agent builder canceled".to_string()),
                    _ => {}
                }
            }
            WizardStage::Configure => match machine.configure_kind() {
                Some(ConfigureKind::LangchainForm) => {
                    if !form_stage_entered {
                        let draft = machine.draft();
                        form = ConfigureForm {
                            name: draft.name.clone(),
                            description: draft.description.clone(),
                            settings: draft.settings.clone(),
                        };
                        form_stage_entered = true;
                        selected = 0;
                    }
                    let rows = configure_rows(&form);
                    draw_field_screen(
                        terminal,
                        "New Agent > Configure (LangChain)",
                        &rows,
                        selected,
                        &status,
                        CONFIGURE_HINT,
                    )?;
                    let Some(action) = next_action(machine.stage())? else {
                        continue;
                    };
                    match action {
                        UiAction::MovePrev => selected = selected.saturating_sub(1),
                        UiAction::MoveNext => selected = clamp_selection(selected + 1, rows.len()),
                        UiAction::Enter | UiAction::Edit | UiAction::Toggle => {
                            if let Some(message) = edit_configure_field(
                                terminal,
                                &mut form,
                                clamp_selection(selected, rows.len()),
                            )? {
                                status = message;
                            }
                        }
                        UiAction::Save => match machine.submit_configuration(form.clone()) {
                            Ok(()) => {
                                selected = 0;
                                form_stage_entered = false;
                                status = "Configuration saved.".to_string();
                            }
                            Err(err) => status = err.to_string(),
                        },
                        UiAction::Back => {
                            machine.retreat();
                            selected = 0;
                            form_stage_entered = false;
                        }
                        UiAction::Cancel => return Ok("agent builder canceled".to_string()),
                        _ => {}
                    }
                }
                Some(ConfigureKind::Placeholder) => {
                    form_stage_entered = false;
                    let framework_label = machine
                        .draft()
                        .framework
                        .as_deref()
                        .and_then(|id| {
                            framework_option(
                                machine.draft().architecture.unwrap_or(Architecture::Mono),
                                id,
                            )
                        })
                        .map(|option| option.label.to_string())
                        .unwrap_or_default();
                    let items = vec![
                        format!("{framework_label} configuration is coming soon."),
                        "The agent proceeds with default model settings.".to_string(),
                    ];
                    draw_list_screen(
                        terminal,
                        "New Agent > Configure",
                        &items,
                        0,
                        &status,
                        "Enter continue | Esc back",
                    )?;
                    let Some(action) = next_action(machine.stage())? else {
                        continue;
                    };
                    match action {
                        UiAction::Enter => match machine.confirm_placeholder() {
                            Ok(()) => {
                                selected = 0;
                                status = "Continuing with default settings.".to_string();
                            }
                            Err(err) => status = err.to_string(),
                        },
                        UiAction::Back => {
                            machine.retreat();
                            selected = 0;
                        }
                        UiAction::Cancel => return Ok("agent builder canceled".to_string()),
                        _ => {}
                    }
                }
                None => {
                    return Err("configure stage reached without a framework selection".to_string())
                }
            },
            WizardStage::Tools => {
                form_stage_entered = false;
                let items = tool_list_items(&machine.draft().tools);
                let ids: Vec<String> = machine
                    .draft()
                    .tools
                    .iter()
                    .map(|tool| tool.id.clone())
                    .collect();
                draw_list_screen(
                    terminal,
                    "New Agent > Tools",
                    &items,
                    selected,
                    &status,
                    TOOLS_HINT,
                )?;
                let Some(action) = next_action(machine.stage())? else {
                    continue;
                };
                match action {
                    UiAction::MovePrev => selected = selected.saturating_sub(1),
                    UiAction::MoveNext => selected = clamp_selection(selected + 1, ids.len()),
                    UiAction::Add => match machine.draft_mut().add_tool() {
                        Ok(id) => {
                            selected = ids.len();
                            status = "tool added".to_string();
                            if let Some(message) =
                                run_tool_editor(terminal, &mut machine, &id)?
                            {
                                status = message;
                            }
                        }
                        Err(err) => status = err,
                    },
                    UiAction::Delete => {
                        if ids.is_empty() {
                            status = "no tools to delete".to_string();
                        } else {
                            let id = ids[clamp_selection(selected, ids.len())].clone();
                            match machine.draft_mut().remove_tool(&id) {
                                Ok(()) => {
                                    selected = selected.saturating_sub(1);
                                    status = "tool removed".to_string();
                                }
                                Err(err) => status = err,
                            }
                        }
                    }
                    UiAction::Enter | UiAction::Edit => {
                        if ids.is_empty() {
                            status = "no tools configured".to_string();
                        } else {
                            let id = ids[clamp_selection(selected, ids.len())].clone();
                            if let Some(message) = run_tool_editor(terminal, &mut machine, &id)? {
                                status = message;
                            }
                        }
                    }
                    UiAction::Save => {
                        let tools = machine.draft().tools.clone();
                        match machine.submit_tools(tools) {
                            Ok(()) => {
                                selected = 0;
                                status = "Tools saved.".to_string();
                            }
                            Err(err) => status = err.to_string(),
                        }
                    }
                    UiAction::Back => {
                        machine.retreat();
                        selected = 0;
                    }
                    UiAction::Cancel => return Ok("agent builder canceled".to_string()),
                    _ => {}
                }
            }
            WizardStage::Review => {
                form_stage_entered = false;
                let rows = review_rows(machine.draft());
                draw_field_screen(
                    terminal,
                    "New Agent > Review",
                    &rows,
                    selected,
                    &status,
                    REVIEW_HINT,
                )?;
                let Some(action) = next_action(machine.stage())? else {
                    continue;
                };
                match action {
                    UiAction::MovePrev => selected = selected.saturating_sub(1),
                    UiAction::MoveNext => selected = clamp_selection(selected + 1, rows.len()),
                    UiAction::Save | UiAction::Enter => {
                        let draft = match machine.finalize() {
                            Ok(draft) => draft,
                            Err(err) => {
                                status = err.to_string();
                                continue;
                            }
                        };
                        let client = ApiClient::new(settings);
                        let outcome = submit_agent(&client, settings, draft);
                        machine.complete_submission();
                        log_outcome_notices(&outcome.notices, outcome.agent_id.as_deref());
                        return Ok(submission_summary(&outcome));
                    }
                    UiAction::Back => {
                        machine.retreat();
                        selected = 0;
                    }
                    UiAction::Cancel => return Ok("agent builder canceled".to_string()),
                    _ => {}
                }
            }
            WizardStage::Submitted => {
                return Ok("agent submitted".to_string());
            }
            WizardStage::VoiceRedirect => {
                return Ok(
                    "voice agents are configured in the voice studio; leaving the builder"
                        .to_string(),
                );
            }
            WizardStage::WorkflowBuilderRedirect => {
                return Ok(
                    "multi-agent teams are assembled in the workflow builder; leaving the builder"
                        .to_string(),
                );
            }
        }
    }
}

fn submission_summary(outcome: &crate::submit::SubmitOutcome) -> String {
    let mut summary = match &outcome.agent_id {
        Some(agent_id) => format!("agent created: {agent_id}"),
        None => "agent submission did not complete".to_string(),
    };
    for notice in &outcome.notices {
        summary.push_str("\n  note: ");
        summary.push_str(notice);
    }
    summary
}

fn log_outcome_notices(notices: &[String], agent_id: Option<&str>) {
    let Ok(state_root) = default_state_root() else {
        return;
    };
    for notice in notices {
        let _ = append_wizard_log_line(&state_root, notice);
    }
    if let Some(agent_id) = agent_id {
        let _ = append_wizard_log_line(&state_root, &format!("agent created: {agent_id}"));
    }
}

fn next_action(stage: WizardStage) -> Result<Option<UiAction>, String> {
    if !event::poll(Duration::from_millis(250))
        .map_err(|e| format!("failed to poll builder input: {e}"))?
    {
        return Ok(None);
    }
    let ev = event::read().map_err(|e| format!("failed to read builder input: {e}"))?;
    let Event::Key(key) = ev else {
        return Ok(None);
    };
    Ok(ui_action_from_key(stage, key))
}

fn edit_configure_field(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    form: &mut ConfigureForm,
    row: usize,
) -> Result<Option<String>, String> {
    match row {
        0 => {
            if let Some(value) = prompt_line_tui(terminal, "Agent name", "Set name:", &form.name)? {
                form.name = value.trim().to_string();
                return Ok(Some("name updated".to_string()));
            }
        }
        1 => {
            if let Some(value) = prompt_line_tui(
                terminal,
                "Description",
                "Set description:",
                &form.description,
            )? {
                form.description = value;
                return Ok(Some("description updated".to_string()));
            }
        }
        2 => {
            if let Some(value) = prompt_line_tui(
                terminal,
                "Provider",
                "Set provider id:",
                &form.settings.provider_id,
            )? {
                form.settings.provider_id = value.trim().to_string();
                return Ok(Some("provider updated".to_string()));
            }
        }
        3 => {
            if let Some(value) = prompt_line_tui(
                terminal,
                "Model",
                "Set model id:",
                &form.settings.model_id,
            )? {
                form.settings.model_id = value.trim().to_string();
                return Ok(Some("model updated".to_string()));
            }
        }
        4 => {
            if let Some(value) =
                prompt_line_tui(terminal, "API Key", "Set API key:", &form.settings.api_key)?
            {
                form.settings.api_key = value.trim().to_string();
                return Ok(Some("API key updated".to_string()));
            }
        }
        5 => {
            if let Some(value) = prompt_line_tui(
                terminal,
                "Model Name",
                "Set model name override (empty keeps provider default):",
                &form.settings.model_name,
            )? {
                form.settings.model_name = value.trim().to_string();
                return Ok(Some("model name updated".to_string()));
            }
        }
        6 => {
            let current = format!("{:.2}", form.settings.temperature);
            if let Some(value) = prompt_line_tui(
                terminal,
                "Temperature",
                "Set temperature (0.0 to 2.0):",
                &current,
            )? {
                match value.trim().parse::<f64>() {
                    Ok(parsed) => {
                        form.settings.temperature = parsed;
                        return Ok(Some("temperature updated".to_string()));
                    }
                    Err(_) => return Ok(Some("temperature must be a number".to_string())),
                }
            }
        }
        7 => {
            if let Some(value) = prompt_line_tui(
                terminal,
                "Base URL",
                "Set base URL (empty keeps provider default):",
                &form.settings.base_url,
            )? {
                form.settings.base_url = value.trim().to_string();
                return Ok(Some("base URL updated".to_string()));
            }
        }
        8 => {
            if let Some(value) = prompt_line_tui(
                terminal,
                "System Prompt",
                "Set system prompt:",
                &form.settings.system_prompt,
            )? {
                form.settings.system_prompt = value;
                return Ok(Some("system prompt updated".to_string()));
            }
        }
        9 => {
            let mut mcp = form.settings.mcp.clone().unwrap_or_default();
            mcp.enabled = !mcp.enabled;
            let message = if mcp.enabled {
                "MCP adapter enabled"
            } else {
                "MCP adapter disabled"
            };
            form.settings.mcp = Some(mcp);
            return Ok(Some(message.to_string()));
        }
        10 => {
            let mut mcp = form.settings.mcp.clone().unwrap_or_default();
            mcp.transport = match mcp.transport {
                McpTransport::Sse => McpTransport::Http,
                McpTransport::Http => McpTransport::Sse,
            };
            let message = format!("MCP transport set to {}", mcp.transport.as_str());
            form.settings.mcp = Some(mcp);
            return Ok(Some(message));
        }
        _ => {
            let current = form
                .settings
                .mcp
                .as_ref()
                .map(|mcp| mcp.url.clone())
                .unwrap_or_default();
            if let Some(value) =
                prompt_line_tui(terminal, "MCP URL", "Set MCP adapter URL:", &current)?
            {
                let mut mcp = form.settings.mcp.clone().unwrap_or_else(|| McpAdapterConfig {
                    enabled: true,
                    ..McpAdapterConfig::default()
                });
                mcp.url = value.trim().to_string();
                form.settings.mcp = Some(mcp);
                return Ok(Some("MCP URL updated".to_string()));
            }
        }
    }
    Ok(None)
}

fn run_tool_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    machine: &mut WizardMachine,
    tool_id: &str,
) -> Result<Option<String>, String> {
    let mut selected = 0usize;
    let mut status =
        "Enter edit selected field. a add secret header. Esc back to tool list.".to_string();
    loop {
        let Some(tool) = machine
            .draft()
            .tools
            .iter()
            .find(|tool| tool.id == tool_id)
            .cloned()
        else {
            return Ok(Some("tool no longer exists".to_string()));
        };
        let rows = tool_rows(&tool);
        draw_field_screen(
            terminal,
            &format!("New Agent > Tools > {}", display_tool_name(&tool.name)),
            &rows,
            selected,
            &status,
            "Up/Down move | Enter edit | a add secret header | Esc back",
        )?;
        let Some(action) = next_action(WizardStage::Tools)? else {
            continue;
        };
        match action {
            UiAction::Back => return Ok(Some("closed tool editor".to_string())),
            UiAction::Cancel => return Ok(Some("closed tool editor".to_string())),
            UiAction::MovePrev => selected = selected.saturating_sub(1),
            UiAction::MoveNext => selected = clamp_selection(selected + 1, rows.len()),
            UiAction::Add => {
                if let Some(name) = prompt_line_tui(
                    terminal,
                    "Secret Header",
                    "Backend secret name (adds an Authorization header):",
                    "",
                )? {
                    match machine.draft_mut().add_secret_header(tool_id, &name) {
                        Ok(()) => status = "secret header added".to_string(),
                        Err(err) => status = err,
                    }
                }
            }
            UiAction::Enter | UiAction::Edit | UiAction::Toggle => {
                match clamp_selection(selected, rows.len()) {
                    0 => {
                        if let Some(value) =
                            prompt_line_tui(terminal, "Tool Name", "Set tool name:", &tool.name)?
                        {
                            apply_tool_field(
                                machine,
                                tool_id,
                                ToolField::Name(value.trim().to_string()),
                                &mut status,
                                "tool name updated",
                            );
                        }
                    }
                    1 => {
                        if let Some(value) = prompt_line_tui(
                            terminal,
                            "Tool Description",
                            "Set description:",
                            &tool.description,
                        )? {
                            apply_tool_field(
                                machine,
                                tool_id,
                                ToolField::Description(value),
                                &mut status,
                                "tool description updated",
                            );
                        }
                    }
                    2 => {
                        let next = next_method(tool.api_method);
                        apply_tool_field(
                            machine,
                            tool_id,
                            ToolField::ApiMethod(next),
                            &mut status,
                            "method updated",
                        );
                    }
                    3 => {
                        if let Some(value) =
                            prompt_line_tui(terminal, "Tool URL", "Set API URL:", &tool.api_url)?
                        {
                            apply_tool_field(
                                machine,
                                tool_id,
                                ToolField::ApiUrl(value.trim().to_string()),
                                &mut status,
                                "URL updated",
                            );
                        }
                    }
                    4 => {
                        if let Some(message) =
                            run_param_editor(terminal, machine, tool_id, ParamKind::Header)?
                        {
                            status = message;
                        }
                    }
                    5 => {
                        if let Some(message) =
                            run_param_editor(terminal, machine, tool_id, ParamKind::Query)?
                        {
                            status = message;
                        }
                    }
                    6 => {
                        if let Some(message) =
                            run_param_editor(terminal, machine, tool_id, ParamKind::Path)?
                        {
                            status = message;
                        }
                    }
                    7 => {
                        apply_tool_field(
                            machine,
                            tool_id,
                            ToolField::DynamicSubstitution(!tool.dynamic_substitution),
                            &mut status,
                            "dynamic substitution toggled",
                        );
                    }
                    _ => {
                        if let Some(value) = prompt_line_tui(
                            terminal,
                            "Request Payload",
                            "Set request payload template:",
                            &tool.request_payload,
                        )? {
                            apply_tool_field(
                                machine,
                                tool_id,
                                ToolField::RequestPayload(value),
                                &mut status,
                                "request payload updated",
                            );
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

fn display_tool_name(name: &str) -> &str {
    if name.trim().is_empty() {
        "<unnamed>"
    } else {
        name
    }
}

fn apply_tool_field(
    machine: &mut WizardMachine,
    tool_id: &str,
    field: ToolField,
    status: &mut String,
    success: &str,
) {
    match machine.draft_mut().update_tool_field(tool_id, field) {
        Ok(()) => *status = success.to_string(),
        Err(err) => *status = err,
    }
}

fn next_method(current: HttpMethod) -> HttpMethod {
    let position = HTTP_METHOD_OPTIONS
        .iter()
        .position(|method| *method == current)
        .unwrap_or(0);
    HTTP_METHOD_OPTIONS[(position + 1) % HTTP_METHOD_OPTIONS.len()]
}

fn run_param_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    machine: &mut WizardMachine,
    tool_id: &str,
    kind: ParamKind,
) -> Result<Option<String>, String> {
    let mut selected = 0usize;
    let mut status = "Enter edit pair. a add, d delete. Esc back.".to_string();
    loop {
        let Some(tool) = machine.draft().tools.iter().find(|tool| tool.id == tool_id) else {
            return Ok(Some("tool no longer exists".to_string()));
        };
        let pairs: Vec<(String, String, String)> = tool
            .params(kind)
            .iter()
            .map(|pair| (pair.id.clone(), pair.key.clone(), pair.value.clone()))
            .collect();
        let items: Vec<String> = pairs
            .iter()
            .map(|(_, key, value)| format!("{key} = {value}"))
            .collect();
        draw_list_screen(
            terminal,
            &format!(
                "New Agent > Tools > {} > {} params",
                display_tool_name(&tool.name),
                kind.as_str()
            ),
            &items,
            selected,
            &status,
            "Up/Down move | Enter edit | a add | d delete | Esc back",
        )?;
        let Some(action) = next_action(WizardStage::Tools)? else {
            continue;
        };
        match action {
            UiAction::Back | UiAction::Cancel => {
                return Ok(Some(format!("closed {} params", kind.as_str())))
            }
            UiAction::MovePrev => selected = selected.saturating_sub(1),
            UiAction::MoveNext => selected = clamp_selection(selected + 1, pairs.len()),
            UiAction::Add => match machine.draft_mut().add_param(tool_id, kind) {
                Ok(param_id) => {
                    selected = pairs.len();
                    status = "param added".to_string();
                    if let Some(message) =
                        edit_param_pair(terminal, machine, tool_id, kind, &param_id, "", "")?
                    {
                        status = message;
                    }
                }
                Err(err) => status = err,
            },
            UiAction::Delete => {
                if pairs.is_empty() {
                    status = "no params to delete".to_string();
                } else {
                    let (param_id, _, _) = pairs[clamp_selection(selected, pairs.len())].clone();
                    match machine.draft_mut().remove_param(tool_id, kind, &param_id) {
                        Ok(()) => {
                            selected = selected.saturating_sub(1);
                            status = "param removed".to_string();
                        }
                        Err(err) => status = err,
                    }
                }
            }
            UiAction::Enter | UiAction::Edit => {
                if pairs.is_empty() {
                    status = "no params configured".to_string();
                } else {
                    let (param_id, key, value) =
                        pairs[clamp_selection(selected, pairs.len())].clone();
                    if let Some(message) =
                        edit_param_pair(terminal, machine, tool_id, kind, &param_id, &key, &value)?
                    {
                        status = message;
                    }
                }
            }
            _ => {}
        }
    }
}

fn edit_param_pair(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    machine: &mut WizardMachine,
    tool_id: &str,
    kind: ParamKind,
    param_id: &str,
    current_key: &str,
    current_value: &str,
) -> Result<Option<String>, String> {
    let Some(key) = prompt_line_tui(terminal, "Param Key", "Set key:", current_key)? else {
        return Ok(None);
    };
    let Some(value) = prompt_line_tui(
        terminal,
        "Param Value",
        "Set value ({{name}} marks a dynamic variable):",
        current_value,
    )?
    else {
        return Ok(None);
    };
    match machine
        .draft_mut()
        .update_param(tool_id, kind, param_id, key, value)
    {
        Ok(()) => Ok(Some("param updated".to_string())),
        Err(err) => Ok(Some(err)),
    }
}

fn prompt_line_tui(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    title: &str,
    prompt: &str,
    initial: &str,
) -> Result<Option<String>, String> {
    let mut value = initial.to_string();
    loop {
        terminal
            .draw(|frame| {
                let area = centered_rect(70, 30, frame.area());
                let block = Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::new(2, 2, 1, 1));
                frame.render_widget(block.clone(), area);
                let inner = block.inner(area);
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(1),
                    ])
                    .split(inner);
                let max_input_width = rows[3].width.saturating_sub(2) as usize;
                let display_value = tail_for_display(&value, max_input_width);

                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        title,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))),
                    rows[0],
                );
                frame.render_widget(Paragraph::new(prompt), rows[2]);
                frame.render_widget(
                    Paragraph::new(Line::from(format!("> {display_value}"))),
                    rows[3],
                );
                frame.render_widget(Paragraph::new("Enter apply, Esc cancel"), rows[4]);
                frame.set_cursor_position((
                    rows[3].x + 2 + display_value.chars().count() as u16,
                    rows[3].y,
                ));
            })
            .map_err(|e| format!("failed to render prompt: {e}"))?;
        let ev = event::read().map_err(|e| format!("failed to read prompt input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => return Ok(Some(value)),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(ch),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_cycling_wraps_around_the_catalog() {
        let mut method = HttpMethod::Get;
        for _ in 0..HTTP_METHOD_OPTIONS.len() {
            method = next_method(method);
        }
        assert_eq!(method, HttpMethod::Get);
    }
}
