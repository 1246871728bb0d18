use crate::tui::navigation::clamp_selection;
use crate::wizard::{
    framework_option, framework_options, AgentDraft, Architecture, ConfigureForm, ToolDefinition,
    AGENT_TYPE_OPTIONS, ARCHITECTURE_OPTIONS,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Padding, Paragraph, Row, Table};
use ratatui::Terminal;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub field: String,
    pub value: Option<String>,
}

pub fn field_row(field: &str, value: Option<String>) -> FieldRow {
    FieldRow {
        field: field.to_string(),
        value,
    }
}

/// Shows only the tail of long secrets so the full API key never sits on
/// screen.
pub fn tail_for_display(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }
    format!("…{}", chars[chars.len() - max_chars..].iter().collect::<String>())
}

pub fn agent_type_items() -> Vec<String> {
    AGENT_TYPE_OPTIONS
        .iter()
        .map(|option| format!("{} — {}", option.label, option.summary))
        .collect()
}

pub fn architecture_items() -> Vec<String> {
    ARCHITECTURE_OPTIONS
        .iter()
        .map(|option| format!("{} — {}", option.label, option.summary))
        .collect()
}

pub fn framework_items(architecture: Architecture) -> Vec<String> {
    framework_options(architecture)
        .iter()
        .map(|option| {
            if option.has_configuration_form {
                option.label.to_string()
            } else {
                format!("{} (coming soon: default settings)", option.label)
            }
        })
        .collect()
}

pub fn configure_rows(form: &ConfigureForm) -> Vec<FieldRow> {
    let mcp = form.settings.mcp.clone().unwrap_or_default();
    vec![
        field_row("Agent name", Some(form.name.clone())),
        field_row("Description", Some(form.description.clone())),
        field_row("Provider", Some(form.settings.provider_id.clone())),
        field_row("Model", Some(form.settings.model_id.clone())),
        field_row(
            "API key",
            Some(tail_for_display(&form.settings.api_key, 6)),
        ),
        field_row("Model name", Some(form.settings.model_name.clone())),
        field_row(
            "Temperature",
            Some(format!("{:.2}", form.settings.temperature)),
        ),
        field_row("Base URL", Some(form.settings.base_url.clone())),
        field_row("System prompt", Some(form.settings.system_prompt.clone())),
        field_row("MCP adapter", Some(if mcp.enabled { "on" } else { "off" }.to_string())),
        field_row("MCP transport", Some(mcp.transport.as_str().to_string())),
        field_row("MCP URL", Some(mcp.url)),
    ]
}

pub fn tool_list_items(tools: &[ToolDefinition]) -> Vec<String> {
    tools
        .iter()
        .map(|tool| {
            let name = if tool.name.trim().is_empty() {
                "<unnamed>"
            } else {
                tool.name.as_str()
            };
            format!(
                "{name} {} {} ({} headers, {} query, {} path)",
                tool.api_method.as_str(),
                tool.api_url,
                tool.api_headers.len(),
                tool.api_query_params.len(),
                tool.api_path_params.len()
            )
        })
        .collect()
}

pub fn tool_rows(tool: &ToolDefinition) -> Vec<FieldRow> {
    let pairs = |pairs: &[crate::wizard::ParamPair]| {
        if pairs.is_empty() {
            "<none>".to_string()
        } else {
            pairs
                .iter()
                .map(|pair| format!("{}={}", pair.key, pair.value))
                .collect::<Vec<_>>()
                .join(", ")
        }
    };
    vec![
        field_row("Name", Some(tool.name.clone())),
        field_row("Description", Some(tool.description.clone())),
        field_row("Method", Some(tool.api_method.as_str().to_string())),
        field_row("URL", Some(tool.api_url.clone())),
        field_row("Headers", Some(pairs(&tool.api_headers))),
        field_row("Query params", Some(pairs(&tool.api_query_params))),
        field_row("Path params", Some(pairs(&tool.api_path_params))),
        field_row(
            "Dynamic substitution",
            Some(if tool.dynamic_substitution { "on" } else { "off" }.to_string()),
        ),
        field_row("Request payload", Some(tool.request_payload.clone())),
    ]
}

pub fn review_rows(draft: &AgentDraft) -> Vec<FieldRow> {
    let architecture = draft.architecture;
    let framework_label = draft
        .framework
        .as_deref()
        .and_then(|id| framework_option(architecture.unwrap_or(Architecture::Mono), id))
        .map(|option| option.label.to_string())
        .or_else(|| draft.framework.clone());
    let tool_names = if draft.tools.is_empty() {
        "<none>".to_string()
    } else {
        draft
            .tools
            .iter()
            .map(|tool| tool.name.clone())
            .collect::<Vec<_>>()
            .join(", ")
    };
    vec![
        field_row("Agent name", Some(draft.name.clone())),
        field_row(
            "Agent type",
            draft.agent_type.map(|value| value.as_str().to_string()),
        ),
        field_row(
            "Architecture",
            architecture.map(|value| value.as_str().to_string()),
        ),
        field_row("Framework", framework_label),
        field_row("Provider", Some(draft.settings.provider_id.clone())),
        field_row("Model", Some(draft.settings.model_id.clone())),
        field_row("Tools", Some(format!("{}: {tool_names}", draft.tools.len()))),
        field_row(
            "Sandbox",
            Some(
                draft
                    .settings
                    .attached_sandbox_id
                    .clone()
                    .unwrap_or_else(|| "<none>".to_string()),
            ),
        ),
    ]
}

pub(crate) fn draw_list_screen(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    title: &str,
    items: &[String],
    selected: usize,
    status: &str,
    hint: &str,
) -> Result<(), String> {
    let selected = clamp_selection(selected, items.len());
    terminal
        .draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(4),
                ])
                .split(frame.area());
            frame.render_widget(header_paragraph(title), chunks[0]);

            let mut list_items = Vec::with_capacity(items.len());
            for (idx, line) in items.iter().enumerate() {
                let mut item = ListItem::new(Line::from(Span::raw(line.clone())));
                if idx == selected {
                    item = item.style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    );
                }
                list_items.push(item);
            }
            frame.render_widget(List::new(list_items).block(main_panel_block()), chunks[1]);
            frame.render_widget(footer_paragraph(status, hint), chunks[2]);
        })
        .map_err(|e| format!("failed to render list screen: {e}"))?;
    Ok(())
}

pub(crate) fn draw_field_screen(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    title: &str,
    rows: &[FieldRow],
    selected: usize,
    status: &str,
    hint: &str,
) -> Result<(), String> {
    let selected = clamp_selection(selected, rows.len());
    terminal
        .draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(4),
                ])
                .split(frame.area());
            frame.render_widget(header_paragraph(title), chunks[0]);

            let table_rows = rows.iter().enumerate().map(|(idx, row)| {
                let style = if idx == selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(row.field.clone()),
                    Cell::from(row.value.clone().unwrap_or_default()),
                ])
                .style(style)
            });
            let table = Table::new(
                table_rows,
                [Constraint::Percentage(35), Constraint::Percentage(65)],
            )
            .column_spacing(2)
            .block(main_panel_block());
            frame.render_widget(table, chunks[1]);
            frame.render_widget(footer_paragraph(status, hint), chunks[2]);
        })
        .map_err(|e| format!("failed to render field screen: {e}"))?;
    Ok(())
}

fn header_paragraph(title: &str) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("AgentForge agent builder"),
    ])
    .block(Block::default().borders(Borders::ALL))
}

fn footer_paragraph(status: &str, hint: &str) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(hint.to_string()),
        Line::from(format!("Status: {status}")),
    ])
    .block(Block::default().borders(Borders::ALL))
}

pub(crate) fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    area: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(3, 3, 2, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::AgentType;

    #[test]
    fn selection_items_mirror_the_static_catalogs() {
        assert_eq!(agent_type_items().len(), AGENT_TYPE_OPTIONS.len());
        assert_eq!(architecture_items().len(), ARCHITECTURE_OPTIONS.len());
        let frameworks = framework_items(Architecture::Mono);
        assert_eq!(frameworks[0], "LangChain");
        assert!(frameworks[1].contains("coming soon"));
    }

    #[test]
    fn api_key_is_masked_down_to_its_tail() {
        assert_eq!(tail_for_display("sk-test", 20), "sk-test");
        assert_eq!(tail_for_display("sk-1234567890", 4), "…7890");
    }

    #[test]
    fn review_rows_name_the_framework_and_count_tools() {
        let mut draft = AgentDraft::default();
        draft.agent_type = Some(AgentType::Textual);
        draft.architecture = Some(Architecture::Mono);
        draft.framework = Some("langchain".to_string());
        draft.add_tool().expect("add tool");
        draft
            .update_tool_field(
                &draft.tools[0].id.clone(),
                crate::wizard::ToolField::Name("getWeather".to_string()),
            )
            .expect("name tool");

        let rows = review_rows(&draft);
        let framework = rows
            .iter()
            .find(|row| row.field == "Framework")
            .expect("framework row");
        assert_eq!(framework.value.as_deref(), Some("LangChain"));
        let tools = rows.iter().find(|row| row.field == "Tools").expect("tools row");
        assert_eq!(tools.value.as_deref(), Some("1: getWeather"));
    }
}
