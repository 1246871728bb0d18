use crate::backend::{ApiClient, ProviderDescriptor, SecretSummary};
use crate::config::{
    default_global_config_path, load_global_settings_or_default, save_settings, ConfigError,
    Settings,
};
use crate::tui::run_wizard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Wizard,
    Providers,
    Secrets,
    Init,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "wizard" | "new" => CliVerb::Wizard,
        "providers" => CliVerb::Providers,
        "secrets" => CliVerb::Secrets,
        "init" => CliVerb::Init,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  wizard                     Launch the interactive agent builder".to_string(),
        "  providers                  List model providers available on the backend".to_string(),
        "  secrets list               List backend secret names".to_string(),
        "  secrets add <name> <value> Store a secret on the backend".to_string(),
        "  init                       Write a default config file".to_string(),
        "  help                       Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let Some(verb) = args.first() else {
        return Ok(help_text());
    };
    match parse_cli_verb(verb) {
        CliVerb::Wizard => run_wizard(),
        CliVerb::Providers => cmd_providers(),
        CliVerb::Secrets => cmd_secrets(&args[1..]),
        CliVerb::Init => cmd_init(),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{verb}`\n\n{}", help_text())),
    }
}

fn load_settings() -> Result<Settings, String> {
    load_global_settings_or_default().map_err(map_config_err)
}

fn map_config_err(err: ConfigError) -> String {
    format!("config error: {err}")
}

fn cmd_providers() -> Result<String, String> {
    let settings = load_settings()?;
    let client = ApiClient::new(&settings);
    let providers = client
        .list_providers()
        .map_err(|err| format!("failed to list providers: {err}"))?;
    if providers.is_empty() {
        return Ok("no providers available".to_string());
    }
    Ok(render_providers(&providers))
}

fn render_providers(providers: &[ProviderDescriptor]) -> String {
    let mut lines = Vec::new();
    for provider in providers {
        lines.push(format!("{} ({})", provider.id, provider.display_name));
        for model in &provider.models {
            let mut capabilities = Vec::new();
            if model.supports_tools {
                capabilities.push("tools");
            }
            if model.supports_vision {
                capabilities.push("vision");
            }
            let capabilities = if capabilities.is_empty() {
                String::new()
            } else {
                format!(" [{}]", capabilities.join(","))
            };
            lines.push(format!(
                "  {} ({}) ctx={}{capabilities}",
                model.id, model.display_name, model.context_length
            ));
        }
    }
    lines.join("\n")
}

fn cmd_secrets(args: &[String]) -> Result<String, String> {
    let settings = load_settings()?;
    let client = ApiClient::new(&settings);
    match args.first().map(String::as_str) {
        Some("list") | None => {
            let secrets = client
                .list_secrets()
                .map_err(|err| format!("failed to list secrets: {err}"))?;
            if secrets.is_empty() {
                return Ok("no secrets stored".to_string());
            }
            Ok(render_secrets(&secrets))
        }
        Some("add") => {
            let (name, value) = match (args.get(1), args.get(2)) {
                (Some(name), Some(value)) => (name, value),
                _ => return Err("usage: secrets add <name> <value>".to_string()),
            };
            if name.trim().is_empty() {
                return Err("secret name must be non-empty".to_string());
            }
            let created = client
                .create_secret(name.trim(), value)
                .map_err(|err| format!("failed to store secret: {err}"))?;
            Ok(format!("secret `{}` stored", created.name))
        }
        Some(other) => Err(format!(
            "unknown secrets subcommand `{other}`; expected `list` or `add`"
        )),
    }
}

fn render_secrets(secrets: &[SecretSummary]) -> String {
    secrets
        .iter()
        .map(|secret| match &secret.created_at {
            Some(created_at) => format!("{} (created {created_at})", secret.name),
            None => secret.name.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cmd_init() -> Result<String, String> {
    let path = default_global_config_path().map_err(map_config_err)?;
    if path.exists() {
        return Ok(format!("config already exists at {}", path.display()));
    }
    let written = save_settings(&Settings::default()).map_err(map_config_err)?;
    Ok(format!("wrote default config to {}", written.display()))
}
