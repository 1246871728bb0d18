use super::{default_global_config_path, ConfigError, Settings};

pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    let settings = Settings::from_path(&path)?;
    settings.validate()?;
    Ok(settings)
}

/// Settings used when no config file exists yet: library defaults, so the
/// wizard stays usable before `agentforge init` has run.
pub fn load_global_settings_or_default() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    if !path.exists() {
        return Ok(Settings::default());
    }
    load_global_settings()
}
