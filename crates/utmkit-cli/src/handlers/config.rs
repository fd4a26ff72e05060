//! Configuration command handlers

use crate::cli::{
    ConfigAction, ConfigArgs, ConfigFormat, ConfigGetArgs, ConfigGetFormat, ConfigInitArgs,
    ConfigShowArgs,
};
use crate::config::{Config, ENV_OVERRIDES};
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::path::PathBuf;

/// Project config written by `config init` without a path
const PROJECT_CONFIG: &str = ".utmkit.toml";

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Get(get_args) => handle_config_get(get_args, config, output),
        ConfigAction::Validate => handle_config_validate(config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match (args.path, args.user) {
        (Some(path), _) => path,
        (None, true) => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
        (None, false) => PathBuf::from(PROJECT_CONFIG),
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to set defaults.base_url, defaults.channel and the data files.")
}

/// Handle config show subcommand
fn handle_config_show(
    args: ConfigShowArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    output.writeln(content.trim_end())
}

/// Handle config get subcommand
fn handle_config_get(args: ConfigGetArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let value = config.get(&args.key)?;

    match args.format {
        ConfigGetFormat::Value => output.writeln(&value),
        ConfigGetFormat::Json => {
            let json_value = serde_json::json!({
                "key": args.key,
                "value": value
            });
            output.writeln(&serde_json::to_string_pretty(&json_value)?)
        }
    }
}

/// Handle config validate subcommand
fn handle_config_validate(config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.info("Validating configuration...")?;

    if let Err(e) = config.validate() {
        output.error(&format!("✗ Configuration validation failed: {}", e))?;
        return Err(e);
    }
    output.success("✓ Configuration is valid")?;

    output.section("Configuration Sources")?;
    match Config::find_config_file() {
        Some(path) => output.info(&format!("✓ Config file: {}", path.display()))?,
        None => output.info("✗ No config file found")?,
    }
    if let Some(user_path) = Config::user_config_path() {
        let exists = if user_path.exists() { "✓" } else { "✗" };
        output.info(&format!("{} User config: {}", exists, user_path.display()))?;
    }

    let active: Vec<(&str, String)> = ENV_OVERRIDES
        .iter()
        .filter_map(|var| std::env::var(var).ok().map(|value| (*var, value)))
        .collect();
    if !active.is_empty() {
        output.section("Active Environment Variables")?;
        for (var, value) in active {
            output.info(&format!("• {} = {}", var, value))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::io;
    use tempfile::TempDir;

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(io::sink()))
    }

    #[test]
    fn test_init_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("utmkit.toml");
        let init = |force| ConfigInitArgs {
            path: Some(path.clone()),
            user: false,
            force,
        };

        handle_config_init(init(false), &mut quiet_output()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());

        std::fs::write(&path, "[defaults]\nmode = \"library\"\n").unwrap();
        handle_config_init(init(false), &mut quiet_output()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("library"));

        handle_config_init(init(true), &mut quiet_output()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_get_unknown_key_fails() {
        let args = ConfigGetArgs {
            key: "defaults.provider".to_string(),
            format: ConfigGetFormat::Value,
        };
        let err = handle_config_get(args, &Config::default(), &mut quiet_output()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
