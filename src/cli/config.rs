//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::cli::PathArgs;
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
///
/// The global path flags (`--status-file`, `--keymaps-dir`, `--keymap-tool`,
/// `--store-dir`) given with this command are saved as the new defaults.
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    paths: PathsOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    status_file: String,
    keymaps_dir: String,
    keymap_tool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_dir: Option<String>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, paths: &PathArgs) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(paths),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, paths: &PathArgs) -> CliResult<()> {
        // At least one argument must be provided
        if paths.status_file.is_none()
            && paths.keymaps_dir.is_none()
            && paths.keymap_tool.is_none()
            && paths.store_dir.is_none()
            && self.theme.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --status-file, --keymaps-dir, --keymap-tool, --store-dir, or --theme",
            ));
        }

        if let Some(dir) = &paths.keymaps_dir {
            if !dir.is_dir() {
                return Err(CliError::validation(format!(
                    "Keymap directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        paths.apply_to(&mut config.paths);

        if let Some(theme_str) = &self.theme {
            config.ui.theme_mode = parse_theme_mode(theme_str)?;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn parse_theme_mode(value: &str) -> CliResult<ThemeMode> {
    match value.to_lowercase().as_str() {
        "auto" => Ok(ThemeMode::Auto),
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        _ => Err(CliError::validation(
            "Invalid theme mode. Must be 'auto', 'light', or 'dark'",
        )),
    }
}

fn theme_name(mode: ThemeMode) -> String {
    format!("{mode:?}").to_lowercase()
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        paths: PathsOutput {
            status_file: config.paths.status_file.to_string_lossy().to_string(),
            keymaps_dir: config.paths.keymaps_dir.to_string_lossy().to_string(),
            keymap_tool: config.paths.keymap_tool.to_string_lossy().to_string(),
            store_dir: config
                .paths
                .store_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        ui: UiOutput {
            theme: theme_name(config.ui.theme_mode),
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Keyboard Settings Configuration");
    println!("===============================");
    println!();

    println!("Paths:");
    println!("  Status File:   {}", config.paths.status_file.display());
    println!("  Keymaps Dir:   {}", config.paths.keymaps_dir.display());
    println!("  Keymap Tool:   {}", config.paths.keymap_tool.display());
    match &config.paths.store_dir {
        Some(dir) => println!("  Store Dir:     {}", dir.display()),
        None => println!("  Store Dir:     (config directory)"),
    }
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", theme_name(config.ui.theme_mode));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_parsing() {
        assert_eq!(parse_theme_mode("auto").unwrap(), ThemeMode::Auto);
        assert_eq!(parse_theme_mode("Light").unwrap(), ThemeMode::Light);
        assert_eq!(parse_theme_mode("DARK").unwrap(), ThemeMode::Dark);
        assert!(parse_theme_mode("purple").is_err());
    }

    #[test]
    fn test_theme_name() {
        assert_eq!(theme_name(ThemeMode::Auto), "auto");
        assert_eq!(theme_name(ThemeMode::Dark), "dark");
    }
}
