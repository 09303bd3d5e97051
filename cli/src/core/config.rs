//! # shexec Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the shexec configuration. Every
//! setting is optional; with no files present the defaults reproduce the
//! plain behavior (always prompt, no attempt cap, no timeout, host interpreter).
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit `--config <PATH>` file (replaces 2 and 3 entirely)
//! 2. Project-specific `.shexec.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [confirmation]
//! assume_yes = false
//! max_attempts = 5
//!
//! [execution]
//! timeout_secs = 30
//! interpreter = "zsh"
//! interpreter_flag = "-c"
//! ```
//!
use crate::common::process::Interpreter;
use crate::common::ui::prompt::ConfirmOptions;
use crate::core::error::{Result, ShexecError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub confirmation: ConfirmationConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Settings for the yes/no prompt.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfirmationConfig {
    /// Skip the prompt and run the command straight away.
    #[serde(default)]
    pub assume_yes: bool,
    /// Give up after this many unrecognised answers. Unbounded when absent.
    pub max_attempts: Option<u32>,
}

/// Settings for running the interpreter.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Cancel the command after this many seconds.
    pub timeout_secs: Option<u64>,
    /// Program used instead of the host default (`bash` / `cmd`).
    pub interpreter: Option<String>,
    /// Flag passed before the command string. Defaults to `-c`.
    pub interpreter_flag: Option<String>,
}

impl Config {
    pub fn confirm_options(&self) -> ConfirmOptions {
        ConfirmOptions {
            max_attempts: self.confirmation.max_attempts,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.execution.timeout_secs.map(Duration::from_secs)
    }

    /// The interpreter to run commands with: the configured override, or the
    /// host default.
    pub fn interpreter(&self) -> Interpreter {
        match &self.execution.interpreter {
            Some(program) => Interpreter::new(
                program.clone(),
                self.execution
                    .interpreter_flag
                    .clone()
                    .unwrap_or_else(|| "-c".to_string()),
            ),
            None => Interpreter::host(),
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".shexec.toml";

/// Loads the configuration, honoring an explicit path when one is given.
pub fn load_config(explicit: Option<&str>) -> Result<Config> {
    let config = match explicit {
        Some(raw) => {
            let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(&path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "shexec", "shexec") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

/// Walks up from `start` looking for `.shexec.toml`, stopping at the first
/// directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Field-by-field merge; a value set in the project file wins.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        confirmation: ConfirmationConfig {
            assume_yes: project.confirmation.assume_yes || user.confirmation.assume_yes,
            max_attempts: project
                .confirmation
                .max_attempts
                .or(user.confirmation.max_attempts),
        },
        execution: ExecutionConfig {
            timeout_secs: project
                .execution
                .timeout_secs
                .or(user.execution.timeout_secs),
            interpreter: project
                .execution
                .interpreter
                .clone()
                .or(user.execution.interpreter.clone()),
            // The flag belongs to whichever file chose the interpreter.
            interpreter_flag: if project.execution.interpreter.is_some() {
                project.execution.interpreter_flag
            } else {
                user.execution.interpreter_flag
            },
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.confirmation.max_attempts == Some(0) {
        return Err(anyhow!(ShexecError::Config(
            "confirmation.max_attempts must be greater than 0".to_string()
        )));
    }
    if config.execution.timeout_secs == Some(0) {
        return Err(anyhow!(ShexecError::Config(
            "execution.timeout_secs must be greater than 0".to_string()
        )));
    }
    match &config.execution.interpreter {
        Some(program) if program.trim().is_empty() => {
            return Err(anyhow!(ShexecError::Config(
                "execution.interpreter cannot be empty".to_string()
            )));
        }
        None if config.execution.interpreter_flag.is_some() => {
            return Err(anyhow!(ShexecError::Config(
                "execution.interpreter_flag requires execution.interpreter".to_string()
            )));
        }
        _ => {}
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [confirmation]
            max_attempts = 4

            [execution]
            timeout_secs = 15
            interpreter = "zsh"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert!(!config.confirmation.assume_yes); // Default
        assert_eq!(config.confirmation.max_attempts, Some(4));
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.interpreter(), Interpreter::new("zsh", "-c"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[confirmation]\nretries = 2\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_use_host_interpreter_and_no_cap() {
        let config = Config::default();
        assert_eq!(config.interpreter(), Interpreter::host());
        assert_eq!(config.confirm_options().max_attempts, None);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_merge_prefers_project_values() {
        let user = Config {
            confirmation: ConfirmationConfig {
                assume_yes: false,
                max_attempts: Some(2),
            },
            execution: ExecutionConfig {
                timeout_secs: Some(60),
                interpreter: Some("zsh".into()),
                interpreter_flag: Some("-lc".into()),
            },
        };
        let project = Config {
            execution: ExecutionConfig {
                interpreter: Some("sh".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));

        assert_eq!(merged.confirmation.max_attempts, Some(2));
        assert_eq!(merged.execution.timeout_secs, Some(60));
        assert_eq!(merged.execution.interpreter.as_deref(), Some("sh"));
        assert_eq!(merged.execution.interpreter_flag, None);
    }

    #[test]
    fn test_validate_config_rejects_zero_values() {
        let config = Config {
            confirmation: ConfirmationConfig {
                max_attempts: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("max_attempts"));

        let config = Config {
            execution: ExecutionConfig {
                timeout_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_flag_without_interpreter() {
        let config = Config {
            execution: ExecutionConfig {
                interpreter_flag: Some("-c".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ShexecError>(),
            Some(ShexecError::Config(_))
        ));
    }

    #[test]
    fn test_find_project_config_stops_at_git_root() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();

        // Above the git root: must not be found.
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join("a").join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join("a").join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_explicit_config_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[confirmation]\nassume_yes = true\n").unwrap();

        let config = load_config(Some(path.to_str().unwrap())).unwrap();
        assert!(config.confirmation.assume_yes);
    }

    #[test]
    fn test_confirm_options_carry_configured_cap() {
        let config: Config = toml::from_str("[confirmation]\nmax_attempts = 3\n").unwrap();
        assert_eq!(
            config.confirm_options(),
            ConfirmOptions {
                max_attempts: Some(3)
            }
        );
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");
        let err = load_config(Some(path.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration file"));
    }
}
