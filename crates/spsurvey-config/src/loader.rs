// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Values are resolved in three tiers, later tiers winning:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{validate_config, ConfigError, ConfigResult, LogFormat, SurveyConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "spsurvey_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `SPSURVEY_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("SPSURVEY_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by SPSURVEY_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet SPSURVEY_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, the file is searched for.
/// * `cli_args` - Optional CLI argument overrides keyed by dotted name (`engine.send_hwm`)
///
/// # Errors
///
/// Returns error if the file is missing, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SurveyConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: SurveyConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    validate_config(&config)?;

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SPSURVEY_SEND_HWM` -> `engine.send_hwm`
/// - `SPSURVEY_RECV_HWM` -> `engine.recv_hwm`
/// - `SPSURVEY_LOG_LEVEL` -> `logging.level`
/// - `SPSURVEY_LOG_FORMAT` -> `logging.format`
///
/// Unparseable values are ignored and the file value is kept.
pub fn apply_environment_overrides(config: &mut SurveyConfig) {
    if let Ok(value) = env::var("SPSURVEY_SEND_HWM") {
        if let Ok(hwm) = value.parse::<usize>() {
            config.engine.send_hwm = hwm;
        }
    }
    if let Ok(value) = env::var("SPSURVEY_RECV_HWM") {
        if let Ok(hwm) = value.parse::<usize>() {
            config.engine.recv_hwm = hwm;
        }
    }
    if let Ok(value) = env::var("SPSURVEY_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("SPSURVEY_LOG_FORMAT") {
        if let Ok(format) = value.parse::<LogFormat>() {
            config.logging.format = format;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// Unlike environment overrides, a CLI value that does not parse is reported
/// back to the caller since it was typed explicitly.
pub fn apply_cli_overrides(
    config: &mut SurveyConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("engine.send_hwm") {
        config.engine.send_hwm = parse_usize("engine.send_hwm", value)?;
    }
    if let Some(value) = cli_args.get("engine.recv_hwm") {
        config.engine.recv_hwm = parse_usize("engine.recv_hwm", value)?;
    }
    if let Some(value) = cli_args.get("logging.level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("logging.format") {
        config.logging.format = value.parse()?;
    }
    Ok(())
}

fn parse_usize(key: &str, value: &str) -> ConfigResult<usize> {
    value
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidValue(format!("{} = '{}' is not a count", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "SPSURVEY_CONFIG_PATH",
            "SPSURVEY_SEND_HWM",
            "SPSURVEY_RECV_HWM",
            "SPSURVEY_LOG_LEVEL",
            "SPSURVEY_LOG_FORMAT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        File::create(&config_path).unwrap();

        env::set_var("SPSURVEY_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        clear_env();

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("SPSURVEY_CONFIG_PATH", "/nonexistent/spsurvey.toml");
        let result = find_config_file();
        clear_env();

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[engine]").unwrap();
        writeln!(file, "send_hwm = 4").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "format = \"json\"").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.engine.send_hwm, 4);
        assert_eq!(config.engine.recv_hwm, 1000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[engine\nsend_hwm = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_zero_hwm() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[engine]\nrecv_hwm = 0\n").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let mut config = SurveyConfig::default();

        env::set_var("SPSURVEY_SEND_HWM", "8");
        env::set_var("SPSURVEY_RECV_HWM", "not-a-number");
        env::set_var("SPSURVEY_LOG_LEVEL", "debug");

        apply_environment_overrides(&mut config);
        clear_env();

        assert_eq!(config.engine.send_hwm, 8);
        assert_eq!(config.engine.recv_hwm, 1000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = SurveyConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("engine.recv_hwm".to_string(), "16".to_string());
        cli_args.insert("logging.format".to_string(), "JSON".to_string());

        apply_cli_overrides(&mut config, &cli_args).unwrap();

        assert_eq!(config.engine.recv_hwm, 16);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_cli_override_rejects_garbage() {
        let mut config = SurveyConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("engine.send_hwm".to_string(), "lots".to_string());

        let result = apply_cli_overrides(&mut config, &cli_args);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
        assert_eq!(config.engine.send_hwm, 1000);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[engine]\nsend_hwm = 2\nrecv_hwm = 2\n").unwrap();

        env::set_var("SPSURVEY_SEND_HWM", "3");
        env::set_var("SPSURVEY_RECV_HWM", "3");

        let mut cli_args = HashMap::new();
        cli_args.insert("engine.send_hwm".to_string(), "5".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        clear_env();

        // CLI wins for send, env wins for recv
        assert_eq!(config.engine.send_hwm, 5);
        assert_eq!(config.engine.recv_hwm, 3);
    }
}
