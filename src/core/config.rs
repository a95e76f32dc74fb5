//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.topicform/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Loading and resolving run before the file logger exists, so neither logs
//! directly. What they have to say is collected as [`Notes`] and written by
//! the caller once logging is up.

use log::{Level, LevelFilter, log};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_ENDPOINT;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FormConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_FILE: &str = "topicform.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Messages gathered while loading or resolving, logged later by [`log_notes`].
pub type Notes = Vec<(Level, String)>;

pub fn log_notes(notes: &[(Level, String)]) {
    for (level, message) in notes {
        log!(*level, "{}", message);
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    /// `None` means requests may stay pending indefinitely.
    pub timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Env or config values that were ignored.
    pub notes: Notes,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub endpoint: Option<&'a str>,
    pub log_file: Option<&'a Path>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.topicform/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".topicform").join("config.toml"))
}

/// Load config from `~/.topicform/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FormConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<(FormConfig, Notes), ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            let note = "Could not determine home directory, using default config";
            return Ok((FormConfig::default(), vec![(Level::Warn, note.to_string())]));
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<(FormConfig, Notes), ConfigError> {
    if !path.exists() {
        let mut notes = vec![(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        )];
        if let Err(e) = generate_default_config(path) {
            notes.push((Level::Warn, format!("Failed to write default config: {e}")));
        }
        return Ok((FormConfig::default(), notes));
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FormConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    let notes = vec![
        (Level::Info, format!("Loaded config from {}", path.display())),
        (Level::Debug, format!("Config: {config:?}")),
    ];
    Ok((config, notes))
}

fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# topicform configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [endpoint]
# url = "http://127.0.0.1:5000/api/greet"   # Or set TOPICFORM_ENDPOINT
# timeout_secs = 60                         # Or TOPICFORM_TIMEOUT_SECS; unset = wait forever

# [logging]
# file = "topicform.log"
# level = "debug"                           # "off", "error", "warn", "info", "debug", "trace"
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FormConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &FormConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let mut notes = Notes::new();

    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .map(|s| s.to_string())
        .or_else(|| env("TOPICFORM_ENDPOINT"))
        .or_else(|| config.endpoint.url.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Timeout: env → config → none. Zero also means none.
    let timeout_secs = env("TOPICFORM_TIMEOUT_SECS")
        .and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(e) => {
                notes.push((
                    Level::Warn,
                    format!("Ignoring TOPICFORM_TIMEOUT_SECS={raw:?}: {e}"),
                ));
                None
            }
        })
        .or(config.endpoint.timeout_secs);
    let timeout = timeout_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    let log_file = cli
        .log_file
        .map(Path::to_path_buf)
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let log_level = config
        .logging
        .level
        .as_deref()
        .and_then(|raw| match raw.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                notes.push((Level::Warn, format!("Unknown log level {raw:?}, using default")));
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        endpoint,
        timeout,
        log_file,
        log_level,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&FormConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.endpoint, "http://127.0.0.1:5000/api/greet");
        assert_eq!(resolved.timeout, None);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = FormConfig {
            endpoint: EndpointConfig {
                url: Some("http://10.0.0.2:8080/api/greet".to_string()),
                timeout_secs: Some(30),
            },
            logging: LoggingConfig {
                file: Some("/tmp/form.log".to_string()),
                level: Some("warn".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.endpoint, "http://10.0.0.2:8080/api/greet");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(30)));
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/form.log"));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_resolve_env_beats_config_and_cli_beats_env() {
        let config = FormConfig {
            endpoint: EndpointConfig {
                url: Some("http://from-config/api/greet".to_string()),
                timeout_secs: Some(30),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "TOPICFORM_ENDPOINT" => Some("http://from-env/api/greet".to_string()),
            "TOPICFORM_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.endpoint, "http://from-env/api/greet");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(5)));

        let cli = CliOverrides {
            endpoint: Some("http://from-cli/api/greet"),
            log_file: None,
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.endpoint, "http://from-cli/api/greet");
    }

    #[test]
    fn test_zero_or_garbage_timeout_means_none() {
        let config = FormConfig {
            endpoint: EndpointConfig {
                url: None,
                timeout_secs: Some(0),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.timeout, None);

        let garbage = |key: &str| (key == "TOPICFORM_TIMEOUT_SECS").then(|| "soon".to_string());
        let resolved = resolve_with_env(&FormConfig::default(), &CliOverrides::default(), garbage);
        assert_eq!(resolved.timeout, None);
        assert_eq!(resolved.notes.len(), 1);
        assert_eq!(resolved.notes[0].0, Level::Warn);
        assert!(resolved.notes[0].1.contains("TOPICFORM_TIMEOUT_SECS=\"soon\""));
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = FormConfig {
            logging: LoggingConfig {
                file: None,
                level: Some("loud".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(
            resolved.notes,
            vec![(Level::Warn, "Unknown log level \"loud\", using default".to_string())]
        );
    }

    #[test]
    fn test_clean_resolve_has_no_notes() {
        let resolved = resolve_with_env(&FormConfig::default(), &CliOverrides::default(), no_env);
        assert!(resolved.notes.is_empty());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[endpoint]
timeout_secs = 12
"#;
        let config: FormConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint.timeout_secs, Some(12));
        assert!(config.endpoint.url.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_load_generates_template_then_parses_it() {
        let dir = std::env::temp_dir().join(format!("topicform-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let (first, notes) = load_config_from(&path).unwrap();
        assert!(first.endpoint.url.is_none());
        assert!(path.exists());
        assert_eq!(notes.len(), 1);
        assert!(notes[0].1.starts_with("No config file found"));

        // The generated template is all comments, so it parses to defaults.
        let (second, notes) = load_config_from(&path).unwrap();
        assert!(second.endpoint.url.is_none());
        assert!(notes[0].1.starts_with("Loaded config from"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_malformed_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("topicform-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[endpoint\nurl = 3").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
