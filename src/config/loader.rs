//! Settings: the optional TOML file, environment overrides and CLI flags,
//! resolved into one [`ResolvedConfig`].

use crate::editor::DEFAULT_EDITOR;
use crate::view::renderer::{DEFAULT_NAME_WIDTH, DEFAULT_NUMBER_WIDTH, DEFAULT_TAB_SIZE};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "HAPPYGREP_CONFIG";

/// Environment variable overriding the editor template.
pub const EDITOR_ENV: &str = "HAPPYGREP_EDITOR";

/// Why a configuration could not be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// File that could not be read.
        path: PathBuf,
        /// I/O error text.
        reason: String,
    },

    /// Bad TOML syntax, a wrong value type or an unknown key.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Offending file.
        path: PathBuf,
        /// Message from the TOML parser.
        reason: String,
    },

    /// A setting has a value the viewer cannot use.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name as written in the config file.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Contents of `config.toml`. Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Editor command template with `{line}` and `{file}` placeholders.
    #[serde(default)]
    pub editor: Option<String>,

    /// Tab stop used when expanding content.
    #[serde(default)]
    pub tab_size: Option<usize>,

    /// Width of the file name column.
    #[serde(default)]
    pub name_width: Option<usize>,

    /// Width of the line number column.
    #[serde(default)]
    pub number_width: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Settings the viewer actually runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Editor command template.
    pub editor: String,
    /// Tab stop.
    pub tab_size: usize,
    /// File name column width.
    pub name_width: usize,
    /// Line number column width.
    pub number_width: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            editor: DEFAULT_EDITOR.to_string(),
            tab_size: DEFAULT_TAB_SIZE,
            name_width: DEFAULT_NAME_WIDTH,
            number_width: DEFAULT_NUMBER_WIDTH,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject values the renderer or editor cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "editor",
                reason: "must not be empty".to_string(),
            });
        }
        for (field, value) in [
            ("tab_size", self.tab_size),
            ("name_width", self.name_width),
            ("number_width", self.number_width),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// `happygrep/happygrep.log` under the platform state directory, or in the
/// working directory where the platform has none (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("happygrep").join("happygrep.log")
    } else {
        PathBuf::from("happygrep.log")
    }
}

/// Read and parse the config file at `path`. A path that does not exist
/// yields `Ok(None)`.
///
/// # Errors
///
/// `ReadError` if the path exists but cannot be read, `ParseError` if the
/// contents are not a valid config.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::ReadError {
                path,
                reason: err.to_string(),
            })
        }
    };

    toml::from_str(&contents)
        .map(Some)
        .map_err(|err| ConfigError::ParseError {
            path,
            reason: err.to_string(),
        })
}

/// `happygrep/config.toml` under the platform config directory, `None`
/// without a home directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("happygrep").join("config.toml"))
}

/// Pick the config file and load it: `--config` first, then
/// `HAPPYGREP_CONFIG`, then [`default_config_path`]. Only the first source
/// present is consulted.
///
/// # Errors
///
/// Same as [`load_config_file`] for the chosen path.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Fill every key the file left out with its built-in default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        editor: config.editor.unwrap_or(defaults.editor),
        tab_size: config.tab_size.unwrap_or(defaults.tab_size),
        name_width: config.name_width.unwrap_or(defaults.name_width),
        number_width: config.number_width.unwrap_or(defaults.number_width),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// `HAPPYGREP_EDITOR` replaces the editor template.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(editor) = std::env::var(EDITOR_ENV) {
        config.editor = editor;
    }

    config
}

/// Flags given on the command line win over every other source; `None`
/// leaves the current value.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    editor_override: Option<String>,
    tab_size_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(editor) = editor_override {
        config.editor = editor;
    }

    if let Some(tab_size) = tab_size_override {
        config.tab_size = tab_size;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
