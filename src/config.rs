//! Configuration handling for the form client
//!
//! Settings come from three layers: compiled-in defaults, the user's
//! `config.json`, then command line flags.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Gateway address used when nothing else is configured
pub const DEFAULT_BACKEND: &str = "http://192.168.1.10:8080";

/// Action values offered when the config file lists none
pub const DEFAULT_ACTIONS: [&str; 3] = ["checkout", "checkin", "update"];

/// User configuration file contents
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Backend base URL
    pub backend_url: Option<String>,
    /// Hide the backend URL field
    pub hide_backend_field: Option<bool>,
    /// Hide the task id field
    pub hide_task_field: Option<bool>,
    /// Load dropdown options at start-up
    pub auto_load: Option<bool>,
    /// Values for the action dropdown
    pub actions: Option<Vec<String>>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "scanform", "scanform")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: FormConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Command line overrides
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend_url: Option<String>,
    pub task_id: Option<String>,
    pub launch_link: Option<String>,
    pub photo: Option<PathBuf>,
    pub no_auto_load: bool,
}

/// Explicit settings handed to the app at initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Used when the backend field is blank
    pub default_backend: String,
    pub hide_backend_field: bool,
    pub hide_task_field: bool,
    pub auto_load: bool,
    pub actions: Vec<String>,
    /// Pre-filled task id
    pub task_id: Option<String>,
    /// Link the form was opened with (`?task=` source)
    pub launch_link: Option<String>,
    /// Pre-attached photo
    pub photo: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            default_backend: DEFAULT_BACKEND.to_string(),
            hide_backend_field: false,
            hide_task_field: false,
            auto_load: true,
            actions: DEFAULT_ACTIONS.iter().map(|a| a.to_string()).collect(),
            task_id: None,
            launch_link: None,
            photo: None,
        }
    }
}

impl ClientSettings {
    /// Merge the config file and command line over the defaults
    pub fn resolve(config: FormConfig, overrides: Overrides) -> Self {
        let defaults = Self::default();
        let actions = config
            .actions
            .filter(|actions| !actions.is_empty())
            .unwrap_or(defaults.actions);

        Self {
            default_backend: overrides
                .backend_url
                .or(config.backend_url)
                .unwrap_or(defaults.default_backend),
            hide_backend_field: config
                .hide_backend_field
                .unwrap_or(defaults.hide_backend_field),
            hide_task_field: config.hide_task_field.unwrap_or(defaults.hide_task_field),
            auto_load: !overrides.no_auto_load && config.auto_load.unwrap_or(defaults.auto_load),
            actions,
            task_id: overrides.task_id,
            launch_link: overrides.launch_link,
            photo: overrides.photo,
        }
    }
}
