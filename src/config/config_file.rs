use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The config file
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Editor to use when `EDITOR` is not set
    pub default_editor: String,
    /// Program that re-runs a command with elevated privileges
    pub elevator: String,
    /// Directories to scan in addition to the conventional ones
    pub extra_dirs: Vec<PathBuf>,
    /// File name patterns of desktop entries that are never flagged
    pub ignore: Vec<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            default_editor: "nano".into(),
            elevator: "pkexec".into(),
            extra_dirs: Vec::new(),
            ignore: Vec::new(),
        }
    }
}

impl ConfigFile {
    /// Load ~/.config/desktop-sweep/desktop-sweep.toml
    #[mutants::skip] // Cannot test directly, depends on system state
    pub fn load() -> Result<Self> {
        Ok(confy::load("desktop-sweep")?)
    }

    /// Pick the editor command line, letting `EDITOR` win when it is set
    pub fn editor(&self, env_editor: Option<String>) -> String {
        env_editor
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| self.default_editor.clone())
    }
}
