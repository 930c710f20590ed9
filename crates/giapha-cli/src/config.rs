//! CLI configuration.
//!
//! Looked up in `.giapha/config.json` under the working directory first,
//! then in the user config directory, then defaults.

use crate::error::{CliError, Result};
use giapha_graph::{EngineConfig, TieBreak};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_DIR: &str = ".giapha";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Snapshot used when `--snapshot` is not given.
    pub snapshot: PathBuf,
    pub tie_break: TieBreak,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("giapha.json"),
            tie_break: TieBreak::default(),
            color: true,
        }
    }
}

impl Config {
    /// Loads the first config found from `cwd`, or defaults.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let global = dirs::config_dir().map(|dir| dir.join("giapha").join(CONFIG_FILE));
        match locate(cwd, global) {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&contents).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Writes the config into `<root>/.giapha/config.json`.
    pub fn write_to(&self, root: &Path) -> Result<PathBuf> {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir)?;
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            tie_break: self.tie_break,
        }
    }
}

fn locate(cwd: &Path, global: Option<PathBuf>) -> Option<PathBuf> {
    let local = cwd.join(CONFIG_DIR).join(CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    global.filter(|path| path.is_file())
}
