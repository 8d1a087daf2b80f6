use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{DisplayZone, IdScheme};
use crate::{flog_debug, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Time zone used when rendering timestamps in descriptions.
    #[serde(default)]
    pub display_zone: DisplayZone,
    /// How new node ids are generated.
    #[serde(default)]
    pub id_scheme: IdScheme,
    /// Graph file used when a command is given no path.
    pub default_graph: Option<String>,
}

impl Config {
    pub fn flowdesk_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".flowdesk"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::flowdesk_dir()?.join("flowdesk.toml"))
    }

    /// Resolve the graph path to operate on, preferring an explicit argument.
    pub fn graph_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path);
        }
        match &self.default_graph {
            Some(path) => Ok(expand_tilde(path)),
            None => Err(Error::Validation(
                "no graph file given and no default_graph configured".to_string(),
            )),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        flog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            flog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        flog_debug!(
            "Config loaded: display_zone={:?}, id_scheme={:?}, default_graph={:?}",
            config.display_zone,
            config.id_scheme,
            config.default_graph
        );
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                flog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        flog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
