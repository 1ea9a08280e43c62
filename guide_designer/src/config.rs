use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::helper_functions::project_root;
use crate::models::{DesignParameters, PrimerParameters};

pub const CONFIG_FILE_NAME: &str = "guide_designer.json";

/// Defaults for every request type, stored as JSON next to the project.
///
/// Any missing section or field falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    pub design: DesignParameters,
    pub primers: PrimerParameters,
}

impl DesignerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading configuration from {}", path.display());
        let text = fs::read_to_string(path)?;
        let config: DesignerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config at `path` if given, otherwise the project default if it exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration written to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.design.validate()?;
        self.primers.validate()?;
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    project_root().join(CONFIG_FILE_NAME)
}
