use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/cubicworld.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Minecraft directory to use instead of the per-OS default.
    pub minecraft_dir: Option<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            minecraft_dir: None,
        }
    }
}

impl ToolConfig {
    /// Load configuration from `path`, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ToolConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ToolConfig::default()
                }
            },
            Err(err) => {
                if path == Path::new(DEFAULT_CONFIG_PATH)
                    && err.kind() == std::io::ErrorKind::NotFound
                {
                    debug!("No config at {}. Using defaults", path.display());
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                ToolConfig::default()
            }
        }
    }
}
