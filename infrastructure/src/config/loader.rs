//! Configuration file loader with multi-source merging

use super::file_config::ConclaveConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::PathBuf;

const PROJECT_CONFIG_FILES: [&str; 2] = ["conclave.toml", ".conclave.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./conclave.toml` or `./.conclave.toml`
    /// 3. Default values (built-in providers and flows)
    pub fn load(config_path: Option<&PathBuf>) -> Result<ConclaveConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(ConclaveConfig::default()));

        for filename in &PROJECT_CONFIG_FILES {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only the built-in defaults (for `--no-config`)
    pub fn load_defaults() -> ConclaveConfig {
        ConclaveConfig::default()
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}
