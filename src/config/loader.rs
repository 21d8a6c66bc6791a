use super::{get_global_config_dir, AuditConfig, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration together with the file it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AuditConfig,
    pub source: Option<PathBuf>,
}

pub struct ConfigLoader {
    project_dir: PathBuf,
    global_dir: Option<PathBuf>,
    use_env: bool,
}

impl ConfigLoader {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            global_dir: get_global_config_dir().ok(),
            use_env: true,
        }
    }

    /// Override the global config directory (`None` disables it)
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Skip `VIP_AUDIT_*` environment overrides
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Candidate config files in lookup order
    fn candidates(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.project_dir.join(CONFIG_FILE_NAME)];
        if let Some(global) = &self.global_dir {
            paths.push(global.join("config.toml"));
        }
        paths
    }

    /// Load configuration, preferring an explicit path when given
    ///
    /// An explicit path must exist; discovered files are optional.
    pub async fn load(&self, explicit: Option<&Path>) -> Result<LoadedConfig> {
        let source = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "config file '{}' does not exist",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => self.candidates().into_iter().find(|p| p.is_file()),
        };

        let mut config = match &source {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                let content = fs::read_to_string(path).await?;
                AuditConfig::from_toml(&content).map_err(|e| {
                    Error::Config(format!("{}: {e}", path.display()))
                })?
            }
            None => {
                debug!("No configuration file found, using defaults");
                AuditConfig::default()
            }
        };

        if self.use_env {
            config.merge_env_vars();
        }
        config.validate()?;

        Ok(LoadedConfig { config, source })
    }
}
