//! Configuration file and logging setup shared by tools built on the engine.
//!
//! A missing config file is not an error: callers fall back to
//! [`Config::default`], which enables every bundled extension.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use log::LevelFilter;
use markdown_canon_engine::{
    ExtensionRegistry, MarkdownExtension, MarkdownProcessor, ProcessError, TaskListItemsExtension,
};
use markdown_canon_gfm_alerts::GitHubAlertExtension;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown log level '{level}'")]
    UnknownLevel { level: String },

    #[error("Failed to set up markdown processor: {0}")]
    Processor(#[from] ProcessError),
}

/// Which bundled extensions are registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    pub task_lists: bool,
    pub gfm_alerts: bool,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            task_lists: true,
            gfm_alerts: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extensions: ExtensionsConfig,
    /// Fence name to language name, e.g. `gradle = "kotlin"`.
    pub languages: BTreeMap<String, String>,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::ConfigReadError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Enabled extensions in registration order: task lists, then alerts.
    fn extensions(&self) -> Vec<Arc<dyn MarkdownExtension>> {
        let mut extensions: Vec<Arc<dyn MarkdownExtension>> = Vec::new();
        if self.extensions.task_lists {
            extensions.push(Arc::new(TaskListItemsExtension));
        }
        if self.extensions.gfm_alerts {
            extensions.push(Arc::new(GitHubAlertExtension));
        }
        extensions
    }

    pub fn registry(&self) -> Result<ExtensionRegistry, ConfigError> {
        Ok(ExtensionRegistry::new(self.extensions())?)
    }

    pub fn processor(&self) -> Result<MarkdownProcessor, ConfigError> {
        let mut builder = MarkdownProcessor::builder();
        for extension in self.extensions() {
            builder = builder.shared_extension(extension);
        }
        for (name, language) in &self.languages {
            builder = builder.language_alias(name, language);
        }
        Ok(builder.build()?)
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.logging.level.trim()).map_err(|_| ConfigError::UnknownLevel {
            level: self.logging.level.clone(),
        })
    }

    /// Installs `env_logger` at the configured level. `RUST_LOG` directives
    /// still apply; a logger that is already installed is left alone.
    pub fn init_logging(&self) -> Result<(), ConfigError> {
        let level = self.log_level()?;
        if env_logger::Builder::from_default_env()
            .filter_level(level)
            .try_init()
            .is_err()
        {
            log::debug!("Logger already initialized, keeping it");
        }
        Ok(())
    }
}
