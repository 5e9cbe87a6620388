use crate::{codec::load_textbooks, contentbase::ContentBase, error::ContentError};
use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

/// Site-wide settings read from a TOML file.
///
/// ```toml
/// content = "content/textbooks.toml"
/// strict = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Dataset to load. `None` selects the bundled content.
    pub content: Option<PathBuf>,
    /// Refuse datasets that fail validation. When false, invalid datasets are indexed anyway
    /// and the problems are only logged.
    pub strict: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            content: None,
            strict: true,
        }
    }
}

impl SiteConfig {
    /// Resolve `content` against `base`, the directory holding the config file.
    pub fn content_path(&self, base: &Path) -> Option<PathBuf> {
        self.content.as_ref().map(|path| {
            if path.is_relative() {
                base.join(path)
            } else {
                path.clone()
            }
        })
    }

    /// Load the configured dataset, or the bundled one when none is configured.
    pub fn load_content(&self, base: &Path) -> Result<ContentBase, ContentError> {
        let Some(path) = self.content_path(base) else {
            return ContentBase::bundled().cloned();
        };
        let textbooks = load_textbooks(&path)?;
        if self.strict {
            return ContentBase::new(textbooks);
        }
        let content = ContentBase::new_unchecked(textbooks);
        for error in content.built_in_test() {
            tracing::warn!("{error}");
        }
        Ok(content)
    }
}

pub trait SiteConfigProvider: Send + Sync {
    fn get_config(&self) -> Result<SiteConfig, ContentError>;
    fn set_config(&self, config: &SiteConfig) -> Result<(), ContentError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory relative content paths are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

impl SiteConfigProvider for TomlConfigProvider {
    fn get_config(&self) -> Result<SiteConfig, ContentError> {
        tracing::debug!("Attempting to read site config from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Config file not found, using defaults.");
            return Ok(SiteConfig::default());
        }
        let content = read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn set_config(&self, config: &SiteConfig) -> Result<(), ContentError> {
        tracing::debug!("Attempting to write site config to: {:?}", &self.path);
        let toml_string = toml::to_string(config)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}
