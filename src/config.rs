use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::class::types::{GenerateOptions, PropertyLayout, DEFAULT_ANNOTATION_MARKERS, DEFAULT_NAMESPACE};
use crate::utils::file_utils;

/// Generator settings read from a TOML or YAML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Namespace of the generated classes and wrappers
    pub namespace: String,

    /// Marker tokens of annotation lines to strip
    pub annotation_markers: Vec<String>,

    /// File extension of the wrapper artifacts
    pub wrapper_extension: String,

    /// Layout of expanded properties
    pub property_layout: PropertyLayout,

    /// Template file replacing the built-in wrapper template
    pub wrapper_template: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            annotation_markers: DEFAULT_ANNOTATION_MARKERS.iter().map(|m| m.to_string()).collect(),
            wrapper_extension: "cs".to_string(),
            property_layout: PropertyLayout::default(),
            wrapper_template: None,
        }
    }
}

impl GeneratorConfig {
    /// Load settings from a file; `.yaml`/`.yml` is YAML, anything else TOML
    ///
    /// A relative `wrapper_template` is resolved against the config file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = file_utils::read_file_to_string(path)?;
        let mut config = if file_utils::has_any_extension(path, &["yaml", "yml"]) {
            Self::from_yaml(&content)
        } else {
            Self::from_toml(&content)
        }
        .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

        config.wrapper_template = config.wrapper_template.map(|template| match path.parent() {
            Some(base) if template.is_relative() => base.join(template),
            _ => template,
        });

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Convert into pipeline options
    pub fn into_options(self, output_file_name: impl Into<String>) -> GenerateOptions {
        GenerateOptions {
            namespace: self.namespace,
            annotation_markers: self.annotation_markers,
            wrapper_extension: self.wrapper_extension,
            property_layout: self.property_layout,
            wrapper_template: self.wrapper_template,
            output_file_name: output_file_name.into(),
        }
    }
}
