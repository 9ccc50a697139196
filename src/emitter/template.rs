use std::path::Path;
use anyhow::Result;
use log::{debug, warn};

use crate::class::types::ClassDefinition;
use crate::utils::file_utils;

/// Built-in wrapper exposing a class as a single-value `Observable.Defer` source
const BUILTIN_TEMPLATE: &str = include_str!("../../templates/wrapper.cs.tmpl");

const NAMESPACE_PLACEHOLDER: &str = "{{namespace}}";
const CLASS_NAME_PLACEHOLDER: &str = "{{class_name}}";
const PROPERTIES_PLACEHOLDER: &str = "{{properties}}";

/// Indent of one property assignment inside the object initializer
const PROPERTY_INDENT: &str = "\t\t\t\t\t";

/// Parameterized wrapper template
///
/// Placeholders: `{{namespace}}`, `{{class_name}}` and `{{properties}}`. The
/// properties placeholder expands to one `Name = Name,` line per property, each
/// ending in a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperTemplate {
    source: String,
}

impl Default for WrapperTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WrapperTemplate {
    /// The template shipped with the crate
    pub fn builtin() -> Self {
        Self::from_string(BUILTIN_TEMPLATE)
    }

    /// Create a template from text
    pub fn from_string(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    /// Load a template from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading wrapper template from {}", path.display());

        let template = Self::from_string(file_utils::read_file_to_string(path)?);
        for placeholder in template.missing_placeholders() {
            warn!("Wrapper template {} has no {} placeholder", path.display(), placeholder);
        }
        Ok(template)
    }

    /// Raw template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholders that do not occur in the template
    pub fn missing_placeholders(&self) -> Vec<&'static str> {
        [NAMESPACE_PLACEHOLDER, CLASS_NAME_PLACEHOLDER, PROPERTIES_PLACEHOLDER]
            .into_iter()
            .filter(|placeholder| !self.source.contains(placeholder))
            .collect()
    }

    /// Render the template for one class
    pub fn render(&self, namespace: &str, class: &ClassDefinition) -> String {
        let properties: String = class
            .properties
            .iter()
            .map(|name| format!("{PROPERTY_INDENT}{name} = {name},\n"))
            .collect();

        self.source
            .replace(NAMESPACE_PLACEHOLDER, namespace)
            .replace(CLASS_NAME_PLACEHOLDER, &class.name)
            .replace(PROPERTIES_PLACEHOLDER, &properties)
    }
}
