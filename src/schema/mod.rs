pub mod csharp;

use std::path::Path;
use anyhow::{Result, Context};
use log::{debug, info};
use serde_json::Value;

use crate::utils::file_utils;
use crate::utils::naming::to_pascal_case;

pub use csharp::CSharpClassGenerator;

/// Root class name used when neither a title nor a file stem is available
const FALLBACK_ROOT_NAME: &str = "Anonymous";

/// Produces generated class source for a schema file
pub trait SchemaLoader {
    /// Load the schema at `schema_path` and return generated source text
    fn load(&self, schema_path: &Path) -> Result<String>;
}

/// Generates C# classes from a JSON Schema document
#[derive(Debug, Clone)]
pub struct JsonSchemaLoader {
    /// Namespace wrapping the generated classes
    namespace: String,
}

impl JsonSchemaLoader {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into() }
    }

    /// Name of the root class: the schema title, else the file stem
    pub fn root_class_name(schema: &Value, schema_path: &Path) -> String {
        let title = schema.get("title").and_then(Value::as_str);
        let name = title
            .map(to_pascal_case)
            .filter(|name| !name.is_empty())
            .or_else(|| file_utils::file_stem(schema_path).map(|stem| to_pascal_case(&stem)))
            .filter(|name| !name.is_empty());

        name.unwrap_or_else(|| FALLBACK_ROOT_NAME.to_string())
    }

    /// Generate source from an already parsed schema
    pub fn generate(&self, schema: &Value, root_name: &str) -> Result<String> {
        CSharpClassGenerator::new(schema, self.namespace.clone()).generate(root_name)
    }
}

impl SchemaLoader for JsonSchemaLoader {
    fn load(&self, schema_path: &Path) -> Result<String> {
        info!("Loading JSON schema from {}", schema_path.display());

        let content = file_utils::read_file_to_string(schema_path)?;
        let schema: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse schema file {}", schema_path.display()))?;

        let root_name = Self::root_class_name(&schema, schema_path);
        debug!("Root class name: {}", root_name);

        self.generate(&schema, &root_name)
            .with_context(|| format!("Failed to generate classes from {}", schema_path.display()))
    }
}

/// Reads source an external generator already produced, unchanged
#[derive(Debug, Default, Clone)]
pub struct PregeneratedSourceLoader {}

impl PregeneratedSourceLoader {
    pub fn new() -> Self {
        Self {}
    }
}

impl SchemaLoader for PregeneratedSourceLoader {
    fn load(&self, schema_path: &Path) -> Result<String> {
        info!("Reading pre-generated source from {}", schema_path.display());
        file_utils::read_file_to_string(schema_path)
    }
}

/// Pick a loader by file extension: `.cs` is pre-generated source, anything
/// else is treated as JSON Schema
pub fn loader_for_path(schema_path: &Path, namespace: &str) -> Box<dyn SchemaLoader> {
    if file_utils::has_extension(schema_path, "cs") {
        Box::new(PregeneratedSourceLoader::new())
    } else {
        Box::new(JsonSchemaLoader::new(namespace))
    }
}
