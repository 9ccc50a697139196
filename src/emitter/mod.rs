pub mod template;
pub mod writer;

use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::debug;

use crate::class::types::ClassDefinition;

// Re-export main types for easier access
pub use template::WrapperTemplate;
pub use writer::{ArtifactWriter, FileSystemWriter, MemoryWriter};

/// Renders one wrapper artifact per class and hands it to a writer
#[derive(Debug, Clone)]
pub struct WrapperEmitter {
    /// Template rendered for every class
    template: WrapperTemplate,

    /// Namespace substituted into the template
    namespace: String,

    /// File extension of the artifacts
    extension: String,

    /// Directory the artifacts are written to
    output_dir: PathBuf,
}

impl WrapperEmitter {
    /// Create a new emitter writing `<output_dir>/<ClassName>.<extension>`
    pub fn new(
        template: WrapperTemplate,
        namespace: impl Into<String>,
        extension: impl Into<String>,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            template,
            namespace: namespace.into(),
            extension: extension.into(),
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the artifact for a class
    pub fn artifact_path(&self, class: &ClassDefinition) -> PathBuf {
        self.output_dir.join(format!("{}.{}", class.name, self.extension))
    }

    /// Render the wrapper text for a class
    pub fn render(&self, class: &ClassDefinition) -> String {
        self.template.render(&self.namespace, class)
    }

    /// Render and write the wrapper for a class, returning the written path
    pub fn emit(&self, class: &ClassDefinition, writer: &dyn ArtifactWriter) -> Result<PathBuf> {
        let path = self.artifact_path(class);
        debug!("Emitting wrapper for {} to {}", class.name, path.display());

        writer
            .write(&path, &self.render(class))
            .with_context(|| format!("Failed to write wrapper for class {}", class.name))?;
        Ok(path)
    }
}
