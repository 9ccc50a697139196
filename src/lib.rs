pub mod class;
pub mod config;
pub mod emitter;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main types and functions for easier access
pub use class::types::{
    ClassDefinition, Diagnostic, DiagnosticKind, GenerateOptions, GenerationReport, PropertyLayout,
};
pub use class::scanner::{AnnotationStripper, ClassScanner};
pub use class::processor::{CodegenPipeline, GenerationStats, PropertyExpander};
pub use config::GeneratorConfig;
pub use emitter::{ArtifactWriter, FileSystemWriter, MemoryWriter, WrapperEmitter, WrapperTemplate};
pub use schema::{loader_for_path, JsonSchemaLoader, PregeneratedSourceLoader, SchemaLoader};

// Re-export utility functions
pub use utils::file_utils;
