pub mod types;
pub mod scanner;
pub mod processor;

// Re-export the main API for easier access
pub use types::{ClassDefinition, GenerateOptions, GenerationReport};
pub use scanner::ClassScanner;
pub use processor::CodegenPipeline;
