mod class_processor;
mod property_processor;
mod stats;

// Re-export from submodules
pub use class_processor::CodegenPipeline;
pub use property_processor::{PropertyExpander, RewrittenSource};
pub use stats::GenerationStats;
