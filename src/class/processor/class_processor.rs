use std::path::{Path, PathBuf};

use anyhow::{Result, Context};
use log::{info, debug};

use crate::class::types::{GenerateOptions, GenerationReport, SourceLine};
use crate::class::scanner::{AnnotationStripper, ClassScanner};
use crate::emitter::{ArtifactWriter, WrapperEmitter, WrapperTemplate};
use crate::schema::SchemaLoader;

use super::{GenerationStats, PropertyExpander};

/// Runs the generation passes over one schema
///
/// Stripping, expansion and the class scan all run on the same stripped lines;
/// the scan never sees the expanded output.
#[derive(Debug)]
pub struct CodegenPipeline {
    /// Configuration options for the run
    options: GenerateOptions,

    /// Directory receiving the combined source and the wrappers
    output_dir: PathBuf,

    /// Removes annotation lines
    stripper: AnnotationStripper,

    /// Rewrites shorthand properties
    expander: PropertyExpander,

    /// Renders and writes one wrapper per class
    emitter: WrapperEmitter,
}

impl CodegenPipeline {
    /// Create a pipeline with the given options and output directory
    pub fn new(options: GenerateOptions, output_dir: impl AsRef<Path>) -> Result<Self> {
        let template = match &options.wrapper_template {
            Some(path) => WrapperTemplate::from_file(path)
                .with_context(|| format!("Failed to load wrapper template {}", path.display()))?,
            None => WrapperTemplate::builtin(),
        };

        Self::with_template(options, output_dir, template)
    }

    /// Create a pipeline with an explicit wrapper template
    pub fn with_template(
        options: GenerateOptions,
        output_dir: impl AsRef<Path>,
        template: WrapperTemplate,
    ) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();

        Ok(Self {
            stripper: AnnotationStripper::new(&options.annotation_markers)?,
            expander: PropertyExpander::new(options.property_layout),
            emitter: WrapperEmitter::new(
                template,
                options.namespace.clone(),
                options.wrapper_extension.clone(),
                &output_dir,
            ),
            options,
            output_dir,
        })
    }

    /// Create a pipeline with default options
    pub fn with_defaults(output_dir: impl AsRef<Path>) -> Result<Self> {
        Self::new(GenerateOptions::default(), output_dir)
    }

    /// Path of the combined, expanded source file
    pub fn combined_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.options.output_file_name)
    }

    /// Load a schema and run every pass over the generated source
    pub fn run(
        &self,
        loader: &dyn SchemaLoader,
        schema_path: impl AsRef<Path>,
        writer: &dyn ArtifactWriter,
    ) -> Result<GenerationReport> {
        let schema_path = schema_path.as_ref();
        let source = loader
            .load(schema_path)
            .with_context(|| format!("Failed to load schema {}", schema_path.display()))?;

        self.process_source(&source, writer)
    }

    /// Run every pass over already generated source
    pub fn process_source(&self, source: &str, writer: &dyn ArtifactWriter) -> Result<GenerationReport> {
        let mut stats = GenerationStats::new();
        stats.input_lines = source.split('\n').count();

        let stripped = self.stripper.strip(source);
        stats.stripped_annotations = stripped.removed;

        let lines = SourceLine::split(&stripped.text);

        // Expansion pass, written as one combined file
        let rewritten = self.expander.rewrite_lines(&lines);
        stats.expanded_properties = rewritten.expanded;

        let combined_path = self.combined_output_path();
        writer
            .write(&combined_path, &rewritten.text)
            .with_context(|| format!("Failed to write combined source {}", combined_path.display()))?;
        let mut written_files = vec![combined_path];

        // Scan pass over the unexpanded lines, one wrapper per closed class
        let outcome = ClassScanner::new().scan(&lines, |class| {
            let path = self.emitter.emit(class, writer)?;
            written_files.push(path);
            Ok(())
        })?;

        stats.classes_found = outcome.classes.len();
        stats.properties_found = outcome.classes.iter().map(|c| c.properties.len()).sum();
        stats.wrappers_written = written_files.len() - 1;
        stats.diagnostics = outcome.diagnostics.len();

        info!(
            "Generated {} wrappers ({} properties expanded, {} annotations stripped, {} diagnostics)",
            stats.wrappers_written,
            stats.expanded_properties,
            stats.stripped_annotations,
            stats.diagnostics
        );
        debug!("Average properties per class: {:.1}", stats.avg_properties_per_class());

        Ok(GenerationReport {
            classes: outcome.classes,
            diagnostics: outcome.diagnostics,
            written_files,
            stats,
        })
    }

    /// Options this pipeline was built with
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }
}
