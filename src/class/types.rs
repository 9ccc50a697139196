use std::path::PathBuf;
use serde::{Serialize, Deserialize};

use crate::class::processor::GenerationStats;

/// Default marker tokens of annotation lines removed before any other pass
pub const DEFAULT_ANNOTATION_MARKERS: &[&str] = &["Newtonsoft", "System"];

/// Default namespace of the generated classes and wrappers
pub const DEFAULT_NAMESPACE: &str = "AutomaticGenerators";

/// Default name of the combined, expanded source file
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "GeneratedClasses.cs";

/// A single line of generated source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based position of the line in the stripped text
    pub number: usize,

    /// Line content without the `\n` terminator
    pub text: String,
}

impl SourceLine {
    /// Split text on `\n` into numbered lines
    ///
    /// A trailing `\r` stays part of the line; classifiers trim it away.
    pub fn split(text: &str) -> Vec<SourceLine> {
        text.split('\n')
            .enumerate()
            .map(|(idx, line)| SourceLine {
                number: idx + 1,
                text: line.to_string(),
            })
            .collect()
    }

    /// Join lines back into a single text, inverse of [`SourceLine::split`]
    pub fn join(lines: &[String]) -> String {
        lines.join("\n")
    }
}

/// Decomposed single-line property with an inline default value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyShorthand {
    /// Access modifier, e.g. `public`
    pub access_modifier: String,

    /// Declared type name
    pub type_name: String,

    /// Property name as written in the source
    pub name: String,

    /// Default value expression without the trailing `;`
    pub default_value: String,

    /// Leading whitespace with every 4-space run collapsed to a tab
    pub indent: String,
}

/// Explicit backing field plus accessor property produced from a shorthand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedProperty {
    /// Indent prefixed to every emitted line
    pub indent: String,

    /// Access modifier of the public property
    pub access_modifier: String,

    /// Type shared by the field and the property
    pub type_name: String,

    /// Upper-camel property name
    pub public_name: String,

    /// Lower-camel backing field name
    pub backing_field: String,

    /// Initializer of the backing field
    pub default_value: String,
}

/// A class found by the block scanner together with its ordered property names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Name of the class
    pub name: String,

    /// Property names in declaration order
    pub properties: Vec<String>,

    /// Line of the class header
    pub line: usize,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            line,
        }
    }
}

/// Kind of a non-fatal finding reported by the block scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A `public` line inside a class that is neither a field nor a property
    UnrecognizedMember,

    /// A class header found while another class is still open
    NestedClass,

    /// More closing than opening braces inside a class
    NegativeBraceDepth,

    /// Input ended while a class was still open
    UnterminatedClass,
}

/// Non-fatal finding about a line the scanner rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Line the finding refers to
    pub line: usize,

    /// What was found
    pub kind: DiagnosticKind,

    /// Human readable description
    pub message: String,
}

/// Layout of an expanded property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyLayout {
    /// Backing field line plus a single property line with inline accessors
    #[default]
    Inline,

    /// Backing field line plus a multi-line accessor block
    Block,
}

/// Configuration options for a generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Namespace written into every wrapper
    pub namespace: String,

    /// Marker tokens of annotation lines to strip
    pub annotation_markers: Vec<String>,

    /// File extension of the wrapper artifacts
    pub wrapper_extension: String,

    /// Layout of expanded properties
    pub property_layout: PropertyLayout,

    /// Template file replacing the built-in wrapper template
    pub wrapper_template: Option<PathBuf>,

    /// File name of the combined expanded source
    pub output_file_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            annotation_markers: DEFAULT_ANNOTATION_MARKERS.iter().map(|m| m.to_string()).collect(),
            wrapper_extension: "cs".to_string(),
            property_layout: PropertyLayout::default(),
            wrapper_template: None,
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
        }
    }
}

/// Result of a generation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Classes found by the block scanner, in order
    pub classes: Vec<ClassDefinition>,

    /// Findings about rejected lines
    pub diagnostics: Vec<Diagnostic>,

    /// Every artifact handed to the writer, combined source first
    pub written_files: Vec<PathBuf>,

    /// Counters collected during the run
    pub stats: GenerationStats,
}
