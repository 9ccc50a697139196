use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::class::types::{GenerateOptions, PropertyLayout, SourceLine};
use crate::class::{ClassScanner, CodegenPipeline};
use crate::emitter::MemoryWriter;
use crate::schema::{JsonSchemaLoader, SchemaLoader};

// Helper function to write a schema file into a directory
fn create_schema_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(name);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

const RIG_SCHEMA: &str = r##"{
    "title": "RigSettings",
    "type": "object",
    "required": ["name"],
    "properties": {
        "name": { "type": "string", "default": "rig" },
        "frameRate": { "type": "integer", "default": 60 },
        "camera": {
            "type": "object",
            "properties": {
                "exposure": { "type": "number", "default": 2.5 },
                "serial": { "type": "string" }
            }
        },
        "ports": { "type": "array", "items": { "type": "integer" } },
        "arena": { "$ref": "#/definitions/Arena" }
    },
    "definitions": {
        "Arena": {
            "type": "object",
            "properties": {
                "radius": { "type": "number", "default": 0.3 }
            }
        }
    }
}"##;

#[test]
fn test_schema_to_wrappers() -> Result<()> {
    let test_dir = tempdir()?;
    let schema_path = create_schema_file(test_dir.path(), "rig.json", RIG_SCHEMA)?;
    let output_dir = test_dir.path().join("output");

    let pipeline = CodegenPipeline::with_defaults(&output_dir)?;
    let writer = MemoryWriter::new();
    let report = pipeline.run(&JsonSchemaLoader::new("AutomaticGenerators"), &schema_path, &writer)?;

    // Root, nested inline object, then definitions
    let names: Vec<&str> = report.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["RigSettings", "Camera", "Arena"]);
    assert_eq!(
        report.classes[0].properties,
        vec!["Name", "FrameRate", "Camera", "Ports", "Arena"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    assert!(report.diagnostics.is_empty());
    assert_eq!(writer.len(), 4);

    let combined = writer.get(output_dir.join("GeneratedClasses.cs")).unwrap();
    assert!(!combined.contains("[Newtonsoft"));
    assert!(!combined.contains("[System.CodeDom"));
    assert!(combined.contains("\t\tprivate string name = \"rig\";"));
    assert!(combined.contains("\t\tprivate int frameRate = 60;"));
    assert!(combined.contains("\t\tpublic Camera Camera { get { return camera; } set { camera = value; } }"));
    assert!(combined.contains("\t\tprivate System.Collections.Generic.IList<int> ports = new System.Collections.ObjectModel.Collection<int>();"));
    assert!(combined.contains("        public string Serial { get; set; }"));

    let wrapper = writer.get(output_dir.join("Camera.cs")).unwrap();
    assert!(wrapper.contains("public IObservable<Camera> Process()"));
    assert!(wrapper.contains("Exposure = Exposure,"));
    assert!(wrapper.contains("Serial = Serial,"));
    Ok(())
}

#[test]
fn test_block_layout_combined_output() -> Result<()> {
    let test_dir = tempdir()?;
    let schema_path = create_schema_file(
        test_dir.path(),
        "widget.json",
        r#"{ "properties": { "count": { "type": "integer", "default": 1 } } }"#,
    )?;

    let options = GenerateOptions {
        property_layout: PropertyLayout::Block,
        ..Default::default()
    };
    let pipeline = CodegenPipeline::new(options, "out")?;
    let writer = MemoryWriter::new();
    let report = pipeline.run(&JsonSchemaLoader::new("Gen"), &schema_path, &writer)?;

    assert_eq!(report.classes[0].name, "Widget");
    let combined = writer.get(pipeline.combined_output_path()).unwrap();
    assert!(combined.contains("\t\tpublic int Count\n\t\t{\n\t\t\tget { return count; }\n\t\t\tset { count = value; }\n\t\t}"));
    Ok(())
}

#[test]
fn test_generated_source_scans_like_its_schema() -> Result<()> {
    let test_dir = tempdir()?;
    let schema_path = create_schema_file(test_dir.path(), "rig.json", RIG_SCHEMA)?;

    let source = JsonSchemaLoader::new("Gen").load(&schema_path)?;
    let outcome = ClassScanner::collect(&SourceLine::split(&source))?;

    // The namespace braces sit outside every class
    assert_eq!(outcome.classes.len(), 3);
    assert_eq!(outcome.classes[2].properties, vec!["Radius".to_string()]);
    Ok(())
}

#[test]
fn test_non_ascii_property_names_reach_the_wrapper() -> Result<()> {
    let test_dir = tempdir()?;
    let schema_path = create_schema_file(
        test_dir.path(),
        "box.json",
        r#"{ "title": "Box", "properties": { "größe": { "type": "integer", "default": 3 } } }"#,
    )?;

    let pipeline = CodegenPipeline::with_defaults("out")?;
    let writer = MemoryWriter::new();
    let report = pipeline.run(&JsonSchemaLoader::new("Gen"), &schema_path, &writer)?;

    assert!(report.diagnostics.is_empty());
    assert_eq!(report.classes[0].properties, vec!["GrE".to_string()]);
    assert_eq!(report.stats.expanded_properties, 1);
    let wrapper = writer.get(PathBuf::from("out").join("Box.cs")).unwrap();
    assert!(wrapper.contains("\t\t\t\t\tGrE = GrE,\n"));
    Ok(())
}

#[test]
fn test_colliding_nested_classes_each_get_a_wrapper() -> Result<()> {
    let test_dir = tempdir()?;
    let schema_path = create_schema_file(
        test_dir.path(),
        "pair.json",
        r#"{
            "title": "Pair",
            "properties": {
                "left": { "type": "object", "properties": { "config": { "type": "object", "properties": { "a": { "type": "string", "default": "x" } } } } },
                "right": { "type": "object", "properties": { "config": { "type": "object", "properties": { "b": { "type": "integer", "default": 1 } } } } }
            }
        }"#,
    )?;

    let pipeline = CodegenPipeline::with_defaults("out")?;
    let writer = MemoryWriter::new();
    let report = pipeline.run(&JsonSchemaLoader::new("Gen"), &schema_path, &writer)?;

    let names: Vec<&str> = report.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Pair", "Left", "Config", "Right", "Config2"]);
    let wrapper = writer.get(PathBuf::from("out").join("Config2.cs")).unwrap();
    assert!(wrapper.contains("B = B,"));
    Ok(())
}
