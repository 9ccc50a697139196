//! Generates expanded C# classes and Bonsai source wrappers from a schema.

use std::path::PathBuf;

use anyhow::{Result, Context};
use clap::Parser;
use log::{info, LevelFilter};

use schema_codegen::class::types::DEFAULT_OUTPUT_FILE_NAME;
use schema_codegen::{
    file_utils, loader_for_path, ArtifactWriter, CodegenPipeline, FileSystemWriter, GeneratorConfig,
    MemoryWriter,
};

/// Expand generated schema classes and emit one wrapper per class
#[derive(Parser, Debug)]
#[command(name = "schema_codegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON Schema file, or pre-generated `.cs` source
    #[arg(default_value = "schema.json")]
    schema: PathBuf,

    /// Output directory [default: directory of the executable]
    output_dir: Option<PathBuf>,

    /// File name of the combined, expanded source
    #[arg(default_value = DEFAULT_OUTPUT_FILE_NAME)]
    output_file: String,

    /// Generator settings (TOML, or YAML by extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Namespace of the generated code, overrides the config file
    #[arg(long)]
    namespace: Option<String>,

    /// Render everything without writing files
    #[arg(long)]
    dry_run: bool,

    /// log4rs YAML configuration, replaces the console logger
    #[arg(long)]
    log_config: Option<PathBuf>,

    /// Write the generation report as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.log_config {
        log4rs::init_file(path, Default::default())
            .with_context(|| format!("Failed to initialize logging from {}", path.display()))?;
        return Ok(());
    }

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(namespace) = &cli.namespace {
        config.namespace = namespace.clone();
    }

    let output_dir = match &cli.output_dir {
        Some(dir) => dir.clone(),
        None => file_utils::executable_dir()?,
    };
    info!("Output directory: {}", output_dir.display());

    let loader = loader_for_path(&cli.schema, &config.namespace);
    let pipeline = CodegenPipeline::new(config.into_options(cli.output_file.clone()), &output_dir)?;

    let report = if cli.dry_run {
        let writer = MemoryWriter::new();
        let report = pipeline.run(loader.as_ref(), &cli.schema, &writer)?;
        for (path, content) in writer.files() {
            println!("{} ({} bytes)", path.display(), content.len());
        }
        report
    } else {
        pipeline.run(loader.as_ref(), &cli.schema, &FileSystemWriter::new())?
    };

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        FileSystemWriter::new().write(path, &json)?;
        info!("Wrote report to {}", path.display());
    }

    Ok(())
}
