//! The `build` command: run one batch end to end.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use config_manager::{load_layer, ConfigLayer, LayerLevel};
use feed_model::ColumnSchema;
use llm_client::{DisabledFieldCompleter, FieldCompleter, HttpFieldCompleter};
use titlefeed_core::{standard_registry, standard_schema, BatchProcessor, BatchRequest, BatchSummary, BookEntry};
use tracing::{info, warn};
use validation::CodeSet;

use crate::config::AppConfig;
use crate::errors::Error;

/// File names looked up inside the layers directory, least to most
/// specific. Missing levels are simply skipped.
const LAYER_FILES: &[(&str, LayerLevel)] = &[
    ("default.json", LayerLevel::Default),
    ("publisher.json", LayerLevel::Publisher),
    ("imprint.json", LayerLevel::Imprint),
    ("tranche.json", LayerLevel::Tranche),
];

#[cfg(test)]
#[path = "build_cmd_tests.rs"]
mod tests;

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// CLI configuration file (TOML); defaults to ./titlefeed.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Books manifest (JSON array of book entries)
    #[arg(long)]
    pub books: PathBuf,

    /// Directory holding the layered configuration documents
    #[arg(long)]
    pub layers: PathBuf,

    /// Distributor template file; its first line is the column header.
    /// Without it the built-in column schema is used.
    #[arg(long)]
    pub schema: Option<PathBuf>,

    /// BISAC code list (one code per line)
    #[arg(long)]
    pub bisac: PathBuf,

    /// Thema code list (one code per line)
    #[arg(long)]
    pub thema: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "feed.csv")]
    pub output: PathBuf,

    /// Completion report path
    #[arg(long, default_value = "completion_report.txt")]
    pub report: PathBuf,
}

/// Run one batch and write the feed plus the completion report.
///
/// Returns the batch summary so the caller can pick an exit code.
pub async fn execute(args: &BuildArgs) -> Result<BatchSummary, Error> {
    let app_config = AppConfig::load_or_default(args.config.as_deref())?;

    let layers = load_layers(&args.layers)?;
    let books = load_books(&args.books)?;
    let schema = load_schema(args.schema.as_deref())?;
    let bisac = Arc::new(CodeSet::load("BISAC", &args.bisac)?);
    let thema = Arc::new(CodeSet::load("Thema", &args.thema)?);
    let completer = build_completer(&app_config)?;

    let processor = BatchProcessor::new(schema, standard_registry(completer), bisac, thema);
    let request = BatchRequest::new(books, layers);

    let output = processor.process(&request).await?;

    write_output(&args.output, &output.csv)?;
    write_output(&args.report, &output.report)?;

    info!(
        feed = %args.output.display(),
        report = %args.report.display(),
        "Feed written"
    );
    println!("Batch summary: {}", output.summary);

    Ok(output.summary)
}

fn load_layers(dir: &Path) -> Result<Vec<ConfigLayer>, Error> {
    let mut layers = Vec::new();
    for (file_name, level) in LAYER_FILES {
        let path = dir.join(file_name);
        if path.exists() {
            layers.push(load_layer(&path, *level)?);
        }
    }

    if layers.is_empty() {
        warn!(dir = %dir.display(), "No configuration layers found");
    }

    Ok(layers)
}

fn load_books(path: &Path) -> Result<Vec<BookEntry>, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::LoadFile {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| Error::ParseJsonFile {
        path: path.display().to_string(),
        source,
    })
}

fn load_schema(path: Option<&Path>) -> Result<ColumnSchema, Error> {
    let Some(path) = path else {
        return Ok(standard_schema());
    };

    let text = fs::read_to_string(path).map_err(|source| Error::LoadFile {
        path: path.display().to_string(),
        source,
    })?;

    let header = text.lines().next().unwrap_or("");
    Ok(ColumnSchema::from_header_line(header)?)
}

fn build_completer(config: &AppConfig) -> Result<Arc<dyn FieldCompleter>, Error> {
    match &config.completion {
        Some(completion) => {
            let completer = HttpFieldCompleter::new(
                completion.endpoint.as_str(),
                completion.model.as_str(),
                completion.api_key().as_deref(),
                completion.timeout(),
            )?;
            info!(endpoint = %completion.endpoint, "Completion enabled");
            Ok(Arc::new(completer))
        }
        None => Ok(Arc::new(DisabledFieldCompleter)),
    }
}

fn write_output(path: &Path, contents: &str) -> Result<(), Error> {
    fs::write(path, contents).map_err(|source| Error::WriteOutput {
        path: path.display().to_string(),
        source,
    })
}
