//! specutil CLI entrypoint
//! Parses command-line arguments and dispatches to the core helpers.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::{bail, Context};
use clap::Parser;
use serde_json::Value as JsonValue;
use specutil_core::{clean_parameters, emit, emitters, yaml_load, Config};
use tokio::fs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "specutil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dotted path of the emitter (e.g. specutil.emit.Json)
    #[arg(long, global = true)]
    emitter: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Clean a parameter list (or a mapping with a `parameters` list)
    Clean {
        /// YAML or JSON file holding the parameters
        file: PathBuf,
        /// Method tag to keep parameters for (default: from config, else "all")
        #[arg(long)]
        method: Option<String>,
    },
    /// Re-emit a YAML or JSON document, keeping its key order
    Fmt {
        /// YAML or JSON file to format
        file: PathBuf,
        /// Sort mapping keys
        #[arg(long)]
        sort_keys: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(emitter) = &cli.emitter {
        config.emitter = emitter.clone();
    }
    if let Some(output) = &cli.output {
        config.output = Some(output.to_string_lossy().to_string());
    }

    let document = match &cli.command {
        Commands::Clean { file, method } => {
            if let Some(method) = method {
                config.method = method.clone();
            }
            let input = read_document(file).await?;
            tracing::debug!("cleaning parameters of {} for {}", file.display(), config.method);
            clean_document(input, &config)?
        }
        Commands::Fmt { file, sort_keys } => {
            config.sort_keys |= *sort_keys;
            read_document(file).await?
        }
    };

    write_document(&document, &config).await
}

async fn read_document(path: &Path) -> anyhow::Result<JsonValue> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    match yaml_load(&content) {
        Some(value) => Ok(value),
        None => bail!("{} is not valid YAML", path.display()),
    }
}

fn clean_document(document: JsonValue, config: &Config) -> anyhow::Result<JsonValue> {
    let clean = |params: &[JsonValue]| -> anyhow::Result<Vec<JsonValue>> {
        if config.skips(&config.method) {
            tracing::info!("method {} is skipped by configuration", config.method);
            return Ok(Vec::new());
        }
        clean_parameters(params, &config.method).context("Failed to clean parameters")
    };

    match document {
        JsonValue::Array(params) => Ok(JsonValue::Array(clean(&params)?)),
        JsonValue::Object(mut map) => {
            let params = match map.get("parameters") {
                Some(JsonValue::Array(params)) => clean(params)?,
                _ => bail!("expected a list of parameters or a mapping with a `parameters` list"),
            };
            map.insert("parameters".to_string(), JsonValue::Array(params));
            Ok(JsonValue::Object(map))
        }
        _ => bail!("expected a list of parameters or a mapping with a `parameters` list"),
    }
}

async fn write_document(document: &JsonValue, config: &Config) -> anyhow::Result<()> {
    let registry = emitters()?;
    let emitter = registry
        .load_class(&config.emitter)
        .with_context(|| format!("Unknown emitter '{}'", config.emitter))?;

    let rendered = if config.sort_keys {
        emitter.emit(&emit::sort_keys(document))?
    } else {
        emitter.emit(document)?
    };

    match &config.output {
        Some(path) => {
            fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write {}", path))?;
            tracing::info!("wrote {}", path);
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
