use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use thrift_openapi::{Config, Generator, PluginRequest, PluginResponse};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "thrift-gen-openapi", version)]
#[command(about = "Generate an OpenAPI v3 document from a Thrift plugin request")]
struct Args {
    /// JSON plugin request to read (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory to write generated files into (defaults to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML file with generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the generated file
    #[arg(long)]
    output_filename: Option<String>,

    /// Namespace language that titles the document
    #[arg(long)]
    namespace_language: Option<String>,

    /// Dump the received request as JSON to this path
    #[arg(long)]
    debug_dump: Option<PathBuf>,
}

fn main() -> Result<()> {
    setup_tracing();

    let args = Args::parse();
    let config = load_config(&args)?;

    let input = read_input(args.input.as_deref())?;
    let request = PluginRequest::from_json(&input).context("Failed to unmarshal request")?;

    if let Some(path) = &config.debug_dump {
        debug_dump(&request, path);
    }

    let response = Generator::new(config).run(&request);
    write_response(&response, args.output_dir.as_deref())
}

/// Logs go to stderr; stdout carries the generated output.
fn setup_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("THRIFT_OPENAPI_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();
}

/// Settings from `--config`, overridden by individual flags.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(name) = &args.output_filename {
        config.output_filename = name.clone();
    }
    if let Some(language) = &args.namespace_language {
        config.namespace_language = language.clone();
    }
    if let Some(path) = &args.debug_dump {
        config.debug_dump = Some(path.clone());
    }

    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to get input from {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to get input")?;
            Ok(input)
        }
    }
}

/// Best effort: a failed dump never stops generation.
fn debug_dump(request: &PluginRequest, path: &Path) {
    let result = request
        .to_json_pretty()
        .map_err(anyhow::Error::from)
        .and_then(|json| Ok(std::fs::write(path, json)?));

    if let Err(err) = result {
        tracing::debug!("Failed to dump request to {}: {err}", path.display());
    }
}

/// A response carrying an error is a failed run: nothing is written.
fn write_response(response: &PluginResponse, output_dir: Option<&Path>) -> Result<()> {
    if let Some(error) = &response.error {
        bail!("{error}");
    }

    for generated in &response.contents {
        match output_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
                let path = dir.join(&generated.name);
                std::fs::write(&path, &generated.content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!("wrote {}", path.display());
            }
            None => std::io::stdout()
                .write_all(generated.content.as_bytes())
                .context("Error at writing response out")?,
        }
    }

    Ok(())
}
