use std::io::{self, Write as _};
use std::{fs, path::Path};

use clap::{Parser, ValueEnum};
use shambird::{
    config::load_config,
    core::{engine::Engine, error::DetectError, types::OutputFormat},
    pipeline::reporter,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "shambird",
    about = "Fakeness scoring for X/Twitter accounts from public metadata"
)]
struct Cli {
    /// Handle to analyze, with or without a leading @. Prompted for on
    /// stdin when omitted.
    handle: Option<String>,
    /// Path to config file (TOML). Default: config/shambird.toml
    #[arg(long)]
    config: Option<String>,
    /// Disable the in-memory resolve cache
    #[arg(long)]
    no_cache: bool,
    /// Increase verbosity (info, debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Optional log file path
    #[arg(long, default_value = "data/shambird.log")]
    log_file: String,
    /// Report format, printed to stdout and written to --output
    #[arg(long, default_value = "markdown", value_enum)]
    format: FormatArg,
    /// Optional path for the report artifact
    #[arg(long)]
    output: Option<String>,
}

#[derive(ValueEnum, Clone, Debug)]
enum FormatArg {
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), DetectError> {
    let cli = Cli::parse();

    init_tracing(&cli)?;

    let cfg = load_config(cli.config.as_deref())?;
    let engine = Engine::new(cfg)?;

    let handle = match cli.handle.clone() {
        Some(handle) => handle,
        None => prompt_handle()?,
    };

    let analysis = engine.analyze(&handle, !cli.no_cache).await?;

    let format: OutputFormat = cli.format.into();
    if let Some(out) = &cli.output {
        reporter::write_card(&analysis.card, format, Path::new(out))
            .map_err(|e| DetectError::Config(e.to_string()))?;
        tracing::info!("report written to {out}");
    }
    match format {
        OutputFormat::Markdown => println!("{}", reporter::render_markdown(&analysis.card)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&analysis.card)
                .map_err(|e| DetectError::Payload(e.to_string()))?;
            println!("{json}");
        }
    }
    Ok(())
}

fn prompt_handle() -> Result<String, DetectError> {
    print!("Enter X/Twitter handle (without @): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn init_tracing(cli: &Cli) -> Result<(), DetectError> {
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_path = Path::new(&cli.log_file);
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).map_err(|e| DetectError::Config(e.to_string()))?;
    }
    if log_path.exists() {
        if let Ok(meta) = fs::metadata(log_path) {
            if meta.len() > 1_000_000 {
                let rotated = log_path.with_extension("log.1");
                let _ = fs::rename(log_path, rotated);
            }
        }
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| DetectError::Config(e.to_string()))?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(false);

    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| DetectError::Config(e.to_string()))
}
