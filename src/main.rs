use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use sqlscribe::codegen::{CSharpGenerator, CodeGenOptions, CodeGenerator, FormatConfig};
use sqlscribe::descriptor;

#[derive(Parser, Debug)]
#[command(name = "sqlscribe")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the JSON schema descriptor
    descriptor: PathBuf,

    /// Output file path (generator extension appended when missing)
    #[arg(short, long, default_value = "./database")]
    output: PathBuf,

    /// Namespace to wrap the generated code in
    #[arg(long)]
    namespace: Option<String>,

    /// Base type for the generated context class
    #[arg(long, default_value = "DataContext")]
    base: String,

    /// Source description for the generated header (defaults to the descriptor path)
    #[arg(long)]
    source: Option<String>,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        error!(error = ?e, "Fatal error");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("sqlscribe v{}", env!("CARGO_PKG_VERSION"));
    info!(
        descriptor = ?cli.descriptor,
        output = ?cli.output,
        namespace = ?cli.namespace,
        base = ?cli.base,
        "Starting code generation"
    );

    let database =
        descriptor::load(&cli.descriptor).context("Failed to load schema descriptor")?;

    // Log table names at debug level
    for table in &database.tables {
        debug!(
            table = ?table.name,
            columns = table.columns.len(),
            "Table"
        );
    }

    let source = cli
        .source
        .unwrap_or_else(|| format!("file {}", cli.descriptor.display()));

    let mut options = CodeGenOptions::new(cli.base)
        .with_source_description(source)
        .with_generated_at(chrono::Local::now().format("%Y-%b-%d").to_string());
    if let Some(namespace) = cli.namespace {
        options = options.with_namespace(namespace);
    }
    debug!(options = ?options, "Code generation options");

    let generator = CSharpGenerator::new();
    let document = generator.document(&database, &options, &FormatConfig::default())?;

    let final_path = if cli.output.extension().is_some() {
        cli.output.clone()
    } else {
        cli.output.with_extension(document.extension)
    };

    std::fs::write(&final_path, &document.text)
        .with_context(|| format!("Failed to write {}", final_path.display()))?;

    info!(
        path = ?final_path,
        bytes = document.text.len(),
        "Generated source file"
    );

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
