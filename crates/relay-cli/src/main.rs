use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod configuration;
mod error;
mod render;

use commands::run::execute as run_pipeline;
use commands::version::execute as print_version;
use render::Theme;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output from the pipeline to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the strategy → objectives → timeline pipeline once
    Run(RunArgs),

    /// Print the version
    Version,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Model to use (overrides RELAY_PROVIDER__MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// OpenAI API key (overrides RELAY_PROVIDER__API_KEY and OPENAI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// JSON-RPC tool endpoint (overrides RELAY_TOOLS__ENDPOINT)
    #[arg(long)]
    pub tools_endpoint: Option<String>,

    /// Color theme for rendered output
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "relay=debug,relay_cli=debug"
    } else {
        "relay=warn,relay_cli=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Run(args)) => run_pipeline(args).await,
        Some(Command::Version) => print_version().await,
        None => run_pipeline(RunArgs::default()).await,
    }
}
