mod platform;

use std::path::PathBuf;

use clap::Parser;

use platform::config::ConsoleConfig;
use platform::logging::LogDestination;

/// Terminal console for the document OCR and question-answering demos.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the RON configuration file
    #[arg(long, default_value = "console.ron")]
    config: PathBuf,

    /// Backend origin serving /ocr and /llm (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Where log output goes (overrides the config file; default: file)
    #[arg(long, value_enum)]
    log: Option<LogDestination>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (config, origin) = platform::config::load_config(&args.config);
    let config = apply_overrides(config, &args);

    platform::logging::initialize(config.log_destination);
    origin.log(&args.config);
    platform::app::run_app(config)
}

/// Command-line flags win over the config file.
fn apply_overrides(mut config: ConsoleConfig, args: &Args) -> ConsoleConfig {
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(destination) = args.log {
        config.log_destination = destination;
    }
    config
}
