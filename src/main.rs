use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voicebridge::Config;
use voicebridge::api::{ApiServer, ApiState};

/// Voicebridge - HTTP relay bridging browser audio to cloud speech and chat services
#[derive(Parser)]
#[command(name = "voicebridge", version, about)]
struct Cli {
    /// Port to listen on (overrides config file)
    #[arg(long, env = "VOICEBRIDGE_PORT")]
    port: Option<u16>,

    /// Directory of static frontend files to serve at /
    #[arg(long, env = "VOICEBRIDGE_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,voicebridge=info",
        1 => "info,voicebridge=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load();

    // CLI flags win over environment and config file
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(static_dir) = cli.static_dir {
        config.static_dir = Some(static_dir);
    }

    tracing::info!(
        port = config.port,
        stt = config.stt.api_key.is_some(),
        chat = config.chat.api_key.is_some(),
        tts = config.tts.api_key.is_some(),
        "starting voicebridge"
    );

    let state = ApiState::from_config(&config);
    let server = ApiServer::new(state, config.port, config.static_dir.clone());

    server.run().await?;

    Ok(())
}
