use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use recibo_config::Config;
use recibo_gateway::{start_server, AppState};
use recibo_providers::{GeminiStructurer, GoogleVisionOcr};

#[derive(Parser)]
#[command(name = "recibo")]
#[command(about = "Recibo — receipt image to structured expense JSON")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Query a running server's health endpoint
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("recibo is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    logging::init_logger(&config.log_dir, &config.log_level);
    info!(config = %config.redacted(), "Starting recibo");

    if config.google_api_key.is_none() {
        warn!("GOOGLE_API_KEY is not set; upstream calls will fail until it is provided");
    }

    let timeout = Duration::from_secs(config.upstream_timeout_secs);
    let api_key = config.google_api_key.clone().unwrap_or_default();
    let ocr = Arc::new(GoogleVisionOcr::new(api_key.clone(), timeout)?);
    let structurer = Arc::new(GeminiStructurer::new(api_key, timeout)?);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    let state = Arc::new(AppState {
        config,
        ocr,
        structurer,
    });

    start_server(addr, state).await
}
