use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use yttools_api::server::{self, ServerConfig};
use yttools_local::{shellout, YtDlp};

#[derive(Parser, Debug)]
#[command(name = "yttools-api")]
#[command(about = "YouTube tools API (metadata + captions over HTTP)", long_about = None)]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    /// Port to bind.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (the default when no subcommand is given).
    Serve,
    /// Diagnose configuration/launch issues (json; no secrets).
    Doctor,
    /// Print version info (json).
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cli.host, cli.port).await,
        Commands::Doctor => doctor(cli.host, cli.port).await,
        Commands::Version => {
            println!(
                "{}",
                serde_json::json!({
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION"),
                })
            );
            Ok(())
        }
    }
}

async fn serve(host: String, port: u16) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let provider = YtDlp::from_env();
    if !shellout::has(provider.bin()) {
        tracing::warn!(
            bin = provider.bin(),
            "downloader not found on PATH; requests will fail until it is installed"
        );
    }
    server::serve(ServerConfig { host, port }, Arc::new(provider)).await
}

async fn doctor(host: String, port: u16) -> Result<()> {
    let provider = YtDlp::from_env();
    let path = shellout::which(provider.bin());
    let version = match &path {
        Some(_) => {
            let mut cmd = tokio::process::Command::new(provider.bin());
            cmd.arg("--version");
            match shellout::run_bounded(cmd, Duration::from_secs(10)).await {
                Ok(out) if out.status.success() => {
                    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
                }
                _ => None,
            }
        }
        None => None,
    };
    let report = serde_json::json!({
        "yt_dlp": {
            "bin": provider.bin(),
            "found": path.is_some(),
            "path": path.as_ref().map(|p| p.to_string_lossy().to_string()),
            "version": version,
        },
        "bind": { "host": host, "port": port },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
