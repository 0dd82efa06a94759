//! Activity Server
//!
//! Usage:
//! ```bash
//! RUST_LOG=debug cargo run --package activity-server
//! cargo run --package activity-server -- --bind 127.0.0.1:5555
//! ```

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use reqrep_server::ServerConfig;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "activity-server")]
#[command(about = "Signal-processing activities over request/reply JSON-RPC")]
struct Args {
    /// Address to bind the reply socket to
    #[arg(short, long, default_value = "127.0.0.1:43000")]
    bind: SocketAddr,

    /// Largest accepted request, in bytes
    #[arg(long)]
    max_frame_length: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = ServerConfig {
        bind_address: args.bind,
        ..ServerConfig::default()
    };
    if let Some(max_frame_length) = args.max_frame_length {
        config.frame.max_frame_length = max_frame_length;
    }

    let mut server = activity_server::builder(config).build()?;
    info!(methods = ?server.registry().method_names(), "Activity API ready");
    server.run().await?;

    Ok(())
}
