//! Hello Server
//!
//! Serves a single `hello` method over TCP.
//!
//! Usage:
//! ```bash
//! RUST_LOG=info cargo run --package hello-server
//! RUST_LOG=debug cargo run --package hello-server -- --bind 0.0.0.0:43000
//! ```

use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use reqrep_server::{RpcServer, typed};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "hello-server")]
#[command(about = "Request/reply JSON-RPC server answering hello")]
struct Args {
    /// Address to bind the reply socket to
    #[arg(short, long, default_value = "127.0.0.1:43000")]
    bind: SocketAddr,
}

fn say_hello((name,): (String,)) -> Result<String, reqrep_server::MethodError> {
    Ok(format!("Hello, {}!", name))
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

    let mut server = RpcServer::builder()
        .name("hello-server")
        .bind_address(args.bind)
        .method("hello", typed(say_hello))
        .build()?;

    info!("API started on {}", args.bind);
    server.run().await?;
    info!("API stopped");

    Ok(())
}
