//! Hello Client
//!
//! Sends `hello ["world"]` with id 1 and prints the raw response envelope.
//!
//! Usage:
//! ```bash
//! cargo run --package hello-client
//! cargo run --package hello-client -- --endpoint 127.0.0.1:43000 --name Alice
//! ```

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use reqrep_client::{ClientConfig, Params, RequestId, RpcClient};
use serde_json::json;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server endpoint
    #[arg(short, long, default_value = "127.0.0.1:43000")]
    endpoint: String,

    /// Name to greet
    #[arg(short, long, default_value = "world")]
    name: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "5")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = ClientConfig::default()
        .with_endpoint(args.endpoint)
        .with_request_timeout(Duration::from_secs(args.timeout));
    let mut client = RpcClient::connect(config).await?;

    let params = Params::from(vec![json!(args.name)]);
    let response = client
        .request("hello", Some(&params), Some(RequestId::Number(1)))
        .await?;
    debug!(is_error = response.is_error(), "Received response");

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
