use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use stowbox_appwrite::{AppwriteClient, AppwriteConfig};

#[derive(Parser)]
#[command(
    name = "stowbox-server",
    about = "File storage server actions over a managed backend"
)]
struct Cli {
    /// Bind address
    #[arg(long, env = "STOWBOX_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Listen port
    #[arg(long, env = "STOWBOX_PORT", default_value_t = 4780)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppwriteConfig::from_env()?;
    let client = AppwriteClient::new(config);

    let addr = SocketAddr::new(cli.bind.parse()?, cli.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("stowbox-server listening on http://{addr}");

    stowbox_server::serve(listener, client).await?;

    Ok(())
}
