pub mod actions;
mod routes;
pub mod session;

use anyhow::Result;
use stowbox_appwrite::AppwriteClient;
use tokio::net::TcpListener;

pub use routes::build_router;

pub async fn serve(listener: TcpListener, client: AppwriteClient) -> Result<()> {
    let app = routes::build_router(client);
    axum::serve(listener, app).await?;
    Ok(())
}
