//! Rummy room server.
//!
//! ```sh
//! PORT=3000 RUST_LOG=tilehall=debug cargo run -p tilehall-server
//! ```

use tilehall::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), TilehallError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let server = TilehallServer::builder().config(&config).build().await?;
    server.run().await
}
