use crate::{api, session::SessionConfig};
use anyhow::Result;
use secrecy::SecretString;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: SecretString,
    pub store_timeout_seconds: u64,
    pub max_connections: u32,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        port = args.port,
        store_timeout_seconds = args.store_timeout_seconds,
        max_connections = args.max_connections,
        "Starting server"
    );

    let config = SessionConfig::new().with_store_timeout_seconds(args.store_timeout_seconds);

    api::new(args.port, args.dsn, args.max_connections, config).await
}
