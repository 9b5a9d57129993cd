//! Map validated CLI matches to the action the binary runs.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{
    ARG_DSN, ARG_MAX_CONNECTIONS, ARG_PORT, ARG_STORE_TIMEOUT_SECONDS, CMD_HASH_PASSWORD,
};
use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use url::Url;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the DSN is not a
/// PostgreSQL URL.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    if matches.subcommand_name() == Some(CMD_HASH_PASSWORD) {
        return Ok(Action::HashPassword);
    }

    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>(ARG_DSN)
        .cloned()
        .context("missing required argument: --dsn")?;

    validate_dsn(&dsn)?;

    Ok(Action::Server(Args {
        port,
        dsn: SecretString::from(dsn),
        store_timeout_seconds: matches
            .get_one::<u64>(ARG_STORE_TIMEOUT_SECONDS)
            .copied()
            .unwrap_or(5),
        max_connections: matches
            .get_one::<u32>(ARG_MAX_CONNECTIONS)
            .copied()
            .unwrap_or(5),
    }))
}

// Keep credentials out of the error: only the scheme is reported.
fn validate_dsn(dsn: &str) -> Result<()> {
    let url = Url::parse(dsn).map_err(|err| anyhow!("invalid --dsn: {err}"))?;

    match url.scheme() {
        "postgres" | "postgresql" => Ok(()),
        scheme => Err(anyhow!(
            "invalid --dsn: unsupported scheme '{scheme}', expected postgres"
        )),
    }
}
