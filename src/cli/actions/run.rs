use crate::cli::{
    actions::{Action, hash_password, server},
    telemetry,
};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    let result = match action {
        Action::Server(args) => server::execute(args).await,
        Action::HashPassword => hash_password::execute(),
    };

    telemetry::shutdown_tracer();

    result
}
