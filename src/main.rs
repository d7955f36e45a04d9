//! Entry point: loads the satellite bundles of a workspace and writes the
//! resolved resource set as JSON.
//!
//! Usage: `satellite-resources <workspace> [culture]`

use std::path::PathBuf;
use std::process::ExitCode;

use satellite_resources::culture::Culture;
use satellite_resources::workspace::{
    WorkspaceError,
    resolve_workspace_resources,
};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

/// Errors surfaced by the command-line front end
#[derive(Error, Debug)]
enum CliError {
    #[error("Usage: satellite-resources <workspace> [culture]")]
    Usage,
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves the requested culture's resources and writes them to stdout.
async fn run() -> Result<(), CliError> {
    let mut args = std::env::args().skip(1);
    let workspace = args.next().map(PathBuf::from).ok_or(CliError::Usage)?;
    let requested = args.next().map(|tag| Culture::new(&tag));

    let resources = resolve_workspace_resources(&workspace, requested.as_ref()).await?;

    let mut output = serde_json::to_vec_pretty(&resources)?;
    output.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&output).await?;
    stdout.flush().await?;

    Ok(())
}
