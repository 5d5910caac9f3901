//! Graceful shutdown

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),

    #[cfg(windows)]
    #[error("failed to install Windows terminate handler: {0}")]
    Terminate(#[source] io::Error),
}

/// Wait for a stop signal, then let in-flight requests drain for `grace`.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Option<Duration>,
) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(
        signal,
        grace_seconds = grace.map_or(0, |grace| grace.as_secs()),
        "shutting down"
    );

    handle.stop_graceful(grace);

    Ok(())
}

async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    let ctrl_c = async {
        signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;

        Ok::<_, ShutdownSignalError>("ctrl_c")
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<_, ShutdownSignalError>("sigterm")
    };

    #[cfg(windows)]
    let terminate = async {
        signal::windows::ctrl_break()
            .map_err(ShutdownSignalError::Terminate)?
            .recv()
            .await;

        Ok::<_, ShutdownSignalError>("ctrl_break")
    };

    tokio::select! {
        received = ctrl_c => received,
        received = terminate => received,
    }
}
