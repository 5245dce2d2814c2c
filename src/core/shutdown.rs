use std::future::pending;

use tokio::signal;

#[derive(Debug, Clone, Copy)]
enum StopSignal {
    Interrupt,
    Terminate,
}

impl StopSignal {
    fn name(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

async fn interrupt() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "Cannot listen for Ctrl+C; relying on SIGTERM only");
        pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use signal::unix::{signal as unix_signal, SignalKind};

    let Ok(mut stream) = unix_signal(SignalKind::terminate()).map_err(|err| {
        tracing::error!(error = %err, "Cannot listen for SIGTERM; relying on Ctrl+C only");
    }) else {
        return pending::<()>().await;
    };
    stream.recv().await;
}

#[cfg(not(unix))]
async fn terminate() {
    pending::<()>().await
}

/// Resolves once the process is asked to stop; in-flight requests then drain.
pub(crate) async fn shutdown_signal() {
    let received = tokio::select! {
        () = interrupt() => StopSignal::Interrupt,
        () = terminate() => StopSignal::Terminate,
    };

    tracing::info!(signal = received.name(), "Shutting down, draining open connections");
}
