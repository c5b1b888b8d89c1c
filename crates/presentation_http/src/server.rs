//! Server lifecycle

use std::{future::IntoFuture as _, sync::Arc, time::Duration};

use axum::Router;
use tokio::{net::TcpListener, sync::Notify};
use tracing::{info, warn};

/// Serve `app` until `signal` resolves, then drain open connections for at
/// most `drain_timeout` before returning
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Notify::new());
    let notify = Arc::clone(&draining);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            info!("Waiting up to {:?} for connections to close...", drain_timeout);
            notify.notify_one();
        })
        .into_future();

    tokio::select! {
        result = server => result,
        () = async {
            draining.notified().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            warn!(timeout = ?drain_timeout, "Connections still open after drain timeout, closing");
            Ok(())
        }
    }
}
