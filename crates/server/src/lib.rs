#![forbid(unsafe_code)]

mod error;
pub mod handler;
mod router;
pub mod sweeper;

use std::future::Future;

use tokio::net::{TcpListener, lookup_host};
use tracing::info;

use ventokv_common::{ServerError, VentoResult};
use ventokv_storage::Store;

pub use error::ApiError;
pub use router::app;
pub use sweeper::run_sweeper;

/// Resolve `host:port` e abre o listener.
pub async fn bind(host: &str, port: u16) -> VentoResult<TcpListener> {
    let addr = format!("{host}:{port}");
    let resolved = lookup_host(&addr)
        .await?
        .next()
        .ok_or_else(|| ServerError::InvalidAddress(addr.clone()))?;
    let listener = TcpListener::bind(resolved).await?;
    Ok(listener)
}

/// Serve o router até `shutdown` completar.
pub async fn run<F>(listener: TcpListener, store: Store, shutdown: F) -> VentoResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("VentoKV escutando em {addr}");
    }
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
