//! HTTP surface for fakeapi.
//!
//! Serves generated records under `/api/{endpointId}` and schema management
//! under `/api/apis`. Every failure is translated to `{ "error": message }`
//! with a status from the [`ApiError`] taxonomy.

pub mod error;
pub mod records;
pub mod routes;
pub mod schemas;
pub mod state;

use tokio::net::TcpListener;
use tracing::info;

pub use error::{ApiError, ApiResult};
pub use records::{Payload, RecordService, parse_payload};
pub use routes::router;
pub use schemas::{CreateSchemaRequest, SchemaService, UpdateSchemaRequest};
pub use state::{AppState, ServerLimits};

/// Serve `state` on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(event = "server_started", addr = %addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(event = "server_stopped", addr = %addr);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
