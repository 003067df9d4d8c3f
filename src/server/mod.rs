//! HTTP server for the itinerary endpoint (axum).
//!
//! **Public API**: [`serve`], [`serve_on_listener`], [`router`], [`AppState`].

mod app;
mod handler;

use tokio::net::TcpListener;
use tracing::info;

pub use app::{router, AppState};
pub use handler::GENERATE_ITINERARY_PATH;

/// Serve on an existing listener until `shutdown` resolves.
///
/// Tests bind `127.0.0.1:0` and pass the listener in.
pub async fn serve_on_listener<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(
        "itinerary server listening on http://{}{}",
        addr, GENERATE_ITINERARY_PATH
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on_listener(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
    })
    .await
}
