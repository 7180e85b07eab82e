//! Corrective Trigger Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.
//!
//! See `README.md` for quickstart.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use corrective_shape_trigger::api;
use corrective_shape_trigger::config::CorrectiveSetConfig;
use corrective_shape_trigger::metrics::Metrics;

/// Compact tracing output; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("corrective_shape_trigger=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op elsewhere. This enables
    // TRIGGER_BIND_ADDR / RUST_LOG from .env.
    let _ = dotenvy::dotenv();

    init_tracing();

    // Count correctives once for the static gauge; the router loads its own
    // copy and can reload it at runtime.
    let cfg = CorrectiveSetConfig::load_from_file(api::DEFAULT_CONFIG_PATH);
    let metrics = Metrics::init(cfg.correctives.len());

    let router = api::create_router().merge(metrics.router());

    let addr = std::env::var("TRIGGER_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, correctives = cfg.correctives.len(), "corrective trigger service listening");

    axum::serve(listener, router).await?;
    Ok(())
}
