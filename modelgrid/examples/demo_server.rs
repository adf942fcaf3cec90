//! Minimal admin server over the in-memory session.
//!
//! Run with:
//!
//! ```bash
//! cargo run --example demo_server --features testing
//! ```
//!
//! Then open <http://127.0.0.1:3000/admin>.

use modelgrid::prelude::*;
use modelgrid::testing::fixtures::Contact;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AdminConfig::load()?;
    let root = config.root_path.clone();

    let state = AdminState::builder(config)
        .register::<Contact, _>(MemorySession::new())
        .build();

    let app = axum::Router::new().nest(&root, modelgrid::handlers::router(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!(%root, "admin server listening on http://127.0.0.1:3000");
    axum::serve(listener, app).await?;
    Ok(())
}
