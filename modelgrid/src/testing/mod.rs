//! Testing utilities
//!
//! Enabled by the `testing` feature. Provides:
//! - [`TestServer`] - wrapper around `axum-test` for server testing
//! - [`fixtures`] - ready-made models for tests, docs and demos
//!
//! # Example
//!
//! ```rust,no_run
//! use modelgrid::prelude::*;
//! use modelgrid::testing::{fixtures::Contact, TestServer};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let state = AdminState::builder(AdminConfig::default())
//!     .register::<Contact, _>(MemorySession::new())
//!     .build();
//! let app = axum::Router::new().nest("/admin", modelgrid::handlers::router(state));
//!
//! let server = TestServer::new(app)?;
//! let response = server.get("/admin/Contact").await;
//! response.assert_status_ok();
//! # Ok(())
//! # }
//! ```

pub mod fixtures;
mod server;

pub use server::TestServer;
