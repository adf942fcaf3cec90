//! modelgrid: model-bound CRUD admin layer for axum
//!
//! Register a model type and get a full admin surface for it: a paginated
//! listing grid, show/new/edit forms, and create/update/delete endpoints.
//! Every endpoint renders one of three representations:
//!
//! - a full HTML page (askama templates with breadcrumb chrome),
//! - a bare HTML fragment for htmx/XHR partial requests,
//! - or JSON for programmatic clients.
//!
//! The interesting decisions stay with collaborators: persistence goes
//! through the [`session::Session`] trait (sqlx-backed or in-memory),
//! validation rules live on the model (the `validator` crate plugs in via
//! [`forms::ValidationErrors`]), and axum owns routing and extraction.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use modelgrid::prelude::*;
//! # use modelgrid::testing::fixtures::Contact;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AdminConfig::load()?;
//!     let root = config.root_path.clone();
//!
//!     let state = AdminState::builder(config)
//!         .register::<Contact, _>(MemorySession::new())
//!         .build();
//!
//!     let app = axum::Router::new().nest(&root, modelgrid::handlers::router(state));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `testing` - axum-test server wrapper and fixture models

pub mod config;
pub mod error;
pub mod forms;
pub mod grid;
pub mod handlers;
pub mod i18n;
pub mod model;
pub mod page;
pub mod session;
pub mod state;
pub mod template;
pub mod urls;
pub mod view;

#[cfg(feature = "testing")]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use modelgrid::prelude::*;
    //! ```

    // Model contract
    pub use crate::model::{AdminModel, FieldSpec, ModelId};

    // Persistence seam
    pub use crate::session::{MemorySession, Session, SqlxRecord, SqlxSession};

    // Forms and grids
    pub use crate::forms::{FieldSet, FormData, FormField, InputType, ValidationErrors};
    pub use crate::grid::Grid;
    pub use crate::page::Page;

    // Request handling
    pub use crate::state::AdminState;
    pub use crate::urls::UrlBuilder;
    pub use crate::view::{ModelAdmin, ModelView, RenderFormat, RequestContext};

    // Configuration and errors
    pub use crate::config::AdminConfig;
    pub use crate::error::{AdminError, AdminResult};

    // Re-export key dependencies
    pub use askama;
    pub use axum;
    pub use validator;
}
