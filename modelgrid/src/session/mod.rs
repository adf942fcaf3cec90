//! Persistence seam
//!
//! The admin layer never talks to a database directly; every operation
//! goes through [`Session`]. Two backends ship with the crate: a
//! sqlx/Postgres one ([`SqlxSession`]) and an in-memory one
//! ([`MemorySession`]) for tests and demos. Transaction semantics belong
//! to the backend; this layer only calls `add`/`merge`/`delete` and a
//! `flush` after a successful write.

mod memory;
mod sql;

pub use memory::MemorySession;
pub use sql::{SqlxRecord, SqlxSession};

use async_trait::async_trait;

use crate::error::AdminResult;
use crate::model::{AdminModel, ModelId};

/// Request-scoped persistence operations for one model type.
#[async_trait]
pub trait Session<M: AdminModel>: Send + Sync + 'static {
    /// Fetch one record by primary key.
    async fn get(&self, id: &ModelId) -> AdminResult<Option<M>>;

    /// Fetch one window of records in a stable order.
    async fn page(&self, offset: u64, limit: u64) -> AdminResult<Vec<M>>;

    /// Unpaginated record count.
    async fn count(&self) -> AdminResult<u64>;

    /// Persist a new record. The backend may assign the primary key.
    async fn add(&self, model: &mut M) -> AdminResult<()>;

    /// Persist changes to an existing record.
    async fn merge(&self, model: &M) -> AdminResult<()>;

    /// Delete a record.
    async fn delete(&self, model: &M) -> AdminResult<()>;

    /// Make pending writes visible. A no-op for autocommit backends.
    async fn flush(&self) -> AdminResult<()>;
}
