//! sqlx-backed session
//!
//! [`SqlxSession`] implements [`Session`] over a Postgres pool for any
//! model that also implements [`SqlxRecord`]. Reads are generated from
//! the record's table and key column metadata; writes stay with the
//! record type, which knows its own column types and bindings.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};

use super::Session;
use crate::error::{AdminError, AdminResult};
use crate::model::{AdminModel, ModelId};

/// sqlx persistence contract for an admin-managed model.
///
/// Table and key column names come from the implementing type, never
/// from request input, so interpolating them into SQL text is safe.
#[async_trait]
pub trait SqlxRecord: AdminModel {
    /// Table the model maps to.
    fn table() -> &'static str;

    /// Primary key column.
    fn pk_column() -> &'static str {
        "id"
    }

    /// Hydrate one record from a row.
    ///
    /// # Errors
    ///
    /// Returns the sqlx decode error for a column that does not match
    /// the model's type.
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error>;

    /// Insert this record, assigning the primary key.
    async fn insert(&mut self, pool: &PgPool) -> Result<(), sqlx::Error>;

    /// Update this record in place.
    async fn update(&self, pool: &PgPool) -> Result<(), sqlx::Error>;
}

/// Postgres-backed [`Session`].
#[derive(Debug, Clone)]
pub struct SqlxSession {
    pool: PgPool,
}

impl SqlxSession {
    /// Wrap a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl<M: SqlxRecord> Session<M> for SqlxSession {
    async fn get(&self, id: &ModelId) -> AdminResult<Option<M>> {
        // Keys are compared as text so arbitrary key column types work
        // with the stringly ids carried in URLs.
        let sql = format!(
            "SELECT * FROM {} WHERE {}::text = $1",
            M::table(),
            M::pk_column()
        );
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|row| M::from_row(&row)).transpose().map_err(Into::into)
    }

    async fn page(&self, offset: u64, limit: u64) -> AdminResult<Vec<M>> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY {} LIMIT $1 OFFSET $2",
            M::table(),
            M::pk_column()
        );
        let rows = sqlx::query(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| M::from_row(row).map_err(Into::into))
            .collect()
    }

    async fn count(&self) -> AdminResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", M::table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn add(&self, model: &mut M) -> AdminResult<()> {
        model.insert(&self.pool).await?;
        tracing::debug!(model = M::model_name(), "record inserted");
        Ok(())
    }

    async fn merge(&self, model: &M) -> AdminResult<()> {
        model.update(&self.pool).await?;
        tracing::debug!(model = M::model_name(), "record updated");
        Ok(())
    }

    async fn delete(&self, model: &M) -> AdminResult<()> {
        let pk = model.pk().ok_or_else(|| {
            AdminError::ServerError(format!("{} record has no primary key", M::model_name()))
        })?;
        let sql = format!(
            "DELETE FROM {} WHERE {}::text = $1",
            M::table(),
            M::pk_column()
        );
        sqlx::query(&sql).bind(pk.as_str()).execute(&self.pool).await?;
        tracing::debug!(model = M::model_name(), id = %pk, "record deleted");
        Ok(())
    }

    async fn flush(&self) -> AdminResult<()> {
        // The pool autocommits each statement; nothing is buffered here.
        Ok(())
    }
}
