//! In-memory session backend
//!
//! Keeps records in a map behind a lock; primary keys are assigned from
//! a counter on `add` when the record has none. Iteration order is the
//! string order of the keys, which is stable across requests.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::Session;
use crate::error::{AdminError, AdminResult};
use crate::model::{AdminModel, ModelId};

struct Inner<M> {
    records: BTreeMap<String, M>,
    next_id: u64,
}

/// Map-backed [`Session`] for tests and demos.
pub struct MemorySession<M> {
    inner: RwLock<Inner<M>>,
    _model: PhantomData<fn() -> M>,
}

impl<M: AdminModel> MemorySession<M> {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: 0,
            }),
            _model: PhantomData,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// True when no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }
}

impl<M: AdminModel> Default for MemorySession<M> {
    fn default() -> Self {
        Self::new()
    }
}

fn require_pk<M: AdminModel>(model: &M) -> AdminResult<ModelId> {
    model.pk().ok_or_else(|| {
        AdminError::ServerError(format!(
            "{} record has no primary key",
            M::model_name()
        ))
    })
}

#[async_trait]
impl<M: AdminModel> Session<M> for MemorySession<M> {
    async fn get(&self, id: &ModelId) -> AdminResult<Option<M>> {
        Ok(self.inner.read().records.get(id.as_str()).cloned())
    }

    async fn page(&self, offset: u64, limit: u64) -> AdminResult<Vec<M>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .inner
            .read()
            .records
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> AdminResult<u64> {
        Ok(self.inner.read().records.len() as u64)
    }

    async fn add(&self, model: &mut M) -> AdminResult<()> {
        let mut inner = self.inner.write();
        if model.pk().is_none() {
            inner.next_id += 1;
            let id = inner.next_id.to_string();
            model
                .set(M::pk_field(), &id)
                .map_err(AdminError::ServerError)?;
        }
        let pk = require_pk(model)?;
        inner.records.insert(pk.as_str().to_string(), model.clone());
        Ok(())
    }

    async fn merge(&self, model: &M) -> AdminResult<()> {
        let pk = require_pk(model)?;
        self.inner
            .write()
            .records
            .insert(pk.as_str().to_string(), model.clone());
        Ok(())
    }

    async fn delete(&self, model: &M) -> AdminResult<()> {
        let pk = require_pk(model)?;
        self.inner.write().records.remove(pk.as_str());
        Ok(())
    }

    async fn flush(&self) -> AdminResult<()> {
        Ok(())
    }
}
