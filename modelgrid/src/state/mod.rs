//! Application state and model registry
//!
//! [`AdminState`] is the clone-able axum state: configuration, the URL
//! builder, the translator, and the registry of erased model admins.
//! The registry is the model-class resolver of the admin layer: a
//! `{model}` path segment either resolves to a registered admin or the
//! request fails Not-Found.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};
use crate::i18n::{self, Translator};
use crate::model::AdminModel;
use crate::session::Session;
use crate::urls::UrlBuilder;
use crate::view::{ModelAdmin, ModelView};

struct Inner {
    config: AdminConfig,
    urls: UrlBuilder,
    translator: Translator,
    registry: BTreeMap<&'static str, Arc<dyn ModelAdmin>>,
}

/// Shared state behind every admin route.
#[derive(Clone)]
pub struct AdminState {
    inner: Arc<Inner>,
}

impl AdminState {
    /// Start building state from configuration.
    #[must_use]
    pub fn builder(config: AdminConfig) -> AdminStateBuilder {
        AdminStateBuilder {
            config,
            translator: i18n::identity(),
            registry: BTreeMap::new(),
        }
    }

    /// Configuration reference.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// URL builder rooted at the configured admin path.
    #[must_use]
    pub fn urls(&self) -> &UrlBuilder {
        &self.inner.urls
    }

    /// Translate a chrome label.
    #[must_use]
    pub fn translate(&self, label: &str) -> String {
        (self.inner.translator.as_ref())(label)
    }

    /// The translator as a plain callback, for renderers.
    #[must_use]
    pub fn translator(&self) -> &dyn Fn(&str) -> String {
        self.inner.translator.as_ref()
    }

    /// Resolve a model name to its admin.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] for names that were never registered.
    pub fn admin(&self, model: &str) -> AdminResult<Arc<dyn ModelAdmin>> {
        self.inner
            .registry
            .get(model)
            .cloned()
            .ok_or_else(|| AdminError::not_found(format!("model {model}")))
    }

    /// Names of all registered models, in name order.
    pub fn model_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.registry.keys().copied()
    }
}

/// Builder collecting model registrations before the state is shared.
pub struct AdminStateBuilder {
    config: AdminConfig,
    translator: Translator,
    registry: BTreeMap<&'static str, Arc<dyn ModelAdmin>>,
}

impl AdminStateBuilder {
    /// Register a model with the session that persists it.
    ///
    /// Registering the same model name twice replaces the earlier
    /// registration.
    #[must_use]
    pub fn register<M, S>(mut self, session: S) -> Self
    where
        M: AdminModel,
        S: Session<M>,
    {
        self.registry
            .insert(M::model_name(), Arc::new(ModelView::<M, S>::new(session)));
        self
    }

    /// Replace the identity translator.
    #[must_use]
    pub fn translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> AdminState {
        let urls = UrlBuilder::new(self.config.root_path.clone());
        AdminState {
            inner: Arc::new(Inner {
                config: self.config,
                urls,
                translator: self.translator,
                registry: self.registry,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::InputType;
    use crate::model::{FieldSpec, ModelId};
    use crate::session::MemorySession;
    use serde_json::Value;

    #[derive(Debug, Clone, Default)]
    struct Probe {
        id: Option<i64>,
    }

    impl AdminModel for Probe {
        fn model_name() -> &'static str {
            "Probe"
        }

        fn fields() -> Vec<FieldSpec> {
            vec![FieldSpec::new("id", InputType::Number).readonly()]
        }

        fn pk(&self) -> Option<ModelId> {
            self.id.map(Into::into)
        }

        fn get(&self, field: &str) -> Option<Value> {
            (field == "id").then(|| self.id.map_or(Value::Null, Value::from))
        }

        fn set(&mut self, field: &str, raw: &str) -> Result<(), String> {
            if field == "id" {
                self.id = Some(raw.parse().map_err(|_| "not an id".to_string())?);
                Ok(())
            } else {
                Err(format!("unknown field: {field}"))
            }
        }
    }

    #[test]
    fn test_registry_resolves_registered_model() {
        let state = AdminState::builder(AdminConfig::default())
            .register::<Probe, _>(MemorySession::new())
            .build();

        assert!(state.admin("Probe").is_ok());
        assert_eq!(state.model_names().collect::<Vec<_>>(), ["Probe"]);
    }

    #[test]
    fn test_unknown_model_is_not_found() {
        let state = AdminState::builder(AdminConfig::default()).build();
        let Err(error) = state.admin("Ghost") else {
            panic!("expected an error for an unregistered model");
        };
        assert!(matches!(error, AdminError::NotFound(_)));
    }

    #[test]
    fn test_translator_applies_to_labels() {
        let state = AdminState::builder(AdminConfig::default())
            .translator(Arc::new(|label| format!("[{label}]")))
            .build();
        assert_eq!(state.translate("edit"), "[edit]");
    }
}
