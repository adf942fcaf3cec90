//! Model metadata contract
//!
//! [`AdminModel`] is the single trait a type must implement to be managed
//! by the admin layer: static field metadata, per-field access by name,
//! and an opaque primary key. Everything else (forms, grids, JSON rows)
//! is derived from this contract.

use serde_json::Value;

use crate::forms::{InputType, ValidationErrors};

/// Opaque primary key.
///
/// Records may key on integers, UUIDs or composites; URLs and JSON carry
/// the key as a string either way, so the admin layer never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId(String);

impl ModelId {
    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ModelId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for ModelId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Static description of one model field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name, as used in form submissions and JSON payloads
    pub name: &'static str,
    /// Label rendered next to the field
    pub label: &'static str,
    /// HTML input type used when rendering the field
    pub input: InputType,
    /// Read-only fields are excluded from add forms and never bound
    pub readonly: bool,
    /// Required fields fail validation when submitted empty
    pub required: bool,
}

impl FieldSpec {
    /// Create a field spec with the label defaulting to the name.
    #[must_use]
    pub const fn new(name: &'static str, input: InputType) -> Self {
        Self {
            name,
            label: name,
            input,
            readonly: false,
            required: false,
        }
    }

    /// Set the rendered label.
    #[must_use]
    pub const fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Mark the field read-only.
    #[must_use]
    pub const fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Mark the field required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Contract for model types managed by the admin layer.
///
/// `Default` provides the blank record behind "new" forms; `Clone` lets
/// a bound form hand a synced copy to the session.
pub trait AdminModel: Clone + Default + Send + Sync + 'static {
    /// Model name as it appears in URLs, breadcrumbs and the registry.
    fn model_name() -> &'static str;

    /// Field metadata, in rendering order.
    fn fields() -> Vec<FieldSpec>;

    /// Name of the primary key field.
    fn pk_field() -> &'static str {
        "id"
    }

    /// Primary key of this record, if it has been persisted.
    fn pk(&self) -> Option<ModelId>;

    /// Current value of a field, `None` for unknown names.
    fn get(&self, field: &str) -> Option<Value>;

    /// Set a field from its raw submitted text.
    ///
    /// # Errors
    ///
    /// Returns a message describing why the raw value does not parse
    /// into the field's type; the message is attached to the field as a
    /// validation error.
    fn set(&mut self, field: &str, raw: &str) -> Result<(), String>;

    /// Human-readable label for this record, used in breadcrumbs.
    /// Records without one are labeled by their primary key.
    fn display(&self) -> Option<String> {
        None
    }

    /// Model-level validation hook, run after binding.
    ///
    /// # Errors
    ///
    /// Returns the per-field error messages collected by the model's
    /// own rules (for example via the `validator` derive).
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Render a JSON value the way a grid cell shows it: strings bare,
/// everything else in JSON notation, null empty.
#[must_use]
pub fn value_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
