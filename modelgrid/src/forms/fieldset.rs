//! Bound field sets
//!
//! The Rust rendition of a "bound form": a model instance plus the form
//! fields derived from its metadata, alive for one request only.

use serde_json::{Map, Value};

use super::{FormData, FormField, FormRenderer, ValidationErrors};
use crate::model::{value_display, AdminModel};

/// A form bound to one model instance (or a blank one for "new").
#[derive(Debug, Clone)]
pub struct FieldSet<M> {
    model: M,
    fields: Vec<FormField>,
    errors: ValidationErrors,
    readonly: bool,
}

impl<M: AdminModel> FieldSet<M> {
    /// Field set over a blank record, for add forms.
    #[must_use]
    pub fn unbound() -> Self {
        Self::bind(M::default())
    }

    /// Field set bound to an existing record.
    #[must_use]
    pub fn bind(model: M) -> Self {
        let fields = M::fields()
            .into_iter()
            .map(|spec| {
                let mut field = FormField::new(spec.name, spec.label, spec.input);
                field.flags.required = spec.required;
                field.flags.readonly = spec.readonly;
                field.value = model.get(spec.name).map(|value| value_display(&value));
                field
            })
            .collect();
        Self {
            model,
            fields,
            errors: ValidationErrors::new(),
            readonly: false,
        }
    }

    /// Drop read-only fields; add forms never render or bind them.
    #[must_use]
    pub fn without_readonly(mut self) -> Self {
        self.fields.retain(|field| !field.flags.readonly);
        self
    }

    /// Render every field as a static value, for show pages.
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Whether the whole set renders read-only.
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// The bound model instance.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Validation errors collected so far.
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Fields in rendering order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Whether a field with this name is part of the set.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    /// Bind submitted data into the fields and the model.
    ///
    /// Unknown submitted names are ignored; read-only fields are never
    /// bound. A raw value the model cannot parse becomes a validation
    /// error on that field, not a failure.
    pub fn bind_data(&mut self, data: &FormData) {
        for field in &mut self.fields {
            if field.flags.readonly {
                continue;
            }
            if let Some(raw) = data.get(&field.name) {
                field.value = Some(raw.clone());
                if let Err(message) = self.model.set(&field.name, raw) {
                    self.errors.add(field.name.clone(), message);
                }
            }
        }
    }

    /// Run required-field checks and the model's validation hook.
    ///
    /// Returns `true` when the set is clean; otherwise the collected
    /// errors are rendered with the form.
    pub fn validate(&mut self) -> bool {
        for field in &self.fields {
            if field.flags.required && field.value_str().trim().is_empty() {
                self.errors.add(field.name.clone(), "required");
            }
        }
        if let Err(model_errors) = self.model.validate() {
            self.errors.merge(model_errors);
        }
        self.errors.is_empty()
    }

    /// Field values as a JSON object, for item payloads.
    #[must_use]
    pub fn jsonify(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|field| {
                let value = self.model.get(&field.name).unwrap_or(Value::Null);
                (field.name.clone(), value)
            })
            .collect()
    }

    /// Render the whole set as an HTML fragment.
    #[must_use]
    pub fn render(&self) -> String {
        FormRenderer::form(&self.fields, &self.errors, self.readonly)
    }

    /// Render a single field as an HTML fragment, `None` for unknown
    /// field names.
    #[must_use]
    pub fn render_field(&self, name: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| FormRenderer::field(field, self.errors.field(name), self.readonly))
    }
}
