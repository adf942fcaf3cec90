//! Form fields, bound field sets and HTML rendering
//!
//! A [`FieldSet`] is the transient "bound form" of one request: it pairs
//! a model instance (or a blank one) with its rendered fields, binds
//! submitted data, validates, and renders either the whole form or a
//! single field as an HTML fragment.

mod error;
mod field;
mod fieldset;
mod render;

pub use error::ValidationErrors;
pub use field::{FieldFlags, FormField, InputType};
pub use fieldset::FieldSet;
pub use render::{html_escape, FormRenderer};

/// Submitted form data, field name to raw value.
///
/// An ordered map so re-rendered forms and error listings are
/// deterministic.
pub type FormData = std::collections::BTreeMap<String, String>;
