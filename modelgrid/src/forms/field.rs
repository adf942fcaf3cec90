//! Form field types and input configuration

/// Field attribute flags grouped for better ergonomics
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldFlags {
    /// Whether field is required
    pub required: bool,
    /// Whether field is read-only
    pub readonly: bool,
}

/// HTML input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Text input (default)
    #[default]
    Text,
    /// Email input with validation
    Email,
    /// Password input (masked)
    Password,
    /// Number input
    Number,
    /// Date input
    Date,
    /// Checkbox
    Checkbox,
    /// Hidden input
    Hidden,
}

impl InputType {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A form field with its rendering state for one request
#[derive(Debug, Clone)]
pub struct FormField {
    /// Field name (used for form submission)
    pub name: String,
    /// Label text
    pub label: String,
    /// Input type
    pub input: InputType,
    /// Current value, as rendered into the input
    pub value: Option<String>,
    /// Field attribute flags (required, readonly)
    pub flags: FieldFlags,
}

impl FormField {
    /// Create a new field with no value.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, input: InputType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            input,
            value: None,
            flags: FieldFlags::default(),
        }
    }

    /// Value as rendered, empty string when unset.
    #[must_use]
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_as_str() {
        assert_eq!(InputType::Email.as_str(), "email");
        assert_eq!(InputType::Password.as_str(), "password");
        assert_eq!(InputType::Hidden.as_str(), "hidden");
    }

    #[test]
    fn test_form_field_value_str() {
        let mut field = FormField::new("email", "Email", InputType::Email);
        assert_eq!(field.value_str(), "");

        field.value = Some("a@b.example".into());
        assert_eq!(field.value_str(), "a@b.example");
    }
}
