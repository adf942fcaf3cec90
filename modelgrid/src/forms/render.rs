//! HTML rendering for fields and field sets
//!
//! Forms render to plain strings here and are embedded into the page
//! templates with the `safe` filter; the templates stay markup-only.

use super::{FormField, InputType, ValidationErrors};

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Renders fields and field sets to HTML strings
pub struct FormRenderer;

impl FormRenderer {
    /// Render a whole field set as a `<fieldset>` fragment.
    #[must_use]
    pub fn form(fields: &[FormField], errors: &ValidationErrors, readonly: bool) -> String {
        let mut out = String::from("<fieldset class=\"modelgrid-form\">\n");
        for field in fields {
            out.push_str(&Self::field(field, errors.field(&field.name), readonly));
            out.push('\n');
        }
        out.push_str("</fieldset>");
        out
    }

    /// Render one field: label, input (or static value when read-only)
    /// and any error messages.
    #[must_use]
    pub fn field(field: &FormField, errors: &[String], readonly: bool) -> String {
        let name = html_escape(&field.name);
        let value = html_escape(field.value_str());

        if field.input == InputType::Hidden && !readonly {
            return format!("<input type=\"hidden\" name=\"{name}\" value=\"{value}\" />");
        }

        let label = html_escape(&field.label);
        let mut out = format!("<div class=\"field field-{name}\">");
        if readonly || field.flags.readonly {
            out.push_str(&format!(
                "<label>{label}</label><span class=\"field-value\">{value}</span>"
            ));
        } else {
            out.push_str(&format!("<label for=\"{name}\">{label}</label>"));
            let required = if field.flags.required { " required" } else { "" };
            match field.input {
                InputType::Checkbox => {
                    let checked = if matches!(field.value_str(), "true" | "on" | "1") {
                        " checked"
                    } else {
                        ""
                    };
                    out.push_str(&format!(
                        "<input type=\"checkbox\" id=\"{name}\" name=\"{name}\" value=\"true\"{checked}{required} />"
                    ));
                }
                input => {
                    out.push_str(&format!(
                        "<input type=\"{input}\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{required} />"
                    ));
                }
            }
        }
        for message in errors {
            out.push_str(&format!(
                "<span class=\"field-error\">{}</span>",
                html_escape(message)
            ));
        }
        out.push_str("</div>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b href="x">&'</b>"#),
            "&lt;b href=&quot;x&quot;&gt;&amp;&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_field_renders_input_with_value() {
        let mut field = FormField::new("name", "Name", InputType::Text);
        field.value = Some("Alice".into());
        field.flags.required = true;

        let html = FormRenderer::field(&field, &[], false);
        assert!(html.contains(r#"<input type="text" id="name" name="name" value="Alice" required />"#));
        assert!(html.contains(r#"<label for="name">Name</label>"#));
    }

    #[test]
    fn test_field_escapes_value() {
        let mut field = FormField::new("name", "Name", InputType::Text);
        field.value = Some(r#""><script>"#.into());

        let html = FormRenderer::field(&field, &[], false);
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_readonly_field_renders_static_value() {
        let mut field = FormField::new("name", "Name", InputType::Text);
        field.value = Some("Alice".into());

        let html = FormRenderer::field(&field, &[], true);
        assert!(html.contains(r#"<span class="field-value">Alice</span>"#));
        assert!(!html.contains("<input"));
    }

    #[test]
    fn test_field_errors_rendered() {
        let field = FormField::new("name", "Name", InputType::Text);
        let html = FormRenderer::field(&field, &["required".to_string()], false);
        assert!(html.contains(r#"<span class="field-error">required</span>"#));
    }

    #[test]
    fn test_hidden_field_skips_label() {
        let mut field = FormField::new("token", "Token", InputType::Hidden);
        field.value = Some("abc".into());

        let html = FormRenderer::field(&field, &[], false);
        assert_eq!(html, r#"<input type="hidden" name="token" value="abc" />"#);
    }
}
