//! Page templates
//!
//! Askama structs for the full-page HTML representations. Grids, forms
//! and pagers are prerendered to strings by their own modules and
//! embedded with the `safe` filter; the templates only own the chrome
//! (title, breadcrumb, headings).

use askama::Template;

/// One breadcrumb entry.
///
/// `kind` doubles as the CSS class (`root_url`, `model_url`,
/// `instance_url`), matching what grid styling hooks onto.
#[derive(Debug, Clone)]
pub struct Crumb {
    /// Link target
    pub url: String,
    /// Link text
    pub label: String,
    /// Crumb kind and CSS class
    pub kind: &'static str,
}

impl Crumb {
    /// Create a crumb.
    #[must_use]
    pub fn new(url: impl Into<String>, label: impl Into<String>, kind: &'static str) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
            kind,
        }
    }
}

/// Link to a registered model's collection.
#[derive(Debug, Clone)]
pub struct ModelLink {
    /// Model name
    pub name: String,
    /// Collection URL
    pub url: String,
}

/// Models index page.
#[derive(Template)]
#[template(path = "models.html")]
pub struct ModelsPage {
    /// Site title for the chrome
    pub site_title: String,
    /// Breadcrumb trail
    pub crumbs: Vec<Crumb>,
    /// Registered models
    pub models: Vec<ModelLink>,
}

/// Listing page: prerendered grid plus pager.
#[derive(Template)]
#[template(path = "listing.html")]
pub struct ListingPage {
    /// Site title for the chrome
    pub site_title: String,
    /// Breadcrumb trail
    pub crumbs: Vec<Crumb>,
    /// Model being listed
    pub model_name: String,
    /// URL of the add form
    pub new_url: String,
    /// Label of the add link
    pub new_label: String,
    /// Prerendered grid table
    pub grid: String,
    /// Prerendered pager links
    pub pager: String,
}

/// Form page for show, new and edit.
#[derive(Template)]
#[template(path = "form.html")]
pub struct FormPage {
    /// Site title for the chrome
    pub site_title: String,
    /// Breadcrumb trail
    pub crumbs: Vec<Crumb>,
    /// Page heading
    pub heading: String,
    /// Where the form submits to
    pub action_url: String,
    /// Submit button label
    pub submit_label: String,
    /// Read-only pages render values without a form element
    pub readonly: bool,
    /// Prerendered field set
    pub form: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_page_renders_chrome_and_grid() {
        let page = ListingPage {
            site_title: "Admin".into(),
            crumbs: vec![
                Crumb::new("/admin", "root", "root_url"),
                Crumb::new("/admin/Contact", "Contact", "model_url"),
            ],
            model_name: "Contact".into(),
            new_url: "/admin/Contact/new".into(),
            new_label: "new".into(),
            grid: "<table class=\"modelgrid-grid\"></table>".into(),
            pager: String::new(),
        };
        let html = page.render().unwrap();
        assert!(html.contains("<title>Admin</title>"));
        assert!(html.contains(r#"<a class="model_url" href="/admin/Contact">Contact</a>"#));
        assert!(html.contains("<table class=\"modelgrid-grid\"></table>"));
    }

    #[test]
    fn test_form_page_readonly_has_no_form_element() {
        let page = FormPage {
            site_title: "Admin".into(),
            crumbs: vec![Crumb::new("/admin", "root", "root_url")],
            heading: "show Contact".into(),
            action_url: "/admin/Contact/1".into(),
            submit_label: "save".into(),
            readonly: true,
            form: "<fieldset class=\"modelgrid-form\">\n</fieldset>".into(),
        };
        let html = page.render().unwrap();
        assert!(!html.contains("<form action="));
        assert!(html.contains("modelgrid-form"));
    }

    #[test]
    fn test_form_page_editable_submits_to_action() {
        let page = FormPage {
            site_title: "Admin".into(),
            crumbs: vec![Crumb::new("/admin", "root", "root_url")],
            heading: "edit Contact".into(),
            action_url: "/admin/Contact/1".into(),
            submit_label: "save".into(),
            readonly: false,
            form: String::new(),
        };
        let html = page.render().unwrap();
        assert!(html.contains(r#"<form action="/admin/Contact/1" method="post""#));
        assert!(html.contains(r#"<input type="submit" value="save" />"#));
    }
}
