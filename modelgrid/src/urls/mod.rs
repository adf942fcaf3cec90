//! Admin URL construction
//!
//! Every link the admin layer emits goes through [`UrlBuilder`], so the
//! URL scheme lives in exactly one place: `<root>`, `<root>/{model}`,
//! `<root>/{model}/new`, `<root>/{model}/{id}` and
//! `<root>/{model}/{id}/{action}`.

use crate::model::ModelId;

/// Builds URLs under the configured admin root.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    root: String,
}

impl UrlBuilder {
    /// Create a builder for a root path such as `/admin`.
    /// A trailing slash is stripped.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        let mut root = root.into();
        while root.ends_with('/') {
            root.pop();
        }
        Self { root }
    }

    /// The admin index URL.
    #[must_use]
    pub fn root(&self) -> String {
        if self.root.is_empty() {
            "/".to_string()
        } else {
            self.root.clone()
        }
    }

    /// Collection URL for a model.
    #[must_use]
    pub fn collection(&self, model: &str) -> String {
        format!("{}/{model}", self.root)
    }

    /// Add-form URL for a model.
    #[must_use]
    pub fn new_form(&self, model: &str) -> String {
        format!("{}/{model}/new", self.root)
    }

    /// Item URL for one record.
    #[must_use]
    pub fn item(&self, model: &str, id: &ModelId) -> String {
        format!("{}/{model}/{id}", self.root)
    }

    /// Item action URL (`edit`, `delete`).
    #[must_use]
    pub fn item_action(&self, model: &str, id: impl std::fmt::Display, action: &str) -> String {
        format!("{}/{model}/{id}/{action}", self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_under_root() {
        let urls = UrlBuilder::new("/admin");
        assert_eq!(urls.root(), "/admin");
        assert_eq!(urls.collection("Contact"), "/admin/Contact");
        assert_eq!(urls.new_form("Contact"), "/admin/Contact/new");
        assert_eq!(urls.item("Contact", &ModelId::from(5)), "/admin/Contact/5");
        assert_eq!(
            urls.item_action("Contact", 5, "edit"),
            "/admin/Contact/5/edit"
        );
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let urls = UrlBuilder::new("/admin/");
        assert_eq!(urls.collection("Contact"), "/admin/Contact");
    }

    #[test]
    fn test_empty_root() {
        let urls = UrlBuilder::new("");
        assert_eq!(urls.root(), "/");
        assert_eq!(urls.collection("Contact"), "/Contact");
    }
}
