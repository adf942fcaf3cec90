//! Translation seam for user-facing labels
//!
//! The admin layer never hardcodes chrome strings into markup; every
//! label ("root", "edit", "delete", "save", ...) passes through the
//! state's translator. The default translator is the identity function.

use std::sync::Arc;

/// Translation callback applied to chrome labels before rendering.
pub type Translator = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The default translator: returns the label unchanged.
#[must_use]
pub fn identity() -> Translator {
    Arc::new(|label: &str| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_translator() {
        let t = identity();
        assert_eq!(t("edit"), "edit");
    }

    #[test]
    fn test_custom_translator() {
        let t: Translator = Arc::new(|label| match label {
            "edit" => "bearbeiten".to_string(),
            other => other.to_string(),
        });
        assert_eq!(t("edit"), "bearbeiten");
        assert_eq!(t("delete"), "delete");
    }
}
