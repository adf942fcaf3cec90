//! Configuration for the admin layer
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `MODELGRID_` prefix)
//! 2. `./modelgrid.toml` (development)
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # modelgrid.toml
//! root_path = "/admin"
//! page_size = 25
//! site_title = "Back office"
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Admin layer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Path prefix the admin router is mounted under. Also the base for
    /// every generated URL, so it must match the `nest` call.
    pub root_path: String,

    /// Maximum number of rows per listing page
    pub page_size: u64,

    /// Title rendered in the page chrome
    pub site_title: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            root_path: "/admin".to_string(),
            page_size: 20,
            site_title: "Admin".to_string(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from defaults, `./modelgrid.toml` and
    /// `MODELGRID_`-prefixed environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] when a source contains a value that
    /// does not deserialize into the settings struct.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("modelgrid.toml"))
            .merge(Env::prefixed("MODELGRID_"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::default();
        assert_eq!(config.root_path, "/admin");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.site_title, "Admin");
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config: AdminConfig = Figment::from(Serialized::defaults(AdminConfig::default()))
            .merge(Toml::string("root_path = \"/backoffice\"\npage_size = 5"))
            .extract()
            .unwrap();
        assert_eq!(config.root_path, "/backoffice");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.site_title, "Admin");
    }
}
