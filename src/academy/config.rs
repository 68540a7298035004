use crate::error::{AcademyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Site configuration, stored in `<data dir>/config.json`.
///
/// Every key has a default, so a partial or missing file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    /// Name shown in the navbar and page titles when the store has no site settings.
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Notices revealed per "load more" step.
    #[serde(default = "default_notices_batch_size")]
    pub notices_batch_size: usize,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Seconds before a successful admission enquiry redirects to the confirmation page.
    #[serde(default = "default_redirect_delay_secs")]
    pub redirect_delay_secs: u64,

    #[serde(default = "default_confirmation_page")]
    pub confirmation_page: String,

    /// Prefix used to build absolute page URLs for submission payloads.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_site_name() -> String {
    "Virtual Academy".to_string()
}

fn default_notices_batch_size() -> usize {
    10
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_redirect_delay_secs() -> u64 {
    5
}

fn default_confirmation_page() -> String {
    "thank-you.html".to_string()
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            notices_batch_size: default_notices_batch_size(),
            currency_symbol: default_currency_symbol(),
            redirect_delay_secs: default_redirect_delay_secs(),
            confirmation_page: default_confirmation_page(),
            base_url: default_base_url(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl SiteConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let config_path = data_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SiteConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, data_dir: P) -> Result<()> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(data_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.notices_batch_size == 0 {
            return Err(AcademyError::Config(
                "notices_batch_size must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Absolute URL of a site page, as recorded in submission payloads.
    pub fn page_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.notices_batch_size, 10);
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.redirect_delay_secs, 5);
        assert_eq!(config.confirmation_page, "thank-you.html");
    }

    #[test]
    fn load_missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SiteConfig::load(dir.path()).unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"site_name": "Bright Minds", "notices_batch_size": 4}"#,
        )
        .unwrap();

        let config = SiteConfig::load(dir.path()).unwrap();
        assert_eq!(config.site_name, "Bright Minds");
        assert_eq!(config.notices_batch_size, 4);
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn save_and_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("site-data");
        let config = SiteConfig {
            base_url: "https://academy.example".into(),
            ..SiteConfig::default()
        };
        config.save(&nested).unwrap();
        assert_eq!(SiteConfig::load(&nested).unwrap(), config);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), r#"{"notices_batch_size": 0}"#).unwrap();
        assert!(matches!(
            SiteConfig::load(dir.path()),
            Err(AcademyError::Config(_))
        ));
    }

    #[test]
    fn page_url_joins_without_double_slash() {
        let config = SiteConfig {
            base_url: "https://academy.example/".into(),
            ..SiteConfig::default()
        };
        assert_eq!(
            config.page_url("contact.html"),
            "https://academy.example/contact.html"
        );
    }
}
