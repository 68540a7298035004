use crate::config::SiteConfig;
use crate::error::Result;
use crate::model::collections;
use crate::site::Site;
use crate::store::fs::FileStore;
use crate::store::{DocumentStore, Fields};
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

pub type SiteContext = Site<FileStore>;

/// Opens the site stored under `data_dir`. A missing directory behaves like an empty
/// store with the default configuration.
pub fn initialize(data_dir: &Path) -> Result<SiteContext> {
    let config = SiteConfig::load(data_dir)?;
    Site::new(FileStore::new(data_dir), config)
}

fn starter_documents(config: &SiteConfig) -> Vec<(&'static str, &'static str, Value)> {
    vec![
        (
            collections::CONFIG,
            collections::SITE_SETTINGS_ID,
            json!({
                "siteName": config.site_name,
                "tagline": "Coaching for competitive exams and school boards",
                "phone": "",
                "contactEmail": "",
                "address": "",
                "socialLinks": {},
            }),
        ),
        (
            collections::PAGES,
            collections::HOME_ID,
            json!({
                "heroTitle": format!("Welcome to {}", config.site_name),
                "heroSubtitle": "Expert faculty, proven results.",
                "ctaText": "Enquire Now",
            }),
        ),
        (
            collections::PAGES,
            collections::ABOUT_ID,
            json!({ "title": format!("About {}", config.site_name) }),
        ),
        (
            collections::PAGES,
            collections::CONTACT_ID,
            json!({ "officeHours": "Mon-Sat: 9:00 AM - 6:00 PM" }),
        ),
    ]
}

/// Creates `data_dir` with a config file and the singleton page documents.
///
/// Existing files and documents are left alone. Returns how many documents were added.
pub async fn seed(data_dir: &Path) -> Result<usize> {
    tokio::fs::create_dir_all(data_dir).await?;
    let config = SiteConfig::load(data_dir)?;
    config.save(data_dir)?;

    let store = FileStore::new(data_dir);
    let mut added = 0;
    for (collection, id, value) in starter_documents(&config) {
        if store.get(collection, id).await?.is_some() {
            continue;
        }
        let fields: Fields = value.as_object().cloned().unwrap_or_default();
        store.put(collection, id, fields).await?;
        added += 1;
    }
    info!(dir = %data_dir.display(), added, "seeded site data");
    Ok(added)
}
