//! Contact details and the contact form.
//!
//! The form works even when the details can't be loaded, so fetch failures here fall
//! back to the site name and a map search link instead of failing the page.

use super::single::StaticPage;
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::error::Result;
use crate::forms::FormKind;
use crate::format::format_phone_number;
use crate::model::{collections, present, ContactContent, Record, SiteSettings};
use crate::render::templates;
use crate::store::DocumentStore;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct ContactView {
    pub site_name: String,
    pub phone: Option<String>,
    /// Digits and `+` only, for the `tel:` link.
    pub phone_href: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub office_hours: Vec<String>,
    pub map_url: String,
}

impl ContactView {
    pub fn build(
        contact: Option<&ContactContent>,
        settings: Option<&SiteSettings>,
        ctx: &ViewContext,
    ) -> Self {
        let site_name = settings
            .and_then(|s| present(&s.site_name))
            .unwrap_or(&ctx.config.site_name)
            .to_string();
        let phone = settings.and_then(|s| present(&s.phone));
        let address = settings.and_then(|s| present(&s.address));
        let map_url = contact
            .and_then(|c| present(&c.map_url))
            .map(str::to_string)
            .unwrap_or_else(|| map_search_url(address.unwrap_or(&site_name)));

        Self {
            phone: phone.map(format_phone_number),
            phone_href: phone.map(|p| {
                p.chars()
                    .filter(|c| c.is_ascii_digit() || *c == '+')
                    .collect()
            }),
            email: settings
                .and_then(|s| present(&s.contact_email))
                .map(str::to_string),
            address: address.map(str::to_string),
            office_hours: contact
                .and_then(|c| present(&c.office_hours))
                .map(|hours| {
                    hours
                        .lines()
                        .map(str::trim)
                        .filter(|l| !l.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            map_url,
            site_name,
        }
    }
}

fn map_search_url(place: &str) -> String {
    let query: Vec<&str> = place.split_whitespace().collect();
    format!("https://maps.google.com/?q={}", query.join("+"))
}

pub type ContactPage = StaticPage<ContactView>;

fn settled<T>(loaded: Result<Option<Record<T>>>, what: &str) -> Option<T> {
    match loaded {
        Ok(record) => record.map(|r| r.data),
        Err(e) => {
            warn!(error = %e, "failed to load {what}");
            None
        }
    }
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> ContactPage {
    let (contact, settings) = tokio::join!(
        api.fetch_record::<ContactContent>(collections::PAGES, collections::CONTACT_ID),
        api.fetch_record::<SiteSettings>(collections::CONFIG, collections::SITE_SETTINGS_ID),
    );
    let contact = settled(contact, "contact details");
    let settings = settled(settings, "site settings");

    let mut page =
        StaticPage::new(Page::Contact, templates::PAGE_CONTACT).with_form(FormKind::Contact);
    page.settle(Ok(ContactView::build(
        contact.as_ref(),
        settings.as_ref(),
        ctx,
    )));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::{PageController, PageState};
    use crate::render::SiteRenderer;
    use crate::store::memory::fixtures::{FailingStore, StoreFixture};
    use serde_json::json;

    #[tokio::test]
    async fn details_come_from_both_documents() {
        let store = StoreFixture::new()
            .with_doc("pages", "contact", json!({"officeHours": "Mon-Fri: 9am-6pm\n\nSat: 9am-1pm\n"}))
            .with_doc("config", "siteSettings", json!({
                "siteName": "Bright Minds",
                "phone": "+91 98765 43210",
                "contactEmail": "info@brightminds.example",
                "address": "12 MG Road, Bangalore"
            }));
        let ctx = ViewContext::new(SiteConfig::default());
        let page = load(&DataAccess::new(store.store), &ctx).await;
        let view = page.view().unwrap();

        assert_eq!(view.office_hours, vec!["Mon-Fri: 9am-6pm", "Sat: 9am-1pm"]);
        assert_eq!(view.phone.as_deref(), Some("+91 98765 43210"));
        assert_eq!(view.phone_href.as_deref(), Some("+919876543210"));
        assert_eq!(view.site_name, "Bright Minds");
        assert_eq!(
            view.map_url,
            "https://maps.google.com/?q=12+MG+Road,+Bangalore"
        );
    }

    #[tokio::test]
    async fn store_failure_still_renders_the_form() {
        let renderer = SiteRenderer::new().unwrap();
        let ctx = ViewContext::new(SiteConfig::default());
        let page = load(&DataAccess::new(FailingStore), &ctx).await;
        assert_eq!(page.state(), PageState::Rendered);

        let view = page.view().unwrap();
        assert_eq!(view.site_name, "Virtual Academy");
        assert!(view.office_hours.is_empty());
        assert_eq!(view.map_url, "https://maps.google.com/?q=Virtual+Academy");

        let html = page.render_body(&renderer).unwrap();
        assert!(html.contains(r#"data-form="contact""#));
    }

    #[test]
    fn ten_digit_numbers_are_grouped() {
        let settings = SiteSettings {
            phone: Some("9876543210".into()),
            ..SiteSettings::default()
        };
        let ctx = ViewContext::new(SiteConfig::default());
        let view = ContactView::build(None, Some(&settings), &ctx);
        assert_eq!(view.phone.as_deref(), Some("987-654-3210"));
    }
}
