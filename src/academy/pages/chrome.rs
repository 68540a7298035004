//! Navbar and footer shared by every page.

use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::error::Result;
use crate::model::{collections, present, SiteSettings, SocialLinks};
use crate::render::{templates, SiteRenderer};
use crate::store::DocumentStore;
use chrono::Datelike;
use serde::Serialize;

/// Pages listed under "Quick Links" in the footer.
const FOOTER_LINKS: [Page; 6] = [
    Page::Home,
    Page::About,
    Page::Courses,
    Page::Faculty,
    Page::Admissions,
    Page::Contact,
];

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: String,
}

#[derive(Debug, Serialize)]
struct NavbarView<'a> {
    site_name: &'a str,
    links: Vec<NavLink>,
}

#[derive(Debug, Serialize)]
struct FooterView<'a> {
    site_name: &'a str,
    tagline: Option<&'a str>,
    socials: Vec<SocialLink>,
    links: Vec<NavLink>,
    address: Option<&'a str>,
    phone: Option<&'a str>,
    phone_href: Option<String>,
    email: Option<&'a str>,
    year: i32,
}

/// Site-wide settings resolved for the navbar and footer.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub site_name: String,
    settings: SiteSettings,
    year: i32,
}

impl Chrome {
    pub fn new(settings: Option<SiteSettings>, ctx: &ViewContext) -> Self {
        let settings = settings.unwrap_or_default();
        Self {
            site_name: present(&settings.site_name)
                .unwrap_or(&ctx.config.site_name)
                .to_string(),
            settings,
            year: ctx.now.year(),
        }
    }

    pub fn navbar(&self, renderer: &SiteRenderer, active: Page) -> Result<String> {
        let links = Page::ALL
            .into_iter()
            .filter(|p| p.in_nav())
            .map(|p| link(p, p == active))
            .collect();
        renderer.render(
            templates::NAVBAR,
            &NavbarView {
                site_name: &self.site_name,
                links,
            },
        )
    }

    pub fn footer(&self, renderer: &SiteRenderer) -> Result<String> {
        let s = &self.settings;
        let phone = present(&s.phone);
        renderer.render(
            templates::FOOTER,
            &FooterView {
                site_name: &self.site_name,
                tagline: present(&s.tagline),
                socials: social_links(s.social_links.as_ref()),
                links: FOOTER_LINKS.into_iter().map(|p| link(p, false)).collect(),
                address: present(&s.address),
                phone,
                phone_href: phone.map(|p| p.chars().filter(|c| !c.is_whitespace()).collect()),
                email: present(&s.contact_email),
                year: self.year,
            },
        )
    }
}

fn link(page: Page, active: bool) -> NavLink {
    NavLink {
        href: page.file_name(),
        label: page.title(),
        active,
    }
}

/// Every network is listed; a missing link points at `#`.
fn social_links(links: Option<&SocialLinks>) -> Vec<SocialLink> {
    let get = |pick: fn(&SocialLinks) -> &Option<String>| {
        links
            .and_then(|l| present(pick(l)))
            .unwrap_or("#")
            .to_string()
    };
    vec![
        SocialLink {
            label: "Facebook",
            href: get(|l| &l.facebook),
        },
        SocialLink {
            label: "Twitter",
            href: get(|l| &l.twitter),
        },
        SocialLink {
            label: "Instagram",
            href: get(|l| &l.instagram),
        },
        SocialLink {
            label: "YouTube",
            href: get(|l| &l.youtube),
        },
    ]
}

/// Reads the site settings document. Chrome never fails a page: a missing or
/// unreadable document falls back to the configured site name.
pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> Chrome {
    let settings = api
        .get_record::<SiteSettings>(collections::CONFIG, collections::SITE_SETTINGS_ID)
        .await
        .map(|r| r.data);
    Chrome::new(settings, ctx)
}
