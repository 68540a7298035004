use super::single::StaticPage;
use super::{events, notices, Page, ViewContext};
use crate::api::DataAccess;
use crate::error::Result;
use crate::format::sanitize_html;
use crate::model::{collections, or_fallback, present, AboutContent, Course, FacultyMember};
use crate::query::Query;
use crate::render::templates;
use crate::store::DocumentStore;
use serde::Serialize;
use tracing::warn;

const DEFAULT_MISSION: &str = "To provide quality education that empowers students to achieve their full potential and become responsible global citizens.";
const DEFAULT_VISION: &str = "To be a premier educational institution recognized for excellence in holistic education and innovation.";

const DEFAULT_VALUES: [(&str, &str); 6] = [
    ("Excellence", "Striving for the highest standards in education and student development"),
    ("Integrity", "Upholding ethical standards and honesty in all our actions"),
    ("Innovation", "Embracing new teaching methodologies and technologies"),
    ("Inclusivity", "Providing equal opportunities for all students"),
    ("Collaboration", "Working together with parents and community"),
    ("Respect", "Valuing diversity and individual differences"),
];

#[derive(Debug, Serialize)]
pub struct ValueView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub courses: usize,
    pub faculty: usize,
    pub notices: usize,
    pub events: usize,
}

#[derive(Debug, Serialize)]
pub struct AboutView {
    /// False when the store has no about document; the page shows a holding message.
    pub has_content: bool,
    pub title: String,
    pub mission: String,
    pub vision: String,
    /// Sanitized rich text, or `None` for the built-in introduction.
    pub content_html: Option<String>,
    pub history: Option<String>,
    pub image_url: Option<String>,
    pub values: Vec<ValueView>,
    pub stats: Option<Stats>,
}

impl AboutView {
    pub fn build(about: Option<&AboutContent>, stats: Option<Stats>, site_name: &str) -> Self {
        let Some(about) = about else {
            return Self {
                has_content: false,
                title: site_name.to_string(),
                mission: DEFAULT_MISSION.to_string(),
                vision: DEFAULT_VISION.to_string(),
                content_html: None,
                history: None,
                image_url: None,
                values: Vec::new(),
                stats,
            };
        };

        let values: Vec<ValueView> = match about.values.as_deref() {
            Some(values) if !values.is_empty() => values
                .iter()
                .enumerate()
                .map(|(i, v)| ValueView {
                    title: or_fallback(&v.title, &format!("Value {}", i + 1)),
                    description: or_fallback(&v.description, ""),
                })
                .collect(),
            _ => DEFAULT_VALUES
                .iter()
                .map(|(title, description)| ValueView {
                    title: title.to_string(),
                    description: description.to_string(),
                })
                .collect(),
        };

        Self {
            has_content: true,
            title: or_fallback(&about.title, site_name),
            mission: or_fallback(&about.mission, DEFAULT_MISSION),
            vision: or_fallback(&about.vision, DEFAULT_VISION),
            content_html: present(&about.content).map(sanitize_html),
            history: present(&about.history).map(str::to_string),
            image_url: present(&about.image_url).map(str::to_string),
            values,
            stats,
        }
    }
}

pub type AboutPage = StaticPage<AboutView>;

async fn count_stats<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> Result<Stats> {
    let everything = Query::new();
    let (courses, faculty, notices, events) = tokio::join!(
        api.fetch_records::<Course>(collections::COURSES, &everything),
        api.fetch_records::<FacultyMember>(collections::FACULTY, &everything),
        notices::fetch_active(api, ctx.now, notices::FETCH_LIMIT),
        events::fetch_upcoming(api, ctx.now),
    );
    Ok(Stats {
        courses: courses?.len(),
        faculty: faculty?.len(),
        notices: notices?.len(),
        events: events?.len(),
    })
}

async fn fetch<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> Result<AboutView> {
    let (about, stats) = tokio::join!(
        api.fetch_record::<AboutContent>(collections::PAGES, collections::ABOUT_ID),
        count_stats(api, ctx),
    );
    // Counters are decoration; the page still renders without them.
    let stats = stats
        .map_err(|e| warn!(error = %e, "failed to count site stats"))
        .ok();
    Ok(AboutView::build(
        about?.as_ref().map(|r| &r.data),
        stats,
        &ctx.config.site_name,
    ))
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> AboutPage {
    let mut page = StaticPage::new(Page::About, templates::PAGE_ABOUT);
    page.settle(fetch(api, ctx).await);
    page
}
