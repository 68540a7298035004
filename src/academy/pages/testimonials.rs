//! Published testimonials and the form for sending a new one.

use super::listing::{distinct, eq_ignore_case, title_case, Entity, FilterOption, ListPage, ListView};
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::error::Result;
use crate::forms::FormKind;
use crate::format::format_date;
use crate::model::{collections, or_fallback, present, Record, Testimonial};
use crate::query::{Direction, Query};
use crate::render::templates;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

impl Testimonial {
    /// Submissions wait for review before they are shown.
    pub fn is_published(&self) -> bool {
        !matches!(
            present(&self.status).map(str::to_ascii_lowercase).as_deref(),
            Some("pending" | "rejected")
        )
    }
}

/// Published testimonials, newest first.
pub async fn fetch_published<S: DocumentStore>(
    api: &DataAccess<S>,
    limit: Option<usize>,
) -> Result<Vec<Record<Testimonial>>> {
    let query = Query::new().order_by("date", Direction::Desc);
    let published = api
        .fetch_records::<Testimonial>(collections::TESTIMONIALS, &query)
        .await?
        .into_iter()
        .filter(|t| t.is_published());
    Ok(match limit {
        Some(n) => published.take(n).collect(),
        None => published.collect(),
    })
}

impl Entity for Testimonial {
    const COLLECTION: &'static str = collections::TESTIMONIALS;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.name.as_deref(),
            self.content.as_deref(),
            self.achievement.as_deref(),
        ]
    }

    fn matches_facet(&self, facet: &str, value: &str, _now: DateTime<Utc>) -> bool {
        match facet {
            "category" if value.eq_ignore_ascii_case("verified") => self.verified == Some(true),
            "category" => eq_ignore_case(self.role.as_deref(), value),
            _ => true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TestimonialCard {
    pub id: String,
    pub name: String,
    pub role: String,
    pub role_key: String,
    pub date: Option<String>,
    pub verified: bool,
    pub avatar_url: Option<String>,
    /// Five entries, true for a filled star.
    pub stars: Vec<bool>,
    pub rating: u8,
    pub content: String,
    pub achievement: Option<String>,
}

impl TestimonialCard {
    pub fn from_record(record: &Record<Testimonial>) -> Self {
        let t = &record.data;
        let rating = t.stars();
        Self {
            id: record.id.clone(),
            name: or_fallback(&t.name, "Anonymous"),
            role: or_fallback(&t.role, "Student"),
            role_key: or_fallback(&t.role, "student").to_lowercase(),
            date: present(&t.date).map(format_date),
            verified: t.verified == Some(true),
            avatar_url: present(&t.avatar_url).map(str::to_string),
            stars: (1..=5).map(|i| i <= rating).collect(),
            rating,
            content: or_fallback(&t.content, ""),
            achievement: present(&t.achievement).map(str::to_string),
        }
    }
}

impl ListView for Testimonial {
    type Card = TestimonialCard;

    const PAGE: Page = Page::Testimonials;
    const BODY_TEMPLATE: &'static str = templates::TESTIMONIALS_BODY;
    const CARDS_TEMPLATE: &'static str = templates::TESTIMONIALS_CARDS;
    const DETAIL_TEMPLATE: &'static str = templates::TESTIMONIALS_DETAIL;
    const EMPTY_MESSAGE: &'static str = "No testimonials yet. Be the first to share your experience!";
    const FORM: Option<FormKind> = Some(FormKind::Testimonial);

    fn card(record: &Record<Self>, _ctx: &ViewContext) -> TestimonialCard {
        TestimonialCard::from_record(record)
    }

    fn filter_options(records: &[Record<Self>]) -> Vec<FilterOption> {
        let mut options = vec![FilterOption::new("category", "verified", "Verified")];
        for role in distinct(records.iter().map(|r| r.role.as_deref())) {
            options.push(FilterOption::new("category", &role.to_lowercase(), title_case(&role)));
        }
        options
    }
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> ListPage<Testimonial> {
    let mut page = ListPage::new(ctx);
    page.settle(fetch_published(api, None).await, |listing| listing);
    page
}
