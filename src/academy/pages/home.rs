//! Landing page: hero, highlights and previews of five collections.

use super::courses::display_fee;
use super::single::StaticPage;
use super::testimonials::{fetch_published, TestimonialCard};
use super::{events, notices, Page, ViewContext};
use crate::api::DataAccess;
use crate::error::Result;
use crate::format::{format_date, format_time, truncate};
use crate::model::{
    collections, or_fallback, present, Course, Event, HomeContent, Notice, Record, Testimonial,
};
use crate::query::{Direction, Query};
use crate::render::templates;
use crate::store::DocumentStore;
use serde::Serialize;

pub const COURSES_SHOWN: usize = 6;
pub const NOTICES_SHOWN: usize = 5;
pub const EVENTS_SHOWN: usize = 3;
pub const TESTIMONIALS_SHOWN: usize = 4;

const DEFAULT_HIGHLIGHTS: [(&str, &str); 3] = [
    ("Expert Faculty", "Experienced teachers and industry professionals"),
    ("Modern Infrastructure", "State-of-the-art labs and digital classrooms"),
    ("Proven Results", "Consistent top ranks in board and competitive exams"),
];

#[derive(Debug, Serialize)]
pub struct HighlightView {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CoursePreview {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub summary: String,
    pub fee: String,
}

#[derive(Debug, Serialize)]
pub struct NoticePreview {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub important: bool,
    pub published: String,
}

#[derive(Debug, Serialize)]
pub struct EventPreview {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub date: String,
    pub time: String,
    pub venue: String,
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub highlights: Vec<HighlightView>,
    pub cta_text: String,
    pub courses: Vec<CoursePreview>,
    pub notices: Vec<NoticePreview>,
    pub events: Vec<EventPreview>,
    pub testimonials: Vec<TestimonialCard>,
}

impl HomeView {
    pub fn build(
        home: Option<&HomeContent>,
        courses: &[Record<Course>],
        notices: &[Record<Notice>],
        events: &[Record<Event>],
        testimonials: &[Record<Testimonial>],
        ctx: &ViewContext,
    ) -> Self {
        let home = home.cloned().unwrap_or_default();
        let highlights: Vec<HighlightView> = home
            .highlights
            .iter()
            .flatten()
            .filter(|h| present(&h.title).is_some())
            .map(|h| HighlightView {
                title: or_fallback(&h.title, ""),
                description: or_fallback(&h.description, ""),
            })
            .collect();
        let highlights = if highlights.is_empty() {
            DEFAULT_HIGHLIGHTS
                .iter()
                .map(|(title, description)| HighlightView {
                    title: title.to_string(),
                    description: description.to_string(),
                })
                .collect()
        } else {
            highlights
        };

        Self {
            hero_title: or_fallback(&home.hero_title, "Excellence in Education"),
            hero_subtitle: or_fallback(
                &home.hero_subtitle,
                "Combining traditional schooling with modern coaching techniques",
            ),
            highlights,
            cta_text: or_fallback(
                &home.cta_text,
                "Join thousands of successful students who started their journey with us.",
            ),
            courses: courses
                .iter()
                .take(COURSES_SHOWN)
                .map(|c| CoursePreview {
                    id: c.id.clone(),
                    name: or_fallback(&c.name, "Untitled course"),
                    category: or_fallback(&c.category, "General"),
                    image_url: present(&c.image_url).map(str::to_string),
                    summary: truncate(present(&c.description).unwrap_or_default(), 100),
                    fee: display_fee(c.fee.as_deref(), &ctx.config.currency_symbol)
                        .unwrap_or_else(|| "Contact".to_string()),
                })
                .collect(),
            notices: notices
                .iter()
                .take(NOTICES_SHOWN)
                .map(|n| NoticePreview {
                    id: n.id.clone(),
                    title: or_fallback(&n.title, "Untitled notice"),
                    summary: truncate(present(&n.content).unwrap_or_default(), 80),
                    important: n.important == Some(true),
                    published: format_date(n.publish_date.as_deref().unwrap_or_default()),
                })
                .collect(),
            events: events
                .iter()
                .take(EVENTS_SHOWN)
                .map(|e| EventPreview {
                    id: e.id.clone(),
                    title: or_fallback(&e.title, "Untitled event"),
                    summary: truncate(present(&e.description).unwrap_or_default(), 60),
                    date: format_date(e.date.as_deref().unwrap_or_default()),
                    time: present(&e.time)
                        .map(format_time)
                        .unwrap_or_else(|| "To be announced".to_string()),
                    venue: or_fallback(&e.venue, "Main Campus"),
                })
                .collect(),
            testimonials: testimonials
                .iter()
                .take(TESTIMONIALS_SHOWN)
                .map(TestimonialCard::from_record)
                .collect(),
        }
    }
}

pub type HomePage = StaticPage<HomeView>;

async fn fetch<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> Result<HomeView> {
    let courses = Query::new()
        .order_by("order", Direction::Asc)
        .limit(COURSES_SHOWN);
    let (home, courses, notices, events, testimonials) = tokio::join!(
        api.fetch_record::<HomeContent>(collections::PAGES, collections::HOME_ID),
        api.fetch_records::<Course>(collections::COURSES, &courses),
        notices::fetch_active(api, ctx.now, NOTICES_SHOWN),
        events::fetch_upcoming(api, ctx.now),
        fetch_published(api, Some(TESTIMONIALS_SHOWN)),
    );
    let home = home?;
    Ok(HomeView::build(
        home.as_ref().map(|r| &r.data),
        &courses?,
        &notices?,
        &events?,
        &testimonials?,
        ctx,
    ))
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> HomePage {
    let mut page = StaticPage::new(Page::Home, templates::PAGE_HOME);
    page.settle(fetch(api, ctx).await);
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::format::parse_date;
    use crate::pages::{PageController, PageState};
    use crate::render::SiteRenderer;
    use crate::store::memory::fixtures::{FailingStore, StoreFixture};
    use serde_json::json;

    fn ctx() -> ViewContext {
        ViewContext::at(SiteConfig::default(), parse_date("2026-06-15T00:00:00Z").unwrap())
    }

    fn store() -> StoreFixture {
        StoreFixture::new()
            .with_doc("pages", "home", json!({"heroTitle": "Learn with Us", "ctaText": "Enrol today."}))
            .with_doc("courses", "c1", json!({"name": "Physics", "fee": 45000, "order": 1}))
            .with_doc("courses", "c2", json!({"name": "Biology", "order": 2}))
            .with_doc("events", "old", json!({"title": "Old Fair", "date": "2026-01-10"}))
            .with_doc("events", "soon", json!({"title": "Science Expo", "date": "2026-07-01", "time": "14:30"}))
            .with_doc("events", "later", json!({"title": "Sports Day", "date": "2026-09-01", "venue": "Stadium"}))
            .with_doc("testimonials", "t1", json!({"name": "Asha", "content": "Great!", "date": "2026-05-01"}))
            .with_doc("testimonials", "t2", json!({"name": "Hidden", "content": "Wait", "status": "pending"}))
            .with_notices(7)
    }

    #[tokio::test]
    async fn previews_are_sliced_and_filtered() {
        let page = load(&DataAccess::new(store().store), &ctx()).await;
        assert_eq!(page.state(), PageState::Rendered);
        let view = page.view().unwrap();

        assert_eq!(view.hero_title, "Learn with Us");
        assert_eq!(
            view.hero_subtitle,
            "Combining traditional schooling with modern coaching techniques"
        );
        assert_eq!(view.cta_text, "Enrol today.");
        assert_eq!(view.highlights.len(), 3);
        assert_eq!(view.highlights[0].title, "Expert Faculty");

        assert_eq!(view.courses[0].fee, "₹45,000");
        assert_eq!(view.courses[1].fee, "Contact");
        assert_eq!(view.notices.len(), NOTICES_SHOWN);

        let events: Vec<_> = view.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(events, vec!["Science Expo", "Sports Day"]);
        assert_eq!(view.events[0].time, "2:30 PM");
        assert_eq!(view.events[0].venue, "Main Campus");
        assert_eq!(view.events[1].time, "To be announced");

        assert_eq!(view.testimonials.len(), 1);
        assert_eq!(view.testimonials[0].name, "Asha");
    }

    #[tokio::test]
    async fn empty_store_renders_every_section_placeholder() {
        let renderer = SiteRenderer::new().unwrap();
        let page = load(&DataAccess::new(StoreFixture::new().store), &ctx()).await;
        assert_eq!(page.state(), PageState::Rendered);
        let html = page.render_body(&renderer).unwrap();
        assert!(html.contains("Excellence in Education"));
        assert!(html.contains("Courses coming soon..."));
        assert!(html.contains("No notices at the moment."));
        assert!(html.contains("No upcoming events."));
        assert!(html.contains("Testimonials coming soon..."));
    }

    #[tokio::test]
    async fn any_failed_fetch_fails_the_page() {
        let renderer = SiteRenderer::new().unwrap();
        let page = load(&DataAccess::new(FailingStore), &ctx()).await;
        assert_eq!(page.state(), PageState::Failed);
        assert!(page.view().is_none());
        let html = page.render_body(&renderer).unwrap();
        assert!(html.contains(r#"data-state="failed""#));
    }

    #[tokio::test]
    async fn body_links_course_previews_to_the_catalogue() {
        let renderer = SiteRenderer::new().unwrap();
        let page = load(&DataAccess::new(store().store), &ctx()).await;
        let html = page.render_body(&renderer).unwrap();
        assert!(html.contains("courses.html#c1"));
        assert!(html.contains("Enrol today."));
    }
}
