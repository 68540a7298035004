use super::listing::{distinct, eq_ignore_case, title_case, Entity, FilterOption, ListPage, ListView};
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::format::{format_currency, sanitize_html, truncate};
use crate::model::{collections, or_fallback, present, Course, Record};
use crate::query::{Direction, Query};
use crate::render::templates;
use crate::render::theme::category_accent;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

const SUMMARY_CHARS: usize = 120;

impl Entity for Course {
    const COLLECTION: &'static str = collections::COURSES;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.name.as_deref(),
            self.description.as_deref(),
            self.category.as_deref(),
        ]
    }

    fn matches_facet(&self, facet: &str, value: &str, _now: DateTime<Utc>) -> bool {
        match facet {
            "category" => eq_ignore_case(self.category.as_deref(), value),
            _ => true,
        }
    }
}

/// Course fee for display: numeric fees get the currency symbol and grouping.
pub fn display_fee(fee: Option<&str>, symbol: &str) -> Option<String> {
    let fee = fee.map(str::trim).filter(|f| !f.is_empty())?;
    Some(format_currency(fee, symbol))
}

#[derive(Debug, Serialize)]
pub struct CourseCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub category_key: String,
    pub accent: &'static str,
    pub featured: bool,
    pub image_url: Option<String>,
    pub summary: String,
    pub description_html: String,
    pub duration: Option<String>,
    pub fee: Option<String>,
    pub syllabus_url: Option<String>,
}

impl ListView for Course {
    type Card = CourseCard;

    const PAGE: Page = Page::Courses;
    const BODY_TEMPLATE: &'static str = templates::COURSES_BODY;
    const CARDS_TEMPLATE: &'static str = templates::COURSES_CARDS;
    const DETAIL_TEMPLATE: &'static str = templates::COURSES_DETAIL;
    const EMPTY_MESSAGE: &'static str = "No courses are listed yet.";

    fn card(record: &Record<Self>, ctx: &ViewContext) -> CourseCard {
        let course = &record.data;
        let description = present(&course.description);
        CourseCard {
            id: record.id.clone(),
            name: or_fallback(&course.name, "Untitled course"),
            category: or_fallback(&course.category, "General"),
            category_key: or_fallback(&course.category, "general").to_lowercase(),
            accent: category_accent(course.category.as_deref()),
            featured: course.featured == Some(true),
            image_url: present(&course.image_url).map(str::to_string),
            summary: description
                .map(|d| truncate(d, SUMMARY_CHARS))
                .unwrap_or_else(|| "No description available.".to_string()),
            description_html: description
                .map(sanitize_html)
                .unwrap_or_else(|| "No description available.".to_string()),
            duration: present(&course.duration).map(str::to_string),
            fee: display_fee(course.fee.as_deref(), &ctx.config.currency_symbol),
            syllabus_url: present(&course.syllabus_url).map(str::to_string),
        }
    }

    fn filter_options(records: &[Record<Self>]) -> Vec<FilterOption> {
        distinct(records.iter().map(|r| r.category.as_deref()))
            .into_iter()
            .map(|c| FilterOption::new("category", &c.to_lowercase(), title_case(&c)))
            .collect()
    }
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> ListPage<Course> {
    let mut page = ListPage::new(ctx);
    let query = Query::new().order_by("order", Direction::Asc);
    page.settle(
        api.fetch_records(collections::COURSES, &query).await,
        |listing| listing,
    );
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::{PageController, UiEvent, Update};
    use crate::render::SiteRenderer;
    use crate::store::memory::fixtures::StoreFixture;
    use serde_json::json;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_doc("courses", "neet", json!({"name": "NEET Foundation", "category": "Medical", "order": 2, "fee": 45000}))
            .with_doc("courses", "jee", json!({"name": "JEE Advanced", "category": "Engineering", "order": 1, "featured": true}))
            .with_doc("courses", "misc", json!({"name": "Spoken English"}))
    }

    #[tokio::test]
    async fn sorted_by_order_with_unordered_last() {
        let ctx = ViewContext::new(SiteConfig::default());
        let page = load(&DataAccess::new(fixture().store), &ctx).await;
        let ids: Vec<_> = page.listing().visible().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["jee", "neet", "misc"]);
    }

    #[tokio::test]
    async fn category_filter_and_search_compose() {
        let ctx = ViewContext::new(SiteConfig::default());
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&DataAccess::new(fixture().store), &ctx).await;

        page.handle(UiEvent::Search("e".into()), &renderer).unwrap();
        assert_eq!(page.listing().visible_len(), 3);

        let update = page
            .handle(
                UiEvent::Filter {
                    facet: "category".into(),
                    value: "medical".into(),
                },
                &renderer,
            )
            .unwrap();
        let Some(Update::Container(html)) = update else {
            panic!("expected container");
        };
        assert!(html.contains("NEET Foundation"));
        assert!(!html.contains("JEE Advanced"));
    }

    #[tokio::test]
    async fn card_formats_fee_and_falls_back() {
        let ctx = ViewContext::new(SiteConfig::default());
        let page = load(&DataAccess::new(fixture().store), &ctx).await;
        let neet = Course::card(page.listing().find("neet").unwrap(), &ctx);
        assert_eq!(neet.fee.as_deref(), Some("₹45,000"));

        let misc = Course::card(page.listing().find("misc").unwrap(), &ctx);
        assert_eq!(misc.category, "General");
        assert_eq!(misc.summary, "No description available.");
        assert!(misc.fee.is_none());
    }

    #[test]
    fn non_numeric_fee_is_kept() {
        assert_eq!(
            display_fee(Some("On request"), "₹").as_deref(),
            Some("On request")
        );
        assert_eq!(display_fee(Some("  "), "₹"), None);
    }
}
