//! Notice board: active notices, newest first, revealed a batch at a time.

use super::listing::{distinct, eq_ignore_case, title_case, Entity, FilterOption, ListPage, ListView};
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::error::Result;
use crate::format::{file_icon, format_date, parse_date, relative_time, sanitize_html};
use crate::model::{collections, or_fallback, present, Notice, Record};
use crate::query::{Direction, Query};
use crate::render::templates;
use crate::render::theme::category_accent;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Most notices the board loads.
pub const FETCH_LIMIT: usize = 100;

impl Notice {
    /// A notice is active until its expiry date passes. No expiry means always active.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.expiry_date.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(expiry) => match parse_date(expiry) {
                // Date-only expiries last through the end of that day.
                Some(at) if expiry.len() == 10 => at + chrono::Duration::days(1) > now,
                Some(at) => at >= now,
                None => true,
            },
        }
    }
}

/// Active notices, newest first, at most `limit`.
pub async fn fetch_active<S: DocumentStore>(
    api: &DataAccess<S>,
    now: DateTime<Utc>,
    limit: usize,
) -> Result<Vec<Record<Notice>>> {
    let query = Query::new().order_by("publishDate", Direction::Desc);
    let notices = api.fetch_records::<Notice>(collections::NOTICES, &query).await?;
    Ok(notices
        .into_iter()
        .filter(|n| n.is_active(now))
        .take(limit)
        .collect())
}

impl Entity for Notice {
    const COLLECTION: &'static str = collections::NOTICES;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.title.as_deref(),
            self.content.as_deref(),
            self.category.as_deref(),
        ]
    }

    fn matches_facet(&self, facet: &str, value: &str, _now: DateTime<Utc>) -> bool {
        match facet {
            "category" if value.eq_ignore_ascii_case("important") => self.important == Some(true),
            "category" => eq_ignore_case(self.category.as_deref(), value),
            _ => true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Attachment {
    pub url: String,
    pub name: String,
    pub icon: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NoticeCard {
    pub id: String,
    pub title: String,
    pub category: String,
    pub category_key: String,
    pub accent: &'static str,
    pub important: bool,
    pub published: String,
    pub published_ago: String,
    pub valid_until: Option<String>,
    /// Sanitized rich text; empty when the notice has no content.
    pub content_html: String,
    pub attachment: Option<Attachment>,
}

impl ListView for Notice {
    type Card = NoticeCard;

    const PAGE: Page = Page::Notices;
    const BODY_TEMPLATE: &'static str = templates::NOTICES_BODY;
    const CARDS_TEMPLATE: &'static str = templates::NOTICES_CARDS;
    const DETAIL_TEMPLATE: &'static str = templates::NOTICES_DETAIL;
    const EMPTY_MESSAGE: &'static str = "No notices at the moment. Please check back later.";

    fn card(record: &Record<Self>, ctx: &ViewContext) -> NoticeCard {
        let notice = &record.data;
        let important = notice.important == Some(true);
        let published = notice.publish_date.as_deref().unwrap_or_default();
        NoticeCard {
            id: record.id.clone(),
            title: or_fallback(&notice.title, "Untitled notice"),
            category: or_fallback(&notice.category, "General"),
            category_key: or_fallback(&notice.category, "general").to_lowercase(),
            accent: if important {
                "accent_red"
            } else {
                category_accent(notice.category.as_deref())
            },
            important,
            published: format_date(published),
            published_ago: relative_time(published, ctx.now),
            valid_until: present(&notice.expiry_date).map(format_date),
            content_html: present(&notice.content)
                .map(sanitize_html)
                .unwrap_or_default(),
            attachment: present(&notice.attachment_url).map(|url| {
                let name = present(&notice.attachment_name)
                    .or_else(|| url.rsplit('/').next())
                    .unwrap_or(url)
                    .to_string();
                Attachment {
                    icon: file_icon(&name),
                    url: url.to_string(),
                    name,
                }
            }),
        }
    }

    fn filter_options(records: &[Record<Self>]) -> Vec<FilterOption> {
        let mut options = vec![FilterOption::new("category", "important", "Important")];
        for category in distinct(records.iter().map(|r| r.category.as_deref())) {
            if !category.eq_ignore_ascii_case("important") {
                options.push(FilterOption::new("category", &category.to_lowercase(), title_case(&category)));
            }
        }
        options
    }
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> ListPage<Notice> {
    let mut page = ListPage::new(ctx);
    let batch = ctx.config.notices_batch_size;
    page.settle(fetch_active(api, ctx.now, FETCH_LIMIT).await, |listing| {
        listing.paginated(batch)
    });
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::{PageController, PageState, UiEvent, Update};
    use crate::render::SiteRenderer;
    use crate::store::memory::fixtures::{FailingStore, StoreFixture};
    use serde_json::json;

    fn ctx() -> ViewContext {
        ViewContext::at(SiteConfig::default(), parse_date("2026-10-18T09:00:00Z").unwrap())
    }

    fn count_cards(html: &str) -> usize {
        html.matches(r#"class="notice-card"#).count()
    }

    #[tokio::test]
    async fn fifteen_notices_load_ten_then_all() {
        let api = DataAccess::new(StoreFixture::new().with_notices(15).store);
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&api, &ctx()).await;

        assert_eq!(page.state(), PageState::Rendered);
        let html = page.render_container(&renderer).unwrap();
        assert_eq!(count_cards(&html), 10);
        assert!(html.contains(r#"data-action="load-more""#));

        let update = page.handle(UiEvent::LoadMore, &renderer).unwrap();
        let Some(Update::Container(html)) = update else {
            panic!("expected a container update");
        };
        assert_eq!(count_cards(&html), 15);
        assert!(!html.contains(r#"data-action="load-more""#));

        assert_eq!(page.handle(UiEvent::LoadMore, &renderer).unwrap(), None);
    }

    #[tokio::test]
    async fn expired_notices_are_not_loaded() {
        let store = StoreFixture::new()
            .with_doc("notices", "old", json!({"title": "Old", "publishDate": "2026-01-01", "expiryDate": "2026-02-01"}))
            .with_doc("notices", "today", json!({"title": "Today", "publishDate": "2026-10-01", "expiryDate": "2026-10-18"}))
            .with_doc("notices", "open", json!({"title": "Open", "publishDate": "2026-09-01"}))
            .store;
        let active = fetch_active(&DataAccess::new(store), ctx().now, FETCH_LIMIT)
            .await
            .unwrap();
        let ids: Vec<_> = active.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "open"]);
    }

    #[tokio::test]
    async fn important_facet_uses_the_flag() {
        let store = StoreFixture::new()
            .with_doc("notices", "a", json!({"title": "Fee deadline", "important": true, "category": "finance"}))
            .with_doc("notices", "b", json!({"title": "Sports day", "category": "important"}))
            .store;
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&DataAccess::new(store), &ctx()).await;
        page.handle(
            UiEvent::Filter {
                facet: "category".into(),
                value: "important".into(),
            },
            &renderer,
        )
        .unwrap();
        let ids: Vec<_> = page.listing().visible().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[tokio::test]
    async fn missing_fields_render_fallbacks() {
        let store = StoreFixture::new()
            .with_doc("notices", "bare", json!({"publishDate": "2026-10-10"}))
            .store;
        let renderer = SiteRenderer::new().unwrap();
        let page = load(&DataAccess::new(store), &ctx()).await;
        let html = page.render_container(&renderer).unwrap();
        assert!(html.contains("General"));
        assert!(html.contains("Untitled notice"));
        assert!(!html.contains("undefined"));
        assert!(!html.contains("None"));
    }

    #[tokio::test]
    async fn detail_opens_by_id_and_closes_on_escape() {
        let store = StoreFixture::new()
            .with_doc(
                "notices",
                "n1",
                json!({
                    "title": "Timetable",
                    "content": "<p onclick=\"x()\">See attached</p>",
                    "attachmentUrl": "https://cdn.example/timetable.pdf",
                    "publishDate": "2026-10-15"
                }),
            )
            .store;
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&DataAccess::new(store), &ctx()).await;

        assert_eq!(
            page.handle(UiEvent::Click { item: Some("missing".into()) }, &renderer).unwrap(),
            None
        );

        let Some(Update::Overlay(html)) = page
            .handle(UiEvent::Click { item: Some("n1".into()) }, &renderer)
            .unwrap()
        else {
            panic!("expected overlay");
        };
        assert!(html.contains("Timetable"));
        assert!(html.contains("<p>See attached</p>"));
        assert!(html.contains("file-pdf"));
        assert_eq!(page.open_item(), Some("n1"));

        assert_eq!(
            page.handle(UiEvent::Key(crate::pages::Key::Escape), &renderer).unwrap(),
            Some(Update::OverlayClosed)
        );
        assert_eq!(page.open_item(), None);
        assert_eq!(page.handle(UiEvent::Close, &renderer).unwrap(), None);
    }

    #[tokio::test]
    async fn store_failure_shows_failed_state() {
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&DataAccess::new(FailingStore), &ctx()).await;
        assert_eq!(page.state(), PageState::Failed);
        let html = page.render_container(&renderer).unwrap();
        assert!(html.contains(r#"data-state="failed""#));
        assert_eq!(page.handle(UiEvent::LoadMore, &renderer).unwrap(), None);
    }

    #[tokio::test]
    async fn empty_collection_shows_placeholder() {
        let renderer = SiteRenderer::new().unwrap();
        let page = load(&DataAccess::new(StoreFixture::new().store), &ctx()).await;
        assert_eq!(page.state(), PageState::Empty);
        let html = page.render_container(&renderer).unwrap();
        assert!(html.contains("No notices at the moment"));
    }

    #[tokio::test]
    async fn debounced_search_applies_after_quiet_period() {
        use std::time::{Duration, Instant};

        let api = DataAccess::new(StoreFixture::new().with_notices(15).store);
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&api, &ctx()).await;
        let start = Instant::now();

        page.type_search("Notice 1", start);
        page.type_search("Notice 12", start + Duration::from_millis(100));
        assert!(page.poll_search(start + Duration::from_millis(200), &renderer).unwrap().is_none());
        assert_eq!(page.listing().search(), "");

        let update = page
            .poll_search(start + Duration::from_millis(450), &renderer)
            .unwrap();
        assert!(matches!(update, Some(Update::Container(_))));
        let ids: Vec<_> = page.listing().visible().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["notice-12"]);
    }
}
