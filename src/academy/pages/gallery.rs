//! Photo gallery with a lightbox that steps through the current filter.

use super::listing::{distinct, eq_ignore_case, title_case, Entity, FilterOption, ListPage, ListView};
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::format::format_date;
use crate::model::{collections, or_fallback, present, GalleryImage, Record};
use crate::query::{Direction, Query};
use crate::render::templates;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

impl Entity for GalleryImage {
    const COLLECTION: &'static str = collections::GALLERY;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.title.as_deref(),
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

#[derive(Debug, Serialize)]
pub struct GalleryTile {
    pub id: String,
    pub title: String,
    pub alt: String,
    pub category: String,
    pub category_key: String,
    pub thumbnail_url: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl ListView for GalleryImage {
    type Card = GalleryTile;

    const PAGE: Page = Page::Gallery;
    const BODY_TEMPLATE: &'static str = templates::GALLERY_BODY;
    const CARDS_TEMPLATE: &'static str = templates::GALLERY_CARDS;
    const DETAIL_TEMPLATE: &'static str = templates::GALLERY_DETAIL;
    const EMPTY_MESSAGE: &'static str = "No images in the gallery yet.";
    const NAVIGABLE: bool = true;

    fn card(record: &Record<Self>, _ctx: &ViewContext) -> GalleryTile {
        let image = &record.data;
        let full = present(&image.image_url).map(str::to_string);
        GalleryTile {
            id: record.id.clone(),
            title: or_fallback(&image.title, "Untitled"),
            alt: or_fallback(&image.title, "Gallery image"),
            category: or_fallback(&image.category, "General"),
            category_key: or_fallback(&image.category, "general").to_lowercase(),
            thumbnail_url: present(&image.thumbnail_url)
                .map(str::to_string)
                .or_else(|| full.clone()),
            image_url: full,
            description: present(&image.description).map(str::to_string),
            date: present(&image.date).map(format_date),
        }
    }

    fn filter_options(records: &[Record<Self>]) -> Vec<FilterOption> {
        distinct(records.iter().map(|r| r.category.as_deref()))
            .into_iter()
            .map(|c| FilterOption::new("category", &c.to_lowercase(), title_case(&c)))
            .collect()
    }
}

pub async fn load<S: DocumentStore>(
    api: &DataAccess<S>,
    ctx: &ViewContext,
) -> ListPage<GalleryImage> {
    let mut page = ListPage::new(ctx);
    let query = Query::new().order_by("date", Direction::Desc);
    page.settle(
        api.fetch_records(collections::GALLERY, &query).await,
        |listing| listing,
    );
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::{Key, PageController, UiEvent, Update};
    use crate::render::SiteRenderer;
    use crate::store::memory::fixtures::StoreFixture;
    use serde_json::json;

    fn store() -> StoreFixture {
        StoreFixture::new()
            .with_doc("gallery", "g1", json!({"title": "Annual Day", "category": "Events", "imageUrl": "https://img/1.jpg", "date": "2026-03-01"}))
            .with_doc("gallery", "g2", json!({"title": "Lab", "category": "Campus", "imageUrl": "https://img/2.jpg", "thumbnailUrl": "https://img/2-t.jpg", "date": "2026-05-01"}))
            .with_doc("gallery", "g3", json!({"title": "Sports Meet", "category": "events", "imageUrl": "https://img/3.jpg", "date": "2026-07-01"}))
    }

    async fn events_only(renderer: &SiteRenderer) -> ListPage<GalleryImage> {
        let ctx = ViewContext::new(SiteConfig::default());
        let mut page = load(&DataAccess::new(store().store), &ctx).await;
        page.handle(
            UiEvent::Filter {
                facet: "category".into(),
                value: "events".into(),
            },
            renderer,
        )
        .unwrap();
        page
    }

    #[tokio::test]
    async fn newest_first_and_category_is_case_insensitive() {
        let renderer = SiteRenderer::new().unwrap();
        let page = events_only(&renderer).await;
        let ids: Vec<_> = page.listing().visible().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["g3", "g1"]);
    }

    #[tokio::test]
    async fn arrow_keys_wrap_within_the_filter() {
        let renderer = SiteRenderer::new().unwrap();
        let mut page = events_only(&renderer).await;

        page.handle(UiEvent::Click { item: Some("g1".into()) }, &renderer)
            .unwrap();
        let Some(Update::Overlay(html)) = page.handle(UiEvent::Key(Key::Right), &renderer).unwrap()
        else {
            panic!("expected overlay");
        };
        assert_eq!(page.open_item(), Some("g3"));
        assert!(html.contains("Sports Meet"));
        assert!(html.contains("1 / 2"));

        page.handle(UiEvent::Key(Key::Left), &renderer).unwrap();
        assert_eq!(page.open_item(), Some("g1"));

        assert_eq!(
            page.handle(UiEvent::Backdrop, &renderer).unwrap(),
            Some(Update::OverlayClosed)
        );
        assert_eq!(page.handle(UiEvent::Key(Key::Right), &renderer).unwrap(), None);
    }

    #[tokio::test]
    async fn thumbnail_falls_back_to_full_image() {
        let ctx = ViewContext::new(SiteConfig::default());
        let page = load(&DataAccess::new(store().store), &ctx).await;
        let g1 = GalleryImage::card(page.listing().find("g1").unwrap(), &ctx);
        assert_eq!(g1.thumbnail_url.as_deref(), Some("https://img/1.jpg"));
        let g2 = GalleryImage::card(page.listing().find("g2").unwrap(), &ctx);
        assert_eq!(g2.thumbnail_url.as_deref(), Some("https://img/2-t.jpg"));
    }

    #[test]
    fn untitled_tiles() {
        let ctx = ViewContext::new(SiteConfig::default());
        let tile = GalleryImage::card(
            &Record {
                id: "x".into(),
                data: GalleryImage::default(),
            },
            &ctx,
        );
        assert_eq!(tile.title, "Untitled");
        assert_eq!(tile.alt, "Gallery image");
        assert_eq!(tile.category, "General");
        assert!(tile.date.is_none());
    }
}
