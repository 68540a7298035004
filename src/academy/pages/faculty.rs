use super::listing::{distinct, title_case, Entity, FilterOption, ListPage, ListView};
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::format::{sanitize_html, truncate};
use crate::model::{collections, or_fallback, present, FacultyMember, Record};
use crate::query::{Direction, Query};
use crate::render::templates;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

const BIO_PREVIEW_CHARS: usize = 120;
const NO_BIO: &str = "Bio information coming soon...";

impl Entity for FacultyMember {
    const COLLECTION: &'static str = collections::FACULTY;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.name.as_deref(),
            self.specialization.as_deref(),
            self.qualification.as_deref(),
        ]
    }

    // Departments match anywhere in the specialization: "physics" selects
    // "Physics & Astronomy" as well.
    fn matches_facet(&self, facet: &str, value: &str, _now: DateTime<Utc>) -> bool {
        match facet {
            "department" => self
                .specialization
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&value.trim().to_lowercase())),
            _ => true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FacultyCard {
    pub id: String,
    pub name: String,
    pub qualification: String,
    pub experience: Option<String>,
    pub specialization: Option<String>,
    pub department_key: String,
    pub subjects: Option<String>,
    pub image_url: Option<String>,
    pub bio_preview: String,
    pub bio_html: String,
}

impl ListView for FacultyMember {
    type Card = FacultyCard;

    const PAGE: Page = Page::Faculty;
    const BODY_TEMPLATE: &'static str = templates::FACULTY_BODY;
    const CARDS_TEMPLATE: &'static str = templates::FACULTY_CARDS;
    const DETAIL_TEMPLATE: &'static str = templates::FACULTY_DETAIL;
    const EMPTY_MESSAGE: &'static str = "Faculty information will be available soon.";

    fn card(record: &Record<Self>, _ctx: &ViewContext) -> FacultyCard {
        let member = &record.data;
        let bio = present(&member.bio);
        FacultyCard {
            id: record.id.clone(),
            name: or_fallback(&member.name, "Faculty member"),
            qualification: or_fallback(&member.qualification, "Qualified Educator"),
            experience: present(&member.experience).map(str::to_string),
            specialization: present(&member.specialization).map(str::to_string),
            department_key: or_fallback(&member.specialization, "general").to_lowercase(),
            subjects: present(&member.subjects).map(str::to_string),
            image_url: present(&member.image_url).map(str::to_string),
            bio_preview: bio
                .map(|b| truncate(b, BIO_PREVIEW_CHARS))
                .unwrap_or_else(|| NO_BIO.to_string()),
            bio_html: bio.map(sanitize_html).unwrap_or_else(|| NO_BIO.to_string()),
        }
    }

    fn filter_options(records: &[Record<Self>]) -> Vec<FilterOption> {
        distinct(records.iter().map(|r| r.specialization.as_deref()))
            .into_iter()
            .map(|s| FilterOption::new("department", &s.to_lowercase(), title_case(&s)))
            .collect()
    }
}

pub async fn load<S: DocumentStore>(
    api: &DataAccess<S>,
    ctx: &ViewContext,
) -> ListPage<FacultyMember> {
    let mut page = ListPage::new(ctx);
    let query = Query::new().order_by("order", Direction::Asc);
    page.settle(
        api.fetch_records(collections::FACULTY, &query).await,
        |listing| listing,
    );
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::{PageController, PageState, UiEvent, Update};
    use crate::render::SiteRenderer;
    use crate::store::memory::fixtures::StoreFixture;
    use serde_json::json;

    fn store() -> StoreFixture {
        StoreFixture::new()
            .with_doc("faculty", "rao", json!({"name": "Dr. Rao", "specialization": "Physics & Astronomy", "order": 1, "bio": "x".repeat(200)}))
            .with_doc("faculty", "iyer", json!({"name": "Ms. Iyer", "specialization": "Mathematics", "order": 2, "qualification": "M.Sc."}))
            .with_doc("faculty", "khan", json!({"name": "Mr. Khan", "order": 3}))
    }

    #[tokio::test]
    async fn department_filter_matches_substring() {
        let ctx = ViewContext::new(SiteConfig::default());
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&DataAccess::new(store().store), &ctx).await;
        assert_eq!(page.state(), PageState::Rendered);

        page.handle(
            UiEvent::Filter {
                facet: "department".into(),
                value: "PHYSICS".into(),
            },
            &renderer,
        )
        .unwrap();
        let ids: Vec<_> = page.listing().visible().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rao"]);
    }

    #[tokio::test]
    async fn search_covers_qualification() {
        let ctx = ViewContext::new(SiteConfig::default());
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&DataAccess::new(store().store), &ctx).await;
        page.handle(UiEvent::Search("m.sc".into()), &renderer).unwrap();
        let ids: Vec<_> = page.listing().visible().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["iyer"]);
    }

    #[tokio::test]
    async fn cards_fall_back_and_truncate_bio() {
        let ctx = ViewContext::new(SiteConfig::default());
        let page = load(&DataAccess::new(store().store), &ctx).await;

        let khan = FacultyMember::card(page.listing().find("khan").unwrap(), &ctx);
        assert_eq!(khan.qualification, "Qualified Educator");
        assert_eq!(khan.bio_preview, NO_BIO);
        assert_eq!(khan.department_key, "general");

        let rao = FacultyMember::card(page.listing().find("rao").unwrap(), &ctx);
        assert!(rao.bio_preview.chars().count() <= BIO_PREVIEW_CHARS + 1);
        assert!(rao.bio_preview.ends_with('…'));
    }

    #[tokio::test]
    async fn profile_overlay_offers_consultation() {
        let ctx = ViewContext::new(SiteConfig::default());
        let renderer = SiteRenderer::new().unwrap();
        let mut page = load(&DataAccess::new(store().store), &ctx).await;
        let Some(Update::Overlay(html)) = page
            .handle(UiEvent::Click { item: Some("iyer".into()) }, &renderer)
            .unwrap()
        else {
            panic!("expected overlay");
        };
        assert!(html.contains("Ms. Iyer"));
        assert!(html.contains("Schedule Consultation"));
    }
}
