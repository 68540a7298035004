use super::listing::{distinct, eq_ignore_case, title_case, Entity, FilterOption, ListPage, ListView};
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::format::sanitize_html;
use crate::model::{collections, or_fallback, present, Faq, Record};
use crate::query::{Direction, Query};
use crate::render::templates;
use crate::render::theme::faq_tint;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

impl Entity for Faq {
    const COLLECTION: &'static str = collections::FAQS;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.question.as_deref(),
            self.answer.as_deref(),
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
pub struct LinkView {
    pub url: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FaqCard {
    pub id: String,
    pub question: String,
    pub answer_html: String,
    pub category: String,
    pub category_key: String,
    pub tint: &'static str,
    pub links: Vec<LinkView>,
}

impl ListView for Faq {
    type Card = FaqCard;

    const PAGE: Page = Page::Faq;
    const BODY_TEMPLATE: &'static str = templates::FAQ_BODY;
    const CARDS_TEMPLATE: &'static str = templates::FAQ_CARDS;
    const DETAIL_TEMPLATE: &'static str = templates::FAQ_DETAIL;
    const EMPTY_MESSAGE: &'static str = "No questions match your search.";

    fn card(record: &Record<Self>, _ctx: &ViewContext) -> FaqCard {
        let faq = &record.data;
        FaqCard {
            id: record.id.clone(),
            question: or_fallback(&faq.question, "Question"),
            answer_html: present(&faq.answer)
                .map(sanitize_html)
                .unwrap_or_else(|| "Answer coming soon...".to_string()),
            category: or_fallback(&faq.category, "General"),
            category_key: or_fallback(&faq.category, "general").to_lowercase(),
            tint: faq_tint(faq.category.as_deref()),
            // Links without a target are dropped; a missing label shows the URL.
            links: faq
                .related_links
                .iter()
                .flatten()
                .filter_map(|link| {
                    let url = present(&link.url)?;
                    Some(LinkView {
                        url: url.to_string(),
                        text: or_fallback(&link.text, url),
                    })
                })
                .collect(),
        }
    }

    fn filter_options(records: &[Record<Self>]) -> Vec<FilterOption> {
        distinct(records.iter().map(|r| r.category.as_deref()))
            .into_iter()
            .map(|c| FilterOption::new("category", &c.to_lowercase(), title_case(&c)))
            .collect()
    }
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> ListPage<Faq> {
    let mut page = ListPage::new(ctx);
    let query = Query::new().order_by("order", Direction::Asc);
    page.settle(api.fetch_records(collections::FAQS, &query).await, |listing| listing);
    page
}
