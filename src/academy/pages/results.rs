use super::listing::{distinct, eq_ignore_case, Entity, FilterOption, ListPage, ListView};
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::format::{format_date, sanitize_html};
use crate::model::{collections, or_fallback, present, scalar_text, ExamResult, Record};
use crate::query::Query;
use crate::render::templates;
use crate::render::theme::exam_tint;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;

/// Toppers shown per result.
pub const TOPPERS_SHOWN: usize = 4;

impl ExamResult {
    /// One-line outcome shown in the card footer.
    pub fn status(&self) -> String {
        if let Some(p) = scalar_text(self.percentage.as_ref()) {
            format!("{p}% Overall")
        } else if let Some(p) = scalar_text(self.pass_percentage.as_ref()) {
            format!("{p}% Pass Rate")
        } else {
            "Results Declared".to_string()
        }
    }
}

impl Entity for ExamResult {
    const COLLECTION: &'static str = collections::RESULTS;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.title.as_deref(),
            self.description.as_deref(),
            self.exam_type.as_deref(),
        ]
    }

    fn matches_facet(&self, facet: &str, value: &str, _now: DateTime<Utc>) -> bool {
        match facet {
            "year" => self.year.is_some_and(|y| y.to_string() == value.trim()),
            "category" => eq_ignore_case(self.exam_type.as_deref(), value),
            _ => true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
    pub tone: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TopperView {
    pub rank: usize,
    pub name: String,
    pub score: String,
}

#[derive(Debug, Serialize)]
pub struct ResultCard {
    pub id: String,
    pub title: String,
    pub exam_type: String,
    pub exam_label: String,
    pub type_key: String,
    pub tint: &'static str,
    pub year: String,
    pub date: String,
    pub summary_html: String,
    pub description_html: String,
    pub highlights: Vec<String>,
    pub toppers: Vec<TopperView>,
    pub stats: Vec<Stat>,
    pub status: String,
    pub document_url: Option<String>,
}

impl ListView for ExamResult {
    type Card = ResultCard;

    const PAGE: Page = Page::Results;
    const BODY_TEMPLATE: &'static str = templates::RESULTS_BODY;
    const CARDS_TEMPLATE: &'static str = templates::RESULTS_CARDS;
    const DETAIL_TEMPLATE: &'static str = templates::RESULTS_DETAIL;
    const EMPTY_MESSAGE: &'static str = "No results match the selected filters.";

    fn card(record: &Record<Self>, _ctx: &ViewContext) -> ResultCard {
        let result = &record.data;
        let description = present(&result.description).map(sanitize_html);
        let date = match (present(&result.date), result.year) {
            (Some(date), _) => format_date(date),
            (None, Some(year)) => format_date(&format!("{year}-06-01")),
            (None, None) => format_date(""),
        };
        let stats = [
            ("Total Students", result.total_students.as_ref(), "", "text-gray-800"),
            ("Pass Percentage", result.pass_percentage.as_ref(), "%", "text-green-600"),
            ("90% and Above", result.topper_percentage.as_ref(), "%", "text-blue-600"),
            ("Distinctions", result.distinctions.as_ref(), "", "text-purple-600"),
        ]
        .into_iter()
        .filter_map(|(label, value, suffix, tone)| {
            scalar_text(value).map(|v| Stat {
                label,
                value: format!("{v}{suffix}"),
                tone,
            })
        })
        .collect();

        ResultCard {
            id: record.id.clone(),
            title: or_fallback(&result.title, "Exam results"),
            exam_type: or_fallback(&result.exam_type, "General"),
            exam_label: or_fallback(&result.exam_type, "Examination"),
            type_key: or_fallback(&result.exam_type, "general").to_lowercase(),
            tint: exam_tint(result.exam_type.as_deref().unwrap_or_default()),
            year: result
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            date,
            summary_html: description
                .clone()
                .unwrap_or_else(|| "Results information coming soon.".to_string()),
            description_html: description
                .unwrap_or_else(|| "No description available.".to_string()),
            highlights: result
                .highlights
                .iter()
                .flatten()
                .map(|h| h.trim())
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect(),
            toppers: result
                .toppers
                .iter()
                .flatten()
                .take(TOPPERS_SHOWN)
                .enumerate()
                .map(|(i, t)| TopperView {
                    rank: i + 1,
                    name: or_fallback(&t.name, "Student"),
                    score: scalar_text(t.score.as_ref()).unwrap_or_default(),
                })
                .collect(),
            stats,
            status: result.status(),
            document_url: present(&result.document_url).map(str::to_string),
        }
    }

    fn filter_options(records: &[Record<Self>]) -> Vec<FilterOption> {
        let mut years: Vec<i64> = records.iter().filter_map(|r| r.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        let mut options: Vec<FilterOption> = years
            .into_iter()
            .map(|y| FilterOption::new("year", &y.to_string(), y.to_string()))
            .collect();
        for kind in distinct(records.iter().map(|r| r.exam_type.as_deref())) {
            options.push(FilterOption::new("category", &kind.to_lowercase(), kind));
        }
        options
    }
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> ListPage<ExamResult> {
    let mut page = ListPage::new(ctx);
    // Years may be stored as text, so order on the decoded value.
    let loaded = api
        .fetch_records::<ExamResult>(collections::RESULTS, &Query::new())
        .await
        .map(|mut records| {
            records.sort_by_key(|r| Reverse(r.year));
            records
        });
    page.settle(loaded, |listing| listing);
    page
}
