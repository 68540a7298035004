use super::single::StaticPage;
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::forms::FormKind;
use crate::model::{collections, or_fallback, present, Course, Record};
use crate::query::{Direction, Query};
use crate::render::templates;
use crate::store::DocumentStore;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CourseOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CourseGroup {
    pub category: String,
    pub options: Vec<CourseOption>,
}

#[derive(Debug, Serialize)]
pub struct AdmissionsView {
    pub course_groups: Vec<CourseGroup>,
}

/// Groups courses for the course picker, keeping the order in which categories first
/// appear.
pub fn course_groups(courses: &[Record<Course>]) -> Vec<CourseGroup> {
    let mut groups: Vec<CourseGroup> = Vec::new();
    for course in courses {
        let category = format!("{} Courses", or_fallback(&course.category, "Other"));
        let name = or_fallback(&course.name, "Untitled course");
        let option = CourseOption {
            value: course.id.clone(),
            label: match present(&course.fee) {
                Some(fee) => format!("{name} ({fee})"),
                None => name,
            },
        };
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.options.push(option),
            None => groups.push(CourseGroup {
                category,
                options: vec![option],
            }),
        }
    }
    groups
}

pub type AdmissionsPage = StaticPage<AdmissionsView>;

/// The enquiry form is usable without the course list, so a failed fetch leaves the
/// picker empty rather than failing the page.
pub async fn load<S: DocumentStore>(api: &DataAccess<S>, _ctx: &ViewContext) -> AdmissionsPage {
    let query = Query::new().order_by("name", Direction::Asc);
    let courses = api
        .fetch_records::<Course>(collections::COURSES, &query)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "failed to load courses for the enquiry form");
            Vec::new()
        });

    let mut page = StaticPage::new(Page::Admissions, templates::PAGE_ADMISSIONS)
        .with_form(FormKind::Admission);
    page.settle(Ok(AdmissionsView {
        course_groups: course_groups(&courses),
    }));
    page
}
