//! Typed record shapes.
//!
//! Documents arrive from the store as loose JSON objects. They are decoded into these
//! structs at the data access boundary, so page code reads `Option` fields instead of
//! probing a map. Every field except the id is optional; unknown fields are ignored.
//! Dates stay as the stored strings and are parsed on demand with [`crate::format::parse_date`].

use crate::error::{AcademyError, Result};
use crate::store::Document;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A decoded document: the store id plus typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: DeserializeOwned> Record<T> {
    pub fn decode(collection: &str, doc: Document) -> Result<Self> {
        let Document { id, fields } = doc;
        let data = serde_json::from_value(serde_json::Value::Object(fields)).map_err(|source| {
            AcademyError::Decode {
                collection: collection.to_string(),
                id: id.clone(),
                source,
            }
        })?;
        Ok(Self { id, data })
    }
}

impl<T> std::ops::Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// Collection names in the document store.
pub mod collections {
    pub const CONFIG: &str = "config";
    pub const PAGES: &str = "pages";
    pub const COURSES: &str = "courses";
    pub const FACULTY: &str = "faculty";
    pub const NOTICES: &str = "notices";
    pub const EVENTS: &str = "events";
    pub const GALLERY: &str = "gallery";
    pub const TESTIMONIALS: &str = "testimonials";
    pub const FAQS: &str = "faqs";
    pub const RESULTS: &str = "results";
    pub const ADMISSION_ENQUIRIES: &str = "admissionEnquiries";
    pub const CONTACT_MESSAGES: &str = "contactMessages";

    pub const SITE_SETTINGS_ID: &str = "siteSettings";
    pub const HOME_ID: &str = "home";
    pub const ABOUT_ID: &str = "about";
    pub const CONTACT_ID: &str = "contact";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub important: Option<bool>,
    pub publish_date: Option<String>,
    pub expiry_date: Option<String>,
    pub attachment_url: Option<String>,
    pub attachment_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub audience: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub registration_link: Option<String>,
    pub gallery: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub fee: Option<String>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub order: Option<i64>,
    pub syllabus_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    pub name: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub specialization: Option<String>,
    pub bio: Option<String>,
    pub subjects: Option<String>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub name: Option<String>,
    pub role: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub rating: Option<i64>,
    pub date: Option<String>,
    pub verified: Option<bool>,
    pub achievement: Option<String>,
    pub avatar_url: Option<String>,
    pub status: Option<String>,
}

impl Testimonial {
    /// Star count shown on the card: missing means 5, out-of-range values are clamped.
    pub fn stars(&self) -> u8 {
        self.rating.unwrap_or(5).clamp(1, 5) as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub related_links: Option<Vec<Link>>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topper {
    pub name: Option<String>,
    pub score: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub title: Option<String>,
    pub exam_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub year: Option<i64>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub percentage: Option<serde_json::Value>,
    pub pass_percentage: Option<serde_json::Value>,
    pub total_students: Option<serde_json::Value>,
    pub topper_percentage: Option<serde_json::Value>,
    pub distinctions: Option<serde_json::Value>,
    pub highlights: Option<Vec<String>>,
    pub toppers: Option<Vec<Topper>>,
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
}

/// The `config/siteSettings` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: Option<String>,
    pub tagline: Option<String>,
    pub phone: Option<String>,
    pub contact_email: Option<String>,
    pub address: Option<String>,
    pub social_links: Option<SocialLinks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub highlights: Option<Vec<Highlight>>,
    pub cta_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub title: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    /// Rich text body.
    pub content: Option<String>,
    pub history: Option<String>,
    pub image_url: Option<String>,
    pub values: Option<Vec<Highlight>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactContent {
    pub office_hours: Option<String>,
    pub map_url: Option<String>,
}

/// Returns the trimmed string when it has content.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Display text for a loosely typed scalar: strings as-is, numbers without a
/// trailing `.0`. Nulls, blanks, zero and non-scalars have nothing to show.
pub fn scalar_text(value: Option<&serde_json::Value>) -> Option<String> {
    use serde_json::Value;
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_text(n)),
        _ => None,
    }
}

fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// Field decoders for values editors store either as a string or as a number.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `45000` and `"45,000"` both read as text.
    pub fn text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(de)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(super::number_text(&n)),
            _ => None,
        })
    }

    /// `2024` and `"2024"` both read as a number. Anything else reads as missing.
    pub fn integer<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
        Ok(match Option::<Value>::deserialize(de)? {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

/// The trimmed value, or `fallback` when missing or blank.
pub fn or_fallback(value: &Option<String>, fallback: &str) -> String {
    present(value).unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(id: &str, value: serde_json::Value) -> Document {
        Document::new(id, value.as_object().cloned().unwrap())
    }

    #[test]
    fn decodes_camel_case_fields() {
        let record: Record<Notice> = Record::decode(
            "notices",
            document(
                "n1",
                json!({"title": "Exam", "publishDate": "2026-03-01", "important": true, "extra": 1}),
            ),
        )
        .unwrap();
        assert_eq!(record.id, "n1");
        assert_eq!(record.title.as_deref(), Some("Exam"));
        assert_eq!(record.publish_date.as_deref(), Some("2026-03-01"));
        assert_eq!(record.important, Some(true));
        assert_eq!(record.category, None);
    }

    #[test]
    fn event_type_field_is_named_type() {
        let record: Record<Event> =
            Record::decode("events", document("e1", json!({"type": "seminar"}))).unwrap();
        assert_eq!(record.event_type.as_deref(), Some("seminar"));
    }

    #[test]
    fn wrong_field_type_is_a_decode_error() {
        let err = Record::<Course>::decode("courses", document("c1", json!({"featured": "yes"})))
            .unwrap_err();
        match err {
            AcademyError::Decode { collection, id, .. } => {
                assert_eq!(collection, "courses");
                assert_eq!(id, "c1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn numbers_and_numeric_text_decode_either_way() {
        let course: Record<Course> = Record::decode(
            "courses",
            document("c1", json!({"fee": 45000, "duration": 12, "order": "2"})),
        )
        .unwrap();
        assert_eq!(course.fee.as_deref(), Some("45000"));
        assert_eq!(course.duration.as_deref(), Some("12"));
        assert_eq!(course.order, Some(2));

        let result: Record<ExamResult> =
            Record::decode("results", document("r1", json!({"year": "2024"}))).unwrap();
        assert_eq!(result.year, Some(2024));

        let faq: Record<Faq> =
            Record::decode("faqs", document("q1", json!({"order": "first"}))).unwrap();
        assert_eq!(faq.order, None);

        let t: Record<Testimonial> =
            Record::decode("testimonials", document("t1", json!({"rating": 4.0}))).unwrap();
        assert_eq!(t.stars(), 4);
    }

    #[test]
    fn testimonial_stars_default_and_clamp() {
        let mut t = Testimonial::default();
        assert_eq!(t.stars(), 5);
        t.rating = Some(9);
        assert_eq!(t.stars(), 5);
        t.rating = Some(0);
        assert_eq!(t.stars(), 1);
        t.rating = Some(3);
        assert_eq!(t.stars(), 3);
    }

    #[test]
    fn scalar_text_handles_strings_and_numbers() {
        assert_eq!(scalar_text(Some(&json!(98.5))).as_deref(), Some("98.5"));
        assert_eq!(scalar_text(Some(&json!(120))).as_deref(), Some("120"));
        assert_eq!(scalar_text(Some(&json!("AIR 12"))).as_deref(), Some("AIR 12"));
        assert_eq!(scalar_text(Some(&json!(0))), None);
        assert_eq!(scalar_text(Some(&json!(null))), None);
        assert_eq!(scalar_text(None), None);
    }

    #[test]
    fn fallback_treats_blank_as_missing() {
        assert_eq!(or_fallback(&None, "General"), "General");
        assert_eq!(or_fallback(&Some("   ".into()), "General"), "General");
        assert_eq!(or_fallback(&Some(" exam ".into()), "General"), "exam");
    }
}
