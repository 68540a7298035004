//! Events: upcoming first, then a capped window of past events.

use super::listing::{distinct, eq_ignore_case, Entity, FilterOption, ListPage, ListView};
use super::{Page, ViewContext};
use crate::api::DataAccess;
use crate::error::Result;
use crate::format::{format_date, format_time, parse_date};
use crate::model::{collections, or_fallback, present, Event, Record};
use crate::query::Query;
use crate::render::templates;
use crate::render::theme::event_tint;
use crate::store::DocumentStore;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Past events shown at most.
pub const PAST_LIMIT: usize = 20;
/// Gallery images previewed in the detail overlay.
pub const GALLERY_PREVIEW: usize = 4;

impl Event {
    /// Events without a date, or with an unparseable one, count as neither upcoming nor past.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> Option<bool> {
        let date = parse_date(self.date.as_deref()?)?;
        Some(date >= now)
    }
}

fn type_label(event_type: &str) -> &'static str {
    match event_type.to_ascii_lowercase().as_str() {
        "workshop" => "Workshop",
        "seminar" => "Seminar",
        "cultural" => "Cultural Event",
        "sports" => "Sports Event",
        "academic" => "Academic Event",
        "general" => "General Event",
        _ => "Event",
    }
}

/// Upcoming events (soonest first) and recent past events (latest first). Both sides are
/// decided by [`Event::is_upcoming`], so the split always agrees with the cards.
pub async fn fetch_split<S: DocumentStore>(
    api: &DataAccess<S>,
    now: DateTime<Utc>,
) -> Result<(Vec<Record<Event>>, Vec<Record<Event>>)> {
    let records = api
        .fetch_records::<Event>(collections::EVENTS, &Query::new())
        .await?;
    let mut dated: Vec<(DateTime<Utc>, Record<Event>)> = records
        .into_iter()
        .filter_map(|record| {
            let at = parse_date(record.date.as_deref()?)?;
            Some((at, record))
        })
        .collect();
    dated.sort_by_key(|(at, _)| *at);

    let split = dated.partition_point(|(at, _)| *at < now);
    let upcoming = dated.split_off(split).into_iter().map(|(_, r)| r).collect();
    let past = dated
        .into_iter()
        .rev()
        .take(PAST_LIMIT)
        .map(|(_, r)| r)
        .collect();
    Ok((upcoming, past))
}

pub async fn fetch_upcoming<S: DocumentStore>(
    api: &DataAccess<S>,
    now: DateTime<Utc>,
) -> Result<Vec<Record<Event>>> {
    Ok(fetch_split(api, now).await?.0)
}

impl Entity for Event {
    const COLLECTION: &'static str = collections::EVENTS;

    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            self.title.as_deref(),
            self.description.as_deref(),
            self.venue.as_deref(),
        ]
    }

    fn matches_facet(&self, facet: &str, value: &str, now: DateTime<Utc>) -> bool {
        match (facet, value.to_ascii_lowercase().as_str()) {
            ("category", "upcoming") => self.is_upcoming(now) == Some(true),
            ("category", "past") => self.is_upcoming(now) == Some(false),
            ("category", _) => eq_ignore_case(self.event_type.as_deref(), value),
            _ => true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub type_key: String,
    pub type_label: &'static str,
    pub tint: &'static str,
    pub past: bool,
    pub day: Option<u32>,
    pub month: Option<String>,
    pub year: Option<i32>,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub audience: String,
    /// Only offered for events that have not happened yet.
    pub registration_link: Option<String>,
    pub gallery: Vec<String>,
    pub has_gallery: bool,
}

impl ListView for Event {
    type Card = EventCard;

    const PAGE: Page = Page::Events;
    const BODY_TEMPLATE: &'static str = templates::EVENTS_BODY;
    const CARDS_TEMPLATE: &'static str = templates::EVENTS_CARDS;
    const DETAIL_TEMPLATE: &'static str = templates::EVENTS_DETAIL;
    const EMPTY_MESSAGE: &'static str = "No events to show right now. Please check back soon.";

    fn card(record: &Record<Self>, ctx: &ViewContext) -> EventCard {
        let event = &record.data;
        let when = event.date.as_deref().and_then(parse_date);
        let past = when.is_some_and(|d| d < ctx.now);
        let type_key = or_fallback(&event.event_type, "general").to_lowercase();
        let gallery = event.gallery.clone().unwrap_or_default();
        EventCard {
            id: record.id.clone(),
            title: or_fallback(&event.title, "Untitled event"),
            description: or_fallback(&event.description, "No description available."),
            type_label: type_label(&type_key),
            tint: if past { "tint_past" } else { event_tint(&type_key) },
            type_key,
            past,
            day: when.map(|d| d.day()),
            month: when.map(|d| d.format("%b").to_string()),
            year: when.map(|d| d.year()),
            date: format_date(event.date.as_deref().unwrap_or_default()),
            time: present(&event.time)
                .map(format_time)
                .unwrap_or_else(|| "To be announced".to_string()),
            venue: or_fallback(&event.venue, "Main Campus"),
            audience: or_fallback(&event.audience, "All Students"),
            registration_link: present(&event.registration_link)
                .filter(|_| !past)
                .map(str::to_string),
            has_gallery: !gallery.is_empty(),
            gallery: gallery.into_iter().take(GALLERY_PREVIEW).collect(),
        }
    }

    fn filter_options(records: &[Record<Self>]) -> Vec<FilterOption> {
        let mut options = vec![
            FilterOption::new("category", "upcoming", "Upcoming"),
            FilterOption::new("category", "past", "Past"),
        ];
        for kind in distinct(records.iter().map(|r| r.event_type.as_deref())) {
            let key = kind.to_lowercase();
            options.push(FilterOption::new("category", &key, type_label(&key)));
        }
        options
    }
}

pub async fn load<S: DocumentStore>(api: &DataAccess<S>, ctx: &ViewContext) -> ListPage<Event> {
    let mut page = ListPage::new(ctx);
    let loaded = fetch_split(api, ctx.now)
        .await
        .map(|(mut upcoming, past)| {
            upcoming.extend(past);
            upcoming
        });
    page.settle(loaded, |listing| listing.with_facet("category", "upcoming"));
    page
}
