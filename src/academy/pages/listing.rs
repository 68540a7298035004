//! The list controller shared by every collection page.
//!
//! [`Listing`] owns the loaded records and derives the displayed subset from named
//! facets, a free-text search term and, for paginated pages, a display count. The
//! loaded set is never reordered or mutated; the displayed subset is a list of indexes
//! into it, recomputed on every change.
//!
//! [`ListPage`] wraps a listing with the page lifecycle, the overlay for detail views and
//! a debouncer for typed search input.

use super::{Key, Page, PageController, PageState, UiEvent, Update, ViewContext};
use crate::error::Result;
use crate::forms::{FormController, FormKind, FormView};
use crate::model::Record;
use crate::render::SiteRenderer;
use crate::timing::Debouncer;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Facet value that clears a facet.
pub const ALL: &str = "all";

/// A record type that can be listed, filtered and searched.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    /// The principal text fields searched by free text.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Whether the record passes `facet = value`. Never called with [`ALL`].
    fn matches_facet(&self, facet: &str, value: &str, now: DateTime<Utc>) -> bool;
}

/// How a listed record type is presented.
pub trait ListView: Entity {
    /// Everything a card template needs, with fallbacks already applied.
    type Card: Serialize;

    const PAGE: Page;
    const BODY_TEMPLATE: &'static str;
    const CARDS_TEMPLATE: &'static str;
    const DETAIL_TEMPLATE: &'static str;
    const EMPTY_MESSAGE: &'static str;
    /// Whether left/right keys step through the filtered set while the overlay is open.
    const NAVIGABLE: bool = false;
    /// A submission form rendered below the list.
    const FORM: Option<FormKind> = None;

    fn card(record: &Record<Self>, ctx: &ViewContext) -> Self::Card;

    /// Filter buttons shown above the list, besides "All".
    fn filter_options(_records: &[Record<Self>]) -> Vec<FilterOption> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub facet: String,
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(facet: &str, value: &str, label: impl Into<String>) -> Self {
        Self {
            facet: facet.to_string(),
            value: value.to_string(),
            label: label.into(),
        }
    }
}

/// Case-insensitive equality for an optional field.
pub fn eq_ignore_case(field: Option<&str>, value: &str) -> bool {
    field.is_some_and(|f| f.trim().eq_ignore_ascii_case(value.trim()))
}

/// Distinct values of a field, in first-seen order, compared case-insensitively.
pub fn distinct<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        let value = value.trim();
        if !value.is_empty() && !seen.iter().any(|s| s.eq_ignore_ascii_case(value)) {
            seen.push(value.to_string());
        }
    }
    seen
}

pub fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct Listing<T> {
    all: Vec<Record<T>>,
    filtered: Vec<usize>,
    facets: BTreeMap<String, String>,
    search: String,
    batch: Option<usize>,
    displayed: usize,
    now: DateTime<Utc>,
}

impl<T: Entity> Listing<T> {
    pub fn new(records: Vec<Record<T>>, now: DateTime<Utc>) -> Self {
        let mut listing = Self {
            all: records,
            filtered: Vec::new(),
            facets: BTreeMap::new(),
            search: String::new(),
            batch: None,
            displayed: 0,
            now,
        };
        listing.recompute();
        listing
    }

    /// Reveals records `batch` at a time.
    pub fn paginated(mut self, batch: usize) -> Self {
        self.batch = Some(batch.max(1));
        self.reset_display();
        self
    }

    pub fn with_facet(mut self, facet: &str, value: &str) -> Self {
        self.set_facet(facet, value);
        self
    }

    pub fn set_facet(&mut self, facet: &str, value: &str) {
        if value.eq_ignore_ascii_case(ALL) {
            self.facets.remove(facet);
        } else {
            self.facets.insert(facet.to_string(), value.to_string());
        }
        self.recompute();
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
        self.recompute();
    }

    /// Reveals the next batch. Returns false when everything was already visible.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        let step = self.batch.unwrap_or(self.filtered.len());
        self.displayed = (self.displayed + step).min(self.filtered.len());
        true
    }

    pub fn all(&self) -> &[Record<T>] {
        &self.all
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Record<T>> {
        self.filtered.iter().map(|&i| &self.all[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Record<T>> {
        self.filtered().take(self.displayed)
    }

    pub fn visible_len(&self) -> usize {
        self.displayed
    }

    pub fn has_more(&self) -> bool {
        self.displayed < self.filtered.len()
    }

    /// Current value of a facet, [`ALL`] when unset.
    pub fn facet(&self, facet: &str) -> &str {
        self.facets.get(facet).map_or(ALL, String::as_str)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn find(&self, id: &str) -> Option<&Record<T>> {
        self.all.iter().find(|r| r.id == id)
    }

    /// Position of a record within the filtered set.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.filtered().position(|r| r.id == id)
    }

    pub fn filtered_at(&self, position: usize) -> Option<&Record<T>> {
        self.filtered.get(position).map(|&i| &self.all[i])
    }

    fn matches(&self, record: &Record<T>) -> bool {
        let facets_ok = self
            .facets
            .iter()
            .all(|(facet, value)| record.data.matches_facet(facet, value, self.now));
        facets_ok && self.matches_search(record)
    }

    fn matches_search(&self, record: &Record<T>) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record
            .data
            .search_fields()
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&needle))
    }

    fn recompute(&mut self) {
        self.filtered = (0..self.all.len())
            .filter(|&i| self.matches(&self.all[i]))
            .collect();
        self.reset_display();
    }

    fn reset_display(&mut self) {
        self.displayed = match self.batch {
            Some(batch) => batch.min(self.filtered.len()),
            None => self.filtered.len(),
        };
    }
}

#[derive(Serialize)]
struct FilterButton {
    facet: String,
    value: String,
    label: String,
    active: bool,
}

#[derive(Serialize)]
struct BodyView<'a> {
    page: Page,
    state: PageState,
    filters: Vec<FilterButton>,
    search: &'a str,
    container: String,
    form: Option<FormView<'a>>,
}

#[derive(Serialize)]
struct CardsView<C> {
    cards: Vec<C>,
    has_more: bool,
    shown: usize,
    total: usize,
}

#[derive(Serialize)]
struct DetailView<C> {
    item: C,
    /// 1-based position in the filtered set, when the record is in it.
    position: Option<usize>,
    total: usize,
    navigable: bool,
}

pub struct ListPage<T: ListView> {
    state: PageState,
    listing: Listing<T>,
    overlay: Option<String>,
    search_input: Debouncer<String>,
    form: Option<FormController>,
    ctx: ViewContext,
}

impl<T: ListView> ListPage<T> {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            state: PageState::Loading,
            listing: Listing::new(Vec::new(), ctx.now),
            overlay: None,
            search_input: Debouncer::new(Duration::from_millis(ctx.config.search_debounce_ms)),
            form: T::FORM.map(FormController::new),
            ctx: ctx.clone(),
        }
    }

    /// Leaves the loading state with the outcome of the page's fetches.
    ///
    /// `configure` sets the listing's initial facets and pagination.
    pub fn settle(
        &mut self,
        loaded: Result<Vec<Record<T>>>,
        configure: impl FnOnce(Listing<T>) -> Listing<T>,
    ) {
        if self.state != PageState::Loading {
            warn!(page = %T::PAGE, "ignoring second load for a settled page");
            return;
        }
        match loaded {
            Ok(records) if records.is_empty() => {
                self.state = PageState::Empty;
            }
            Ok(records) => {
                debug!(page = %T::PAGE, count = records.len(), "page loaded");
                self.listing = configure(Listing::new(records, self.ctx.now));
                self.state = PageState::Rendered;
            }
            Err(e) => {
                warn!(page = %T::PAGE, error = %e, "page failed to load");
                self.state = PageState::Failed;
            }
        }
    }

    pub fn listing(&self) -> &Listing<T> {
        &self.listing
    }

    pub fn open_item(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    /// Records a keystroke in the search box. The term reaches the listing once typing
    /// has paused; see [`ListPage::poll_search`].
    pub fn type_search(&mut self, text: &str, at: Instant) {
        self.search_input.call(text.to_string(), at);
    }

    /// Applies a debounced search term whose quiet period has elapsed.
    pub fn poll_search(&mut self, at: Instant, renderer: &SiteRenderer) -> Result<Option<Update>> {
        match self.search_input.poll(at) {
            Some(term) => self.handle(UiEvent::Search(term), renderer),
            None => Ok(None),
        }
    }

    pub fn render_container(&self, renderer: &SiteRenderer) -> Result<String> {
        match self.state {
            PageState::Loading => renderer.placeholder(PageState::Loading, "Loading…"),
            PageState::Failed => renderer.placeholder(
                PageState::Failed,
                "We couldn't load this page right now. Please try again later.",
            ),
            PageState::Empty => renderer.placeholder(PageState::Empty, T::EMPTY_MESSAGE),
            PageState::Rendered if self.listing.visible_len() == 0 => {
                renderer.placeholder(PageState::Empty, T::EMPTY_MESSAGE)
            }
            PageState::Rendered => {
                let view = CardsView {
                    cards: self
                        .listing
                        .visible()
                        .map(|r| T::card(r, &self.ctx))
                        .collect(),
                    has_more: self.listing.has_more(),
                    shown: self.listing.visible_len(),
                    total: self.listing.filtered_len(),
                };
                renderer.render(T::CARDS_TEMPLATE, &view)
            }
        }
    }

    fn filter_buttons(&self) -> Vec<FilterButton> {
        let options = T::filter_options(self.listing.all());
        let mut facets: Vec<&str> = Vec::new();
        for option in &options {
            if !facets.contains(&option.facet.as_str()) {
                facets.push(&option.facet);
            }
        }
        let mut buttons = Vec::new();
        for facet in facets {
            let current = self.listing.facet(facet);
            buttons.push(FilterButton {
                facet: facet.to_string(),
                value: ALL.to_string(),
                label: "All".to_string(),
                active: current == ALL,
            });
            for option in options.iter().filter(|o| o.facet == facet) {
                buttons.push(FilterButton {
                    facet: option.facet.clone(),
                    value: option.value.clone(),
                    label: option.label.clone(),
                    active: current.eq_ignore_ascii_case(&option.value),
                });
            }
        }
        buttons
    }

    fn render_detail(&self, renderer: &SiteRenderer, id: &str) -> Result<Option<String>> {
        let Some(record) = self.listing.find(id) else {
            return Ok(None);
        };
        let view = DetailView {
            item: T::card(record, &self.ctx),
            position: self.listing.position(id).map(|p| p + 1),
            total: self.listing.filtered_len(),
            navigable: T::NAVIGABLE,
        };
        let content = renderer.render(T::DETAIL_TEMPLATE, &view)?;
        renderer.overlay(&content).map(Some)
    }

    fn step_overlay(&self, forward: bool) -> Option<String> {
        let current = self.overlay.as_deref()?;
        let len = self.listing.filtered_len();
        let position = self.listing.position(current)?;
        let next = if forward {
            (position + 1) % len
        } else {
            (position + len - 1) % len
        };
        self.listing.filtered_at(next).map(|r| r.id.clone())
    }
}

impl<T: ListView> PageController for ListPage<T> {
    fn page(&self) -> Page {
        T::PAGE
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn render_body(&self, renderer: &SiteRenderer) -> Result<String> {
        let view = BodyView {
            page: T::PAGE,
            state: self.state,
            filters: self.filter_buttons(),
            search: self.listing.search(),
            container: self.render_container(renderer)?,
            form: self.form.as_ref().map(FormController::view),
        };
        renderer.render(T::BODY_TEMPLATE, &view)
    }

    fn render_overlay(&self, renderer: &SiteRenderer) -> Result<Option<String>> {
        match &self.overlay {
            Some(id) => self.render_detail(renderer, id),
            None => Ok(None),
        }
    }

    fn form_mut(&mut self) -> Option<&mut FormController> {
        self.form.as_mut()
    }

    fn handle(&mut self, event: UiEvent, renderer: &SiteRenderer) -> Result<Option<Update>> {
        if self.state != PageState::Rendered {
            return Ok(None);
        }
        debug!(page = %T::PAGE, ?event, "handling event");
        match event {
            UiEvent::Filter { facet, value } => {
                self.listing.set_facet(&facet, &value);
                Ok(Some(Update::Container(self.render_container(renderer)?)))
            }
            UiEvent::Search(term) => {
                self.listing.set_search(&term);
                Ok(Some(Update::Container(self.render_container(renderer)?)))
            }
            UiEvent::LoadMore => {
                if self.listing.load_more() {
                    Ok(Some(Update::Container(self.render_container(renderer)?)))
                } else {
                    Ok(None)
                }
            }
            UiEvent::Click { item: Some(id) } => match self.render_detail(renderer, &id)? {
                Some(html) => {
                    self.overlay = Some(id);
                    Ok(Some(Update::Overlay(html)))
                }
                None => Ok(None),
            },
            UiEvent::Click { item: None } => Ok(None),
            UiEvent::Close | UiEvent::Backdrop | UiEvent::Key(Key::Escape) => {
                Ok(self.overlay.take().map(|_| Update::OverlayClosed))
            }
            UiEvent::Key(key @ (Key::Left | Key::Right)) => {
                if !T::NAVIGABLE {
                    return Ok(None);
                }
                let Some(next) = self.step_overlay(key == Key::Right) else {
                    return Ok(None);
                };
                let html = self.render_detail(renderer, &next)?;
                self.overlay = Some(next);
                Ok(html.map(Update::Overlay))
            }
        }
    }
}
