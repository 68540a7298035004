//! # Page Controllers
//!
//! One controller per page. Each follows the same lifecycle:
//!
//! 1. **Load**: issue the page's queries through the data access facade, concurrently
//!    when there is more than one, and await them all.
//! 2. **Settle**: move from [`PageState::Loading`] to `Rendered`, `Empty` or `Failed`.
//!    The transition happens once per page view.
//! 3. **Render**: produce the page body from the current filter state. Every render
//!    regenerates the whole container.
//! 4. **Handle events**: [`UiEvent`]s stand in for browser input. Item clicks carry the
//!    record id embedded in the markup as `data-id`, the way delegated listeners read it.
//!    Each handled event yields an [`Update`] naming what to replace.
//!
//! List pages share [`listing::ListPage`]; the home, about, contact, admissions and
//! confirmation pages render once and ignore list events.

use crate::api::DataAccess;
use crate::config::SiteConfig;
use crate::error::{AcademyError, Result};
use crate::forms::FormController;
use crate::render::SiteRenderer;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod about;
pub mod admissions;
pub mod chrome;
pub mod contact;
pub mod courses;
pub mod events;
pub mod faculty;
pub mod faq;
pub mod gallery;
pub mod home;
pub mod listing;
pub mod notices;
pub mod results;
pub mod single;
pub mod testimonials;
pub mod thank_you;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    About,
    Courses,
    Faculty,
    Events,
    Notices,
    Gallery,
    Results,
    Testimonials,
    Faq,
    Admissions,
    Contact,
    ThankYou,
}

impl Page {
    pub const ALL: [Page; 13] = [
        Page::Home,
        Page::About,
        Page::Courses,
        Page::Faculty,
        Page::Events,
        Page::Notices,
        Page::Gallery,
        Page::Results,
        Page::Testimonials,
        Page::Faq,
        Page::Admissions,
        Page::Contact,
        Page::ThankYou,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Courses => "courses",
            Page::Faculty => "faculty",
            Page::Events => "events",
            Page::Notices => "notices",
            Page::Gallery => "gallery",
            Page::Results => "results",
            Page::Testimonials => "testimonials",
            Page::Faq => "faq",
            Page::Admissions => "admissions",
            Page::Contact => "contact",
            Page::ThankYou => "thank-you",
        }
    }

    pub fn file_name(self) -> String {
        match self {
            Page::Home => "index.html".to_string(),
            other => format!("{}.html", other.slug()),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About Us",
            Page::Courses => "Courses",
            Page::Faculty => "Faculty",
            Page::Events => "Events",
            Page::Notices => "Notices",
            Page::Gallery => "Gallery",
            Page::Results => "Results",
            Page::Testimonials => "Testimonials",
            Page::Faq => "FAQ",
            Page::Admissions => "Admissions",
            Page::Contact => "Contact",
            Page::ThankYou => "Thank You",
        }
    }

    /// Whether the page has a navbar link.
    pub fn in_nav(self) -> bool {
        !matches!(self, Page::ThankYou)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = AcademyError;

    /// Accepts a slug (`notices`) or a file name (`notices.html`, `index.html`).
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_suffix(".html").unwrap_or(&name);
        if name == "index" {
            return Ok(Page::Home);
        }
        Page::ALL
            .into_iter()
            .find(|p| p.slug() == name)
            .ok_or_else(|| AcademyError::UnknownPage(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageState {
    Loading,
    Rendered,
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Left,
    Right,
}

impl FromStr for Key {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Ok(Key::Escape),
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),
            other => Err(AcademyError::Validation(format!("Unknown key: {}", other))),
        }
    }
}

/// Browser input, as seen by a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A filter button; value `all` clears the facet.
    Filter { facet: String, value: String },
    /// The search box content, applied immediately.
    Search(String),
    LoadMore,
    /// A click inside the list container. `item` is the nearest `data-id`, if any.
    Click { item: Option<String> },
    /// The overlay's close control.
    Close,
    /// A click on the overlay backdrop, outside the panel.
    Backdrop,
    Key(Key),
}

/// What a handled event asks the page to replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// New markup for the list container.
    Container(String),
    /// Markup for a newly opened or changed overlay.
    Overlay(String),
    OverlayClosed,
}

/// What every controller needs besides the facade.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub now: DateTime<Utc>,
    pub config: SiteConfig,
}

impl ViewContext {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            now: Utc::now(),
            config,
        }
    }

    pub fn at(config: SiteConfig, now: DateTime<Utc>) -> Self {
        Self { now, config }
    }
}

/// A loaded page.
pub trait PageController: Send {
    fn page(&self) -> Page;

    fn state(&self) -> PageState;

    /// The page's main content, placed between the navbar and the footer.
    fn render_body(&self, renderer: &SiteRenderer) -> Result<String>;

    /// The open overlay, if any.
    fn render_overlay(&self, _renderer: &SiteRenderer) -> Result<Option<String>> {
        Ok(None)
    }

    fn handle(&mut self, _event: UiEvent, _renderer: &SiteRenderer) -> Result<Option<Update>> {
        Ok(None)
    }

    /// The page's submission form, for pages that have one.
    fn form_mut(&mut self) -> Option<&mut FormController> {
        None
    }
}

/// Builds and loads the controller for `page`.
pub async fn load<S: DocumentStore>(
    page: Page,
    api: &DataAccess<S>,
    ctx: &ViewContext,
) -> Box<dyn PageController> {
    match page {
        Page::Home => Box::new(home::load(api, ctx).await),
        Page::About => Box::new(about::load(api, ctx).await),
        Page::Courses => Box::new(courses::load(api, ctx).await),
        Page::Faculty => Box::new(faculty::load(api, ctx).await),
        Page::Events => Box::new(events::load(api, ctx).await),
        Page::Notices => Box::new(notices::load(api, ctx).await),
        Page::Gallery => Box::new(gallery::load(api, ctx).await),
        Page::Results => Box::new(results::load(api, ctx).await),
        Page::Testimonials => Box::new(testimonials::load(api, ctx).await),
        Page::Faq => Box::new(faq::load(api, ctx).await),
        Page::Admissions => Box::new(admissions::load(api, ctx).await),
        Page::Contact => Box::new(contact::load(api, ctx).await),
        Page::ThankYou => Box::new(thank_you::page(ctx)),
    }
}
