//! Pages that load once and render a single view: no filters, no overlay.

use super::{Page, PageController, PageState};
use crate::error::Result;
use crate::forms::{FormController, FormKind, FormView};
use crate::render::SiteRenderer;
use serde::Serialize;
use tracing::{debug, warn};

pub const FAILED_MESSAGE: &str = "We couldn't load this page right now. Please try again later.";

#[derive(Serialize)]
struct Body<'a, V> {
    page: Page,
    #[serde(flatten)]
    view: &'a V,
    form: Option<FormView<'a>>,
}

pub struct StaticPage<V> {
    page: Page,
    template: &'static str,
    state: PageState,
    view: Option<V>,
    form: Option<FormController>,
}

impl<V: Serialize + Send> StaticPage<V> {
    pub fn new(page: Page, template: &'static str) -> Self {
        Self {
            page,
            template,
            state: PageState::Loading,
            view: None,
            form: None,
        }
    }

    pub fn with_form(mut self, kind: FormKind) -> Self {
        self.form = Some(FormController::new(kind));
        self
    }

    /// Leaves the loading state. A built view renders even when its sections are
    /// empty; only a failed load swaps the body for the error placeholder.
    pub fn settle(&mut self, loaded: Result<V>) {
        if self.state != PageState::Loading {
            warn!(page = %self.page, "ignoring second load for a settled page");
            return;
        }
        match loaded {
            Ok(view) => {
                debug!(page = %self.page, "page loaded");
                self.view = Some(view);
                self.state = PageState::Rendered;
            }
            Err(e) => {
                warn!(page = %self.page, error = %e, "page failed to load");
                self.state = PageState::Failed;
            }
        }
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn form(&self) -> Option<&FormController> {
        self.form.as_ref()
    }
}

impl<V: Serialize + Send> PageController for StaticPage<V> {
    fn page(&self) -> Page {
        self.page
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn render_body(&self, renderer: &SiteRenderer) -> Result<String> {
        match (&self.view, self.state) {
            (Some(view), _) => renderer.render(
                self.template,
                &Body {
                    page: self.page,
                    view,
                    form: self.form.as_ref().map(FormController::view),
                },
            ),
            (None, PageState::Loading) => renderer.placeholder(PageState::Loading, "Loading…"),
            (None, _) => renderer.placeholder(PageState::Failed, FAILED_MESSAGE),
        }
    }

    fn form_mut(&mut self) -> Option<&mut FormController> {
        self.form.as_mut()
    }
}
