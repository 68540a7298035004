//! # Site
//!
//! Ties the pieces together for a client: a [`Site`] owns the data access facade, the
//! renderer and the configuration, opens pages (chrome and page data load concurrently),
//! builds the whole site to a directory and submits forms the way a visitor would, on the
//! page that hosts the form.

use crate::api::DataAccess;
use crate::config::SiteConfig;
use crate::error::{AcademyError, Result};
use crate::forms::{FormController, FormKind, SubmissionMeta, SubmitOutcome};
use crate::pages::chrome::{self, Chrome};
use crate::pages::{self, Page, PageController, PageState, UiEvent, Update, ViewContext};
use crate::render::{DocumentView, SiteRenderer};
use crate::store::DocumentStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// User agent recorded on submissions made through this crate.
pub const USER_AGENT: &str = concat!("academy/", env!("CARGO_PKG_VERSION"));

pub struct Site<S: DocumentStore> {
    api: DataAccess<S>,
    renderer: SiteRenderer,
    config: SiteConfig,
}

/// A page as a visitor sees it: controller plus navbar and footer.
pub struct LoadedPage {
    controller: Box<dyn PageController>,
    chrome: Chrome,
}

impl LoadedPage {
    pub fn page(&self) -> Page {
        self.controller.page()
    }

    pub fn state(&self) -> PageState {
        self.controller.state()
    }

    pub fn handle(&mut self, event: UiEvent, renderer: &SiteRenderer) -> Result<Option<Update>> {
        self.controller.handle(event, renderer)
    }

    pub fn form_mut(&mut self) -> Option<&mut FormController> {
        self.controller.form_mut()
    }

    pub fn render_body(&self, renderer: &SiteRenderer) -> Result<String> {
        self.controller.render_body(renderer)
    }

    /// The complete HTML document, including any open overlay.
    pub fn render(&self, renderer: &SiteRenderer) -> Result<String> {
        let page = self.controller.page();
        let navbar = self.chrome.navbar(renderer, page)?;
        let footer = self.chrome.footer(renderer)?;
        let body = self.controller.render_body(renderer)?;
        let overlay = self.controller.render_overlay(renderer)?;
        renderer.document(&DocumentView {
            page,
            title: page.title(),
            site_name: &self.chrome.site_name,
            navbar: &navbar,
            body: &body,
            footer: &footer,
            overlay: overlay.as_deref(),
        })
    }
}

impl<S: DocumentStore> Site<S> {
    pub fn new(store: S, config: SiteConfig) -> Result<Self> {
        Ok(Self {
            api: DataAccess::new(store),
            renderer: SiteRenderer::new()?,
            config,
        })
    }

    pub fn api(&self) -> &DataAccess<S> {
        &self.api
    }

    pub fn renderer(&self) -> &SiteRenderer {
        &self.renderer
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn context(&self) -> ViewContext {
        ViewContext::new(self.config.clone())
    }

    pub async fn open(&self, page: Page) -> LoadedPage {
        self.open_at(page, &self.context()).await
    }

    pub async fn open_at(&self, page: Page, ctx: &ViewContext) -> LoadedPage {
        let (controller, chrome) = tokio::join!(
            pages::load(page, &self.api, ctx),
            chrome::load(&self.api, ctx),
        );
        debug!(%page, state = ?controller.state(), "opened page");
        LoadedPage { controller, chrome }
    }

    /// Renders every page into `out_dir` and returns the written paths.
    pub async fn build(&self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(out_dir).await?;
        let ctx = self.context();
        let mut written = Vec::with_capacity(Page::ALL.len());
        for page in Page::ALL {
            let loaded = self.open_at(page, &ctx).await;
            let html = loaded.render(&self.renderer)?;
            let path = out_dir.join(page.file_name());
            tokio::fs::write(&path, html).await?;
            debug!(%page, path = %path.display(), "wrote page");
            written.push(path);
        }
        info!(pages = written.len(), out = %out_dir.display(), "site built");
        Ok(written)
    }

    /// Fills in and submits a form on the page that hosts it.
    ///
    /// Returns the outcome together with the page, whose form now carries the banner
    /// and any field errors. Naming a field the form doesn't have is an error.
    pub async fn submit(
        &self,
        kind: FormKind,
        fields: &[(String, String)],
        page_url: Option<&str>,
    ) -> Result<(SubmitOutcome, LoadedPage)> {
        let ctx = self.context();
        let mut loaded = self.open_at(kind.page(), &ctx).await;
        let page_url = page_url
            .map(str::to_string)
            .unwrap_or_else(|| self.config.page_url(&kind.page().file_name()));
        let meta = SubmissionMeta::new(&self.config, page_url, USER_AGENT, ctx.now);

        let form = loaded
            .form_mut()
            .ok_or_else(|| AcademyError::UnknownForm(kind.to_string()))?;
        for (name, value) in fields {
            if !form.set(name, value.as_str()) {
                return Err(AcademyError::Validation(format!(
                    "The {kind} form has no field named {name:?}"
                )));
            }
        }
        let outcome = form.submit(&self.api, &meta).await;
        Ok((outcome, loaded))
    }
}
