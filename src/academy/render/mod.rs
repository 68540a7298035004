//! HTML rendering.
//!
//! Controllers build serializable view structs with every fallback already applied and
//! hand them to [`SiteRenderer`], which owns the compiled templates and the site theme.
//! Templates are embedded in the binary; see [`templates`].

use crate::error::Result;
use crate::pages::{Page, PageState};
use serde::Serialize;
use stencil::Renderer;

pub mod templates;
pub mod theme;

pub struct SiteRenderer {
    inner: Renderer,
}

#[derive(Serialize)]
struct PlaceholderView<'a> {
    state: PageState,
    message: &'a str,
}

#[derive(Serialize)]
struct OverlayView<'a> {
    content: &'a str,
}

/// A complete HTML document.
#[derive(Debug, Serialize)]
pub struct DocumentView<'a> {
    pub page: Page,
    pub title: &'a str,
    pub site_name: &'a str,
    pub navbar: &'a str,
    pub body: &'a str,
    pub footer: &'a str,
    pub overlay: Option<&'a str>,
}

impl SiteRenderer {
    pub fn new() -> Result<Self> {
        let mut inner = Renderer::new(theme::SITE_THEME.clone());
        for (name, source) in templates::ALL {
            inner.add_template(name, source)?;
        }
        Ok(Self { inner })
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        Ok(self.inner.render(template, data)?)
    }

    /// The loading, empty or failed stand-in for a list container.
    pub fn placeholder(&self, state: PageState, message: &str) -> Result<String> {
        self.render(templates::PLACEHOLDER, &PlaceholderView { state, message })
    }

    /// Wraps detail content in the overlay frame: backdrop, panel and close control.
    pub fn overlay(&self, content: &str) -> Result<String> {
        self.render(templates::OVERLAY, &OverlayView { content })
    }

    pub fn document(&self, view: &DocumentView<'_>) -> Result<String> {
        self.render(templates::LAYOUT, view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_embedded_template_compiles() {
        let renderer = SiteRenderer::new().unwrap();
        for (name, _) in templates::ALL {
            assert!(renderer.inner.has_template(name), "{name} missing");
        }
    }

    #[test]
    fn placeholder_escapes_message() {
        let renderer = SiteRenderer::new().unwrap();
        let html = renderer
            .placeholder(PageState::Empty, "No <b>notices</b> yet")
            .unwrap();
        assert!(html.contains("No &lt;b&gt;notices&lt;&#x2f;b&gt; yet"));
        assert!(html.contains(r#"data-state="empty""#));
    }

    #[test]
    fn overlay_frame_has_dismiss_targets() {
        let renderer = SiteRenderer::new().unwrap();
        let html = renderer.overlay("<p>Details</p>").unwrap();
        assert!(html.contains("<p>Details</p>"));
        assert!(html.contains(r#"data-action="backdrop""#));
        assert!(html.contains(r#"data-action="close""#));
    }

    #[test]
    fn document_wraps_chrome_and_body() {
        let renderer = SiteRenderer::new().unwrap();
        let html = renderer
            .document(&DocumentView {
                page: Page::Faq,
                title: "FAQ",
                site_name: "Virtual Academy",
                navbar: "<nav>n</nav>",
                body: "<section>b</section>",
                footer: "<footer>f</footer>",
                overlay: None,
            })
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>FAQ | Virtual Academy</title>"));
        assert!(html.contains("<nav>n</nav>"));
        assert!(html.contains("<section>b</section>"));
        assert!(html.contains(r#"data-page="faq""#));
    }
}
