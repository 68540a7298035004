use super::single::StaticPage;
use super::{Page, ViewContext};
use crate::render::templates;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ThankYouView {
    pub site_name: String,
}

pub type ThankYouPage = StaticPage<ThankYouView>;

/// Where a successful admission enquiry lands. Needs no data.
pub fn page(ctx: &ViewContext) -> ThankYouPage {
    let mut page = StaticPage::new(Page::ThankYou, templates::PAGE_THANK_YOU);
    page.settle(Ok(ThankYouView {
        site_name: ctx.config.site_name.clone(),
    }));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::pages::{PageController, PageState};
    use crate::render::SiteRenderer;

    #[test]
    fn renders_without_a_store() {
        let renderer = SiteRenderer::new().unwrap();
        let page = page(&ViewContext::new(SiteConfig::default()));
        assert_eq!(page.state(), PageState::Rendered);
        let html = page.render_body(&renderer).unwrap();
        assert!(html.contains("Thank You"));
        assert!(html.contains(r#"href="index.html""#));
    }
}
