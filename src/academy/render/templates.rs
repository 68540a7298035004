//! Embedded page templates.
//!
//! Templates live as stand-alone `.html` files beside this module and are compiled into
//! the binary. Each is registered under its path relative to `templates/`, which is also
//! the name `{% include %}` uses. The constants below name the entry points controllers
//! render directly; partials and forms are only reached through includes.

// Document frame and shared fragments
pub const LAYOUT: &str = "layout.html";
pub const PLACEHOLDER: &str = "partials/placeholder.html";
pub const OVERLAY: &str = "partials/overlay.html";
pub const NAVBAR: &str = "chrome/navbar.html";
pub const FOOTER: &str = "chrome/footer.html";

// Single-view pages
pub const PAGE_HOME: &str = "pages/home.html";
pub const PAGE_ABOUT: &str = "pages/about.html";
pub const PAGE_ADMISSIONS: &str = "pages/admissions.html";
pub const PAGE_CONTACT: &str = "pages/contact.html";
pub const PAGE_THANK_YOU: &str = "pages/thank_you.html";

// List pages: body, card container and overlay detail
pub const NOTICES_BODY: &str = "notices/body.html";
pub const NOTICES_CARDS: &str = "notices/cards.html";
pub const NOTICES_DETAIL: &str = "notices/detail.html";
pub const EVENTS_BODY: &str = "events/body.html";
pub const EVENTS_CARDS: &str = "events/cards.html";
pub const EVENTS_DETAIL: &str = "events/detail.html";
pub const COURSES_BODY: &str = "courses/body.html";
pub const COURSES_CARDS: &str = "courses/cards.html";
pub const COURSES_DETAIL: &str = "courses/detail.html";
pub const FACULTY_BODY: &str = "faculty/body.html";
pub const FACULTY_CARDS: &str = "faculty/cards.html";
pub const FACULTY_DETAIL: &str = "faculty/detail.html";
pub const GALLERY_BODY: &str = "gallery/body.html";
pub const GALLERY_CARDS: &str = "gallery/cards.html";
pub const GALLERY_DETAIL: &str = "gallery/detail.html";
pub const RESULTS_BODY: &str = "results/body.html";
pub const RESULTS_CARDS: &str = "results/cards.html";
pub const RESULTS_DETAIL: &str = "results/detail.html";
pub const TESTIMONIALS_BODY: &str = "testimonials/body.html";
pub const TESTIMONIALS_CARDS: &str = "testimonials/cards.html";
pub const TESTIMONIALS_DETAIL: &str = "testimonials/detail.html";
pub const FAQ_BODY: &str = "faq/body.html";
pub const FAQ_CARDS: &str = "faq/cards.html";
pub const FAQ_DETAIL: &str = "faq/detail.html";

/// Every template as `(name, source)`.
pub const ALL: &[(&str, &str)] = &[
    ("chrome/footer.html", include_str!("templates/chrome/footer.html")),
    ("chrome/navbar.html", include_str!("templates/chrome/navbar.html")),
    ("courses/body.html", include_str!("templates/courses/body.html")),
    ("courses/cards.html", include_str!("templates/courses/cards.html")),
    ("courses/detail.html", include_str!("templates/courses/detail.html")),
    ("events/body.html", include_str!("templates/events/body.html")),
    ("events/cards.html", include_str!("templates/events/cards.html")),
    ("events/detail.html", include_str!("templates/events/detail.html")),
    ("faculty/body.html", include_str!("templates/faculty/body.html")),
    ("faculty/cards.html", include_str!("templates/faculty/cards.html")),
    ("faculty/detail.html", include_str!("templates/faculty/detail.html")),
    ("faq/body.html", include_str!("templates/faq/body.html")),
    ("faq/cards.html", include_str!("templates/faq/cards.html")),
    ("faq/detail.html", include_str!("templates/faq/detail.html")),
    ("forms/admission.html", include_str!("templates/forms/admission.html")),
    ("forms/contact.html", include_str!("templates/forms/contact.html")),
    ("forms/testimonial.html", include_str!("templates/forms/testimonial.html")),
    ("gallery/body.html", include_str!("templates/gallery/body.html")),
    ("gallery/cards.html", include_str!("templates/gallery/cards.html")),
    ("gallery/detail.html", include_str!("templates/gallery/detail.html")),
    ("layout.html", include_str!("templates/layout.html")),
    ("notices/body.html", include_str!("templates/notices/body.html")),
    ("notices/cards.html", include_str!("templates/notices/cards.html")),
    ("notices/detail.html", include_str!("templates/notices/detail.html")),
    ("pages/about.html", include_str!("templates/pages/about.html")),
    ("pages/admissions.html", include_str!("templates/pages/admissions.html")),
    ("pages/contact.html", include_str!("templates/pages/contact.html")),
    ("pages/home.html", include_str!("templates/pages/home.html")),
    ("pages/thank_you.html", include_str!("templates/pages/thank_you.html")),
    ("partials/banner.html", include_str!("templates/partials/banner.html")),
    ("partials/filters.html", include_str!("templates/partials/filters.html")),
    ("partials/overlay.html", include_str!("templates/partials/overlay.html")),
    ("partials/placeholder.html", include_str!("templates/partials/placeholder.html")),
    ("partials/search.html", include_str!("templates/partials/search.html")),
    ("results/body.html", include_str!("templates/results/body.html")),
    ("results/cards.html", include_str!("templates/results/cards.html")),
    ("results/detail.html", include_str!("templates/results/detail.html")),
    ("testimonials/body.html", include_str!("templates/testimonials/body.html")),
    ("testimonials/card.html", include_str!("templates/testimonials/card.html")),
    ("testimonials/cards.html", include_str!("templates/testimonials/cards.html")),
    ("testimonials/detail.html", include_str!("templates/testimonials/detail.html")),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_are_registered() {
        let names: Vec<&str> = ALL.iter().map(|(name, _)| *name).collect();
        for entry in [LAYOUT, PLACEHOLDER, OVERLAY, NAVBAR, FOOTER, PAGE_HOME, NOTICES_BODY, FAQ_DETAIL] {
            assert!(names.contains(&entry), "{entry} not embedded");
        }
    }
}
