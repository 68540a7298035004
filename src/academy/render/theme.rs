//! The site's style names and the utility classes behind them.
//!
//! Templates only ever name styles (`classes("card")`, `value | style("badge")`); the
//! class lists live here.

use once_cell::sync::Lazy;
use stencil::Theme;

pub static SITE_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        // Chrome
        .add("body", "bg-gray-50 text-gray-800 font-sans antialiased")
        .add("nav", "bg-white shadow sticky top-0 z-40")
        .add("nav_inner", "container mx-auto px-4 flex items-center justify-between h-16")
        .add("brand", "text-xl font-bold text-blue-700")
        .add("nav_link", "px-3 py-2 text-sm font-medium text-gray-600 hover:text-blue-600")
        .add("nav_link_active", "px-3 py-2 text-sm font-semibold text-blue-600 border-b-2 border-blue-600")
        .add("footer", "bg-gray-900 text-gray-300 mt-16")
        .add("footer_inner", "container mx-auto px-4 py-12 grid md:grid-cols-3 gap-8")
        .add("footer_heading", "text-white font-bold mb-4")
        .add("footer_link", "text-gray-400 hover:text-white")
        .add("footer_bottom", "border-t border-gray-800 py-4 text-center text-sm text-gray-500")
        // Sections
        .add("section", "container mx-auto px-4 py-12")
        .add("section_title", "text-3xl font-bold text-gray-900 mb-2")
        .add("section_lead", "text-gray-600 mb-8")
        .add("hero", "bg-gradient-to-r from-blue-700 to-indigo-700 text-white py-20")
        .add("hero_title", "text-4xl md:text-5xl font-bold mb-4")
        .add("hero_subtitle", "text-xl text-blue-100 mb-8")
        .add("grid", "grid md:grid-cols-2 lg:grid-cols-3 gap-6")
        .add("grid_gallery", "grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4")
        .add("stack", "space-y-6")
        // Cards
        .add("card", "bg-white rounded-xl shadow-lg overflow-hidden hover:shadow-xl transition")
        .add("card_padded", "bg-white rounded-xl shadow-lg p-6 hover:shadow-xl transition")
        .add("card_title", "text-xl font-bold text-gray-800 mb-2")
        .add("card_meta", "text-sm text-gray-500")
        .add("card_body", "text-gray-600 mb-4")
        .add("card_footer", "flex flex-wrap items-center justify-between pt-4 border-t border-gray-100")
        .add("card_image", "w-full h-48 object-cover")
        .add("prose", "prose max-w-none")
        .add("badge", "bg-gray-100 text-gray-700 text-xs font-semibold px-3 py-1 rounded-full")
        .add("badge_important", "bg-red-100 text-red-800 text-xs font-bold px-3 py-1 rounded-full")
        .add("badge_featured", "bg-yellow-100 text-yellow-800 text-xs font-bold px-3 py-1 rounded-full")
        .add("badge_verified", "text-green-600 text-sm font-semibold")
        .add("badge_completed", "text-xs bg-gray-200 text-gray-700 px-2 py-1 rounded-full")
        .add("badge_upcoming", "text-xs bg-white px-2 py-1 rounded-full font-bold")
        .add("stars", "text-yellow-500 tracking-wide")
        .add("stat", "bg-white rounded-xl shadow p-6 text-center")
        .add("stat_value", "text-4xl font-bold text-blue-600")
        .add("stat_label", "text-gray-600 mt-2")
        .add("topper", "flex items-center justify-between bg-gray-50 rounded-lg px-3 py-2")
        // Category accents: left border and label colour
        .add("accent_blue", "border-l-4 border-blue-500 text-blue-600")
        .add("accent_green", "border-l-4 border-green-500 text-green-600")
        .add("accent_yellow", "border-l-4 border-yellow-500 text-yellow-600")
        .add("accent_red", "border-l-4 border-red-500 text-red-600")
        .add("accent_purple", "border-l-4 border-purple-500 text-purple-600")
        .add("accent_gray", "border-l-4 border-gray-500 text-gray-600")
        // Event type tints: background and text colour
        .add("tint_blue", "bg-blue-100 text-blue-600")
        .add("tint_green", "bg-green-100 text-green-600")
        .add("tint_purple", "bg-purple-100 text-purple-600")
        .add("tint_red", "bg-red-100 text-red-600")
        .add("tint_yellow", "bg-yellow-100 text-yellow-600")
        .add("tint_gray", "bg-gray-100 text-gray-600")
        .add("tint_past", "bg-gray-100 text-gray-500 opacity-80")
        // Controls
        .add("button_primary", "bg-blue-600 text-white px-6 py-2 rounded-lg font-semibold hover:bg-blue-700 disabled:opacity-50")
        .add("button_secondary", "border border-gray-300 text-gray-700 px-6 py-2 rounded-lg font-semibold hover:bg-gray-50")
        .add("button_link", "text-blue-600 hover:text-blue-800 text-sm font-semibold")
        .add("filter_bar", "flex flex-wrap gap-2 mb-6")
        .add("filter_btn", "px-4 py-2 rounded-full text-sm bg-gray-200 hover:bg-gray-300")
        .add("filter_btn_active", "px-4 py-2 rounded-full text-sm bg-blue-600 text-white")
        .add("search_input", "w-full md:w-80 border border-gray-300 rounded-lg px-4 py-2 mb-6")
        .add("load_more", "block mx-auto mt-8 bg-gray-800 text-white px-6 py-2 rounded-lg hover:bg-gray-900")
        // States
        .add("placeholder", "text-center py-12 text-gray-500")
        .add("placeholder_failed", "text-center py-12 text-red-600")
        .add("spinner", "animate-spin rounded-full h-12 w-12 border-t-2 border-b-2 border-blue-500 mx-auto")
        // Overlay
        .add("overlay_backdrop", "fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50 p-4")
        .add("overlay_panel", "bg-white rounded-xl shadow-2xl max-w-3xl w-full max-h-[90vh] overflow-y-auto p-6")
        .add("overlay_close", "text-gray-500 hover:text-gray-700 text-2xl float-right")
        .add("lightbox_image", "max-h-[70vh] mx-auto rounded-lg")
        .add("lightbox_nav", "flex items-center justify-between mt-4 text-sm text-gray-600")
        // Forms
        .add("form", "bg-white rounded-xl shadow-lg p-6 space-y-4")
        .add("form_label", "block text-sm font-semibold text-gray-700 mb-1")
        .add("form_input", "w-full border border-gray-300 rounded-lg px-4 py-2")
        .add("form_input_error", "w-full border border-red-500 rounded-lg px-4 py-2")
        .add("field_error", "error-message text-red-500 text-sm mt-1")
        .add("banner_success", "p-4 rounded-lg mb-6 bg-green-100 text-green-800 border border-green-300")
        .add("banner_error", "p-4 rounded-lg mb-6 bg-red-100 text-red-800 border border-red-300")
        .add("banner_info", "p-4 rounded-lg mb-6 bg-blue-100 text-blue-800 border border-blue-300")
        .add("banner_warning", "p-4 rounded-lg mb-6 bg-yellow-100 text-yellow-800 border border-yellow-300")
});

/// Accent style for a notice or course category.
pub fn category_accent(category: Option<&str>) -> &'static str {
    match category.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
        Some("academic") => "accent_blue",
        Some("examination" | "exam") => "accent_green",
        Some("holiday") => "accent_yellow",
        Some("important") => "accent_red",
        Some("admission" | "admissions") => "accent_purple",
        _ => "accent_gray",
    }
}

/// Tint style for an event type.
pub fn event_tint(event_type: &str) -> &'static str {
    match event_type.to_ascii_lowercase().as_str() {
        "workshop" => "tint_blue",
        "seminar" => "tint_green",
        "cultural" => "tint_purple",
        "sports" => "tint_red",
        "academic" => "tint_yellow",
        _ => "tint_gray",
    }
}

/// Tint style for a FAQ category.
pub fn faq_tint(category: Option<&str>) -> &'static str {
    match category.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
        Some("admission") => "tint_blue",
        Some("academic") => "tint_green",
        Some("fee") => "tint_yellow",
        Some("facility") => "tint_purple",
        Some("examination") => "tint_red",
        _ => "tint_gray",
    }
}

/// Tint style for an exam type. Exact names win, then the first keyword contained
/// in the type ("JEE Main" is a JEE result).
pub fn exam_tint(exam_type: &str) -> &'static str {
    const TINTS: [(&str, &str); 4] = [
        ("board", "tint_blue"),
        ("jee", "tint_purple"),
        ("neet", "tint_green"),
        ("olympiad", "tint_yellow"),
    ];
    let lower = exam_type.trim().to_lowercase();
    TINTS
        .iter()
        .find(|(key, _)| lower == *key)
        .or_else(|| TINTS.iter().find(|(key, _)| lower.contains(key)))
        .map(|(_, tint)| *tint)
        .unwrap_or("tint_gray")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_fall_back_to_gray() {
        assert_eq!(category_accent(Some("Holiday")), "accent_yellow");
        assert_eq!(category_accent(Some("sports")), "accent_gray");
        assert_eq!(category_accent(None), "accent_gray");
    }

    #[test]
    fn every_accent_and_tint_is_themed() {
        for category in ["academic", "exam", "holiday", "important", "admission", "other"] {
            assert!(SITE_THEME.has(category_accent(Some(category))));
        }
        for kind in ["workshop", "seminar", "cultural", "sports", "academic", "other"] {
            assert!(SITE_THEME.has(event_tint(kind)));
        }
        for category in ["admission", "academic", "fee", "facility", "examination", "other"] {
            assert!(SITE_THEME.has(faq_tint(Some(category))));
        }
        for kind in ["board", "jee", "neet", "olympiad", "other"] {
            assert!(SITE_THEME.has(exam_tint(kind)));
        }
    }

    #[test]
    fn exam_tint_matches_keywords() {
        assert_eq!(exam_tint("JEE Main"), "tint_purple");
        assert_eq!(exam_tint("CBSE Board"), "tint_blue");
        assert_eq!(exam_tint("General"), "tint_gray");
    }
}
