//! # Stencil
//!
//! HTML templates on [minijinja](https://docs.rs/minijinja) where presentation comes from
//! a [`Theme`]: a table of semantic style names (`"badge_important"`, `"card"`) mapped to
//! utility class lists. Templates say *what* an element is; the theme says how it looks,
//! so a badge colour is changed in one place rather than in every template that shows one.
//!
//! Two hooks are registered on every [`Renderer`]:
//!
//! - `value | style("name")` wraps the (escaped) value in `<span class="...">`
//! - `classes("name")` yields the class list itself, for use inside an attribute
//!
//! An unknown style name renders a visible `(!?)` marker and a `style-missing` class, so
//! a typo in a template shows up on the page instead of silently dropping the styling.
//!
//! ```rust
//! use stencil::{Renderer, Theme};
//! # use serde::Serialize;
//! # #[derive(Serialize)]
//! # struct Notice { title: String }
//!
//! let theme = Theme::new()
//!     .add("card", "rounded-xl shadow p-6")
//!     .add("heading", "text-2xl font-bold");
//! let mut renderer = Renderer::new(theme);
//! renderer
//!     .add_template(
//!         "notice.html",
//!         r#"<div class="{{ classes("card") }}">{{ title | style("heading") }}</div>"#,
//!     )
//!     .unwrap();
//!
//! let html = renderer.render("notice.html", &Notice { title: "Fees & dates".into() }).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<div class="rounded-xl shadow p-6"><span class="text-2xl font-bold">Fees &amp; dates</span></div>"#
//! );
//! ```
//!
//! Names ending in `.html` are auto-escaped by minijinja. Values already marked safe (a
//! nested `style` call, a `| safe` fragment) are not escaped twice. Registered templates
//! can `{% include %}` and `{% extends %}` each other by name.

use minijinja::{Environment, HtmlEscape, Value};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

pub use minijinja::Error;

const MISSING_MARKER: &str = "(!?)";
const MISSING_CLASS: &str = "style-missing";

/// Style names and their class lists.
#[derive(Clone, Debug, Default)]
pub struct Theme {
    classes: HashMap<String, String>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a style.
    pub fn add(mut self, name: &str, classes: &str) -> Self {
        self.classes.insert(name.to_string(), classes.to_string());
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// The class list for `name`, or `style-missing`.
    pub fn class_list(&self, name: &str) -> &str {
        self.classes.get(name).map_or(MISSING_CLASS, String::as_str)
    }

    /// Wraps already-escaped markup in a span carrying the style's classes.
    pub fn wrap(&self, name: &str, escaped: &str) -> String {
        match self.classes.get(name) {
            Some(classes) => format!(r#"<span class="{classes}">{escaped}</span>"#),
            None => format!(r#"<span class="{MISSING_CLASS}">{MISSING_MARKER} {escaped}</span>"#),
        }
    }
}

/// Escapes text for element content and quoted attribute values, exactly as minijinja's
/// HTML auto-escaping does.
pub fn escape_html(text: &str) -> String {
    HtmlEscape(text).to_string()
}

/// Compiled templates sharing one theme.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        let theme = Arc::new(theme);
        let mut env = Environment::new();

        let filter_theme = Arc::clone(&theme);
        env.add_filter("style", move |value: Value, name: String| -> Value {
            let text = if value.is_undefined() || value.is_none() {
                String::new()
            } else if value.is_safe() {
                value.to_string()
            } else {
                escape_html(&value.to_string())
            };
            Value::from_safe_string(filter_theme.wrap(&name, &text))
        });
        env.add_function("classes", move |name: String| -> String {
            theme.class_list(&name).to_string()
        });

        Self { env }
    }

    /// Compiles and registers `source` under `name`. Syntax errors surface here.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        self.env.get_template(name)?.render(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Card {
        title: Option<String>,
        tags: Vec<String>,
    }

    fn card(title: &str) -> Card {
        Card {
            title: Some(title.into()),
            tags: vec!["exam".into(), "holiday".into()],
        }
    }

    fn renderer_with(theme: Theme, name: &str, source: &str) -> Renderer {
        let mut renderer = Renderer::new(theme);
        renderer.add_template(name, source).unwrap();
        renderer
    }

    #[test]
    fn later_style_replaces_earlier() {
        let theme = Theme::new().add("badge", "bg-red-100").add("badge", "bg-blue-100");
        assert_eq!(theme.class_list("badge"), "bg-blue-100");
        assert!(theme.has("badge"));
        assert!(!theme.has("bagde"));
    }

    #[test]
    fn unknown_style_is_marked() {
        let theme = Theme::new();
        assert_eq!(theme.class_list("bagde"), "style-missing");
        assert_eq!(
            theme.wrap("bagde", "Exam"),
            r#"<span class="style-missing">(!?) Exam</span>"#
        );
    }

    #[test]
    fn escape_covers_attribute_breakers() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;&#x2f;a&gt;"
        );
    }

    #[test]
    fn filter_and_auto_escape_agree() {
        let text = r#"<a href="x">Tom & 'Jerry'</a>"#;
        let r = renderer_with(
            Theme::new().add("t", "c"),
            "t.html",
            r#"{{ title }}|{{ title | style("t") }}"#,
        );
        let html = r.render("t.html", &card(text)).unwrap();
        let escaped = escape_html(text);
        assert_eq!(html, format!(r#"{escaped}|<span class="c">{escaped}</span>"#));
    }

    #[test]
    fn style_filter_escapes_plain_values() {
        let r = renderer_with(
            Theme::new().add("title", "font-bold"),
            "t.html",
            r#"{{ title | style("title") }}"#,
        );
        assert_eq!(
            r.render("t.html", &card("<script>")).unwrap(),
            r#"<span class="font-bold">&lt;script&gt;</span>"#
        );
    }

    #[test]
    fn nested_styles_are_not_escaped_twice() {
        let r = renderer_with(
            Theme::new().add("outer", "o").add("inner", "i"),
            "t.html",
            r#"{{ title | style("inner") | style("outer") }}"#,
        );
        assert_eq!(
            r.render("t.html", &card("x")).unwrap(),
            r#"<span class="o"><span class="i">x</span></span>"#
        );
    }

    #[test]
    fn missing_value_styles_as_empty() {
        let r = renderer_with(Theme::new().add("x", "c"), "t.html", r#"{{ title | style("x") }}"#);
        let data = Card {
            title: None,
            tags: vec![],
        };
        assert_eq!(r.render("t.html", &data).unwrap(), r#"<span class="c"></span>"#);
    }

    #[test]
    fn classes_function_fills_attributes() {
        let r = renderer_with(
            Theme::new().add("tag", "rounded px-2"),
            "t.html",
            r#"{% for t in tags %}<i class="{{ classes("tag") }}">{{ t }}</i>{% endfor %}"#,
        );
        assert_eq!(
            r.render("t.html", &card("x")).unwrap(),
            r#"<i class="rounded px-2">exam</i><i class="rounded px-2">holiday</i>"#
        );
    }

    #[test]
    fn includes_resolve_by_name() {
        let mut r = renderer_with(Theme::new(), "item.html", "<li>{{ title }}</li>");
        r.add_template("list.html", r#"<ul>{% include "item.html" %}</ul>"#)
            .unwrap();
        assert!(r.has_template("list.html"));
        assert!(!r.has_template("other.html"));
        assert_eq!(
            r.render("list.html", &card("a & b")).unwrap(),
            "<ul><li>a &amp; b</li></ul>"
        );
    }

    #[test]
    fn text_templates_are_not_escaped() {
        let r = renderer_with(Theme::new(), "plain.txt", "{{ title }}");
        assert_eq!(r.render("plain.txt", &card("a & b")).unwrap(), "a & b");
    }

    #[test]
    fn errors_surface() {
        let mut r = Renderer::new(Theme::new());
        assert!(r.add_template("bad.html", "{{ unclosed").is_err());
        assert!(r.render("nonexistent.html", &card("x")).is_err());
    }
}
