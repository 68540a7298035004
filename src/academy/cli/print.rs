use academy::forms::{Banner, FieldError, MessageLevel, SubmitOutcome};
use academy::store::Document;
use colored::Colorize;
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 24;

pub(super) fn print_banner(banner: &Banner) {
    let text = match &banner.reference {
        Some(reference) => format!("{} (reference {})", banner.text, reference),
        None => banner.text.clone(),
    };
    match banner.level {
        MessageLevel::Info => println!("{}", text.dimmed()),
        MessageLevel::Success => println!("{}", text.green()),
        MessageLevel::Warning => println!("{}", text.yellow()),
        MessageLevel::Error => println!("{}", text.red()),
    }
    if let Some(redirect) = &banner.redirect {
        println!(
            "{}",
            format!(
                "Redirecting to {} in {} seconds.",
                redirect.target, redirect.delay_secs
            )
            .dimmed()
        );
    }
}

pub(super) fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        println!("  {} {}", format!("{}:", error.field).red(), error.message);
    }
}

pub(super) fn print_outcome(outcome: &SubmitOutcome, banner: Option<&Banner>) {
    if let Some(banner) = banner {
        print_banner(banner);
    }
    match outcome {
        SubmitOutcome::Invalid(errors) => print_field_errors(errors),
        SubmitOutcome::Busy => println!("{}", "A submission is already in progress.".yellow()),
        SubmitOutcome::Submitted { .. } | SubmitOutcome::Failed { .. } => {}
    }
}

pub(super) fn print_written(paths: &[PathBuf]) {
    for path in paths {
        println!("  {} {}", "wrote".green(), path.display());
    }
    println!("{}", format!("{} pages written.", paths.len()).bold());
}

/// One line per document: the id, then its fields as compact JSON.
pub(super) fn print_documents(docs: &[Document]) {
    if docs.is_empty() {
        println!("No documents found.");
        return;
    }
    for doc in docs {
        let id = truncate_to_width(&doc.id, ID_WIDTH);
        let padding = ID_WIDTH.saturating_sub(id.width());
        let fields = serde_json::to_string(&doc.fields).unwrap_or_default();
        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + 1);
        println!(
            "{}{} {}",
            id.yellow(),
            " ".repeat(padding),
            truncate_to_width(&fields, available).dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
