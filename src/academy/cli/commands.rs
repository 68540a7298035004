//! # CLI Layer
//!
//! One client of the `academy` library. This is the only place that knows about
//! terminal output, exit codes and argument parsing; everything it does goes through
//! [`academy::site::Site`].
//!
//! - `run()`: parses arguments, sets up logging and the runtime, dispatches
//! - `handle_*()`: one per subcommand
//! - `print_*()` (in `print.rs`): output formatting

use super::print::{print_documents, print_outcome, print_written};
use super::setup::{parse_pair, Cli, Commands};
use academy::error::{AcademyError, Result};
use academy::forms::FormKind;
use academy::init::{initialize, seed, SiteContext};
use academy::pages::{Key, Page, UiEvent};
use academy::query::Query;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(cli))
}

/// Logs go to stderr so page output on stdout stays clean. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "academy=warn",
        1 => "academy=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    if let Commands::Init = cli.command {
        return handle_init(&cli.data).await;
    }

    let site = initialize(&cli.data)?;
    debug!(data = %cli.data.display(), "opened site");

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Build { out } => handle_build(&site, out).await,
        Commands::Page {
            page,
            filters,
            search,
            more,
            open,
            key,
            body,
        } => {
            let interactions = Interactions {
                filters,
                search,
                more,
                open,
                key,
            };
            handle_page(&site, &page, interactions, body).await
        }
        Commands::Submit {
            form,
            fields,
            page_url,
        } => handle_submit(&site, &form, &fields, page_url.as_deref()).await,
        Commands::Records { collection, limit } => {
            handle_records(&site, &collection, limit).await
        }
    }
}

async fn handle_init(data: &Path) -> Result<()> {
    let added = seed(data).await?;
    println!(
        "{}",
        format!("Initialized site data in {}", data.display()).green()
    );
    if added > 0 {
        println!("{}", format!("Added {added} starter documents.").dimmed());
    }
    Ok(())
}

async fn handle_build(site: &SiteContext, out: PathBuf) -> Result<()> {
    let written = site.build(&out).await?;
    print_written(&written);
    Ok(())
}

/// Visitor input replayed against a page before it is printed, in this order.
struct Interactions {
    filters: Vec<String>,
    search: Option<String>,
    more: usize,
    open: Option<String>,
    key: Option<String>,
}

impl Interactions {
    fn into_events(self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();
        for raw in &self.filters {
            let (facet, value) = parse_pair(raw).ok_or_else(|| {
                AcademyError::Validation(format!("Expected FACET=VALUE, got {raw:?}"))
            })?;
            events.push(UiEvent::Filter { facet, value });
        }
        if let Some(term) = self.search {
            events.push(UiEvent::Search(term));
        }
        events.extend(std::iter::repeat(UiEvent::LoadMore).take(self.more));
        if let Some(id) = self.open {
            events.push(UiEvent::Click { item: Some(id) });
        }
        if let Some(key) = self.key {
            events.push(UiEvent::Key(key.parse::<Key>()?));
        }
        Ok(events)
    }
}

async fn handle_page(
    site: &SiteContext,
    page: &str,
    interactions: Interactions,
    body_only: bool,
) -> Result<()> {
    let page: Page = page.parse()?;
    let events = interactions.into_events()?;

    let mut loaded = site.open(page).await;
    for event in events {
        let update = loaded.handle(event.clone(), site.renderer())?;
        debug!(?event, changed = update.is_some(), "applied event");
    }

    let html = if body_only {
        loaded.render_body(site.renderer())?
    } else {
        loaded.render(site.renderer())?
    };
    println!("{html}");
    Ok(())
}

async fn handle_submit(
    site: &SiteContext,
    form: &str,
    raw_fields: &[String],
    page_url: Option<&str>,
) -> Result<()> {
    let kind: FormKind = form.parse()?;
    let fields = raw_fields
        .iter()
        .map(|raw| {
            parse_pair(raw).ok_or_else(|| {
                AcademyError::Validation(format!("Expected NAME=VALUE, got {raw:?}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (outcome, mut loaded) = site.submit(kind, &fields, page_url).await?;
    let banner = loaded.form_mut().and_then(|f| f.banner().cloned());
    print_outcome(&outcome, banner.as_ref());

    if outcome.is_submitted() {
        Ok(())
    } else {
        Err(AcademyError::Submission(format!(
            "the {kind} form was not submitted"
        )))
    }
}

async fn handle_records(site: &SiteContext, collection: &str, limit: Option<usize>) -> Result<()> {
    let query = match limit {
        Some(n) => Query::new().limit(n),
        None => Query::new(),
    };
    let docs = site.api().fetch_documents(collection, &query).await?;
    print_documents(&docs);
    Ok(())
}
