use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "academy", bin_name = "academy", version)]
#[command(about = "Build and browse a coaching institute website from its document store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json and the document collections
    #[arg(long, global = true, env = "ACADEMY_DATA", default_value = "site-data", help_heading = "Options")]
    pub data: PathBuf,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory with a config file and starter page documents
    Init,

    /// Render every page to static HTML files
    Build {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        out: PathBuf,
    },

    /// Render one page, optionally after simulating visitor input
    Page {
        /// Page slug or file name (e.g. notices, index.html)
        page: String,

        /// Apply a filter button, as facet=value (repeatable)
        #[arg(long = "filter", value_name = "FACET=VALUE")]
        filters: Vec<String>,

        /// Type into the search box
        #[arg(long)]
        search: Option<String>,

        /// Press "load more" this many times
        #[arg(long, default_value_t = 0)]
        more: usize,

        /// Open the detail overlay for a record id
        #[arg(long, value_name = "ID")]
        open: Option<String>,

        /// Press a key while the overlay is open (escape, left, right)
        #[arg(long)]
        key: Option<String>,

        /// Print only the page body instead of the full document
        #[arg(long)]
        body: bool,
    },

    /// Submit a form as a visitor would
    Submit {
        /// admission, contact or testimonial
        form: String,

        /// A field value, as name=value (repeatable)
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Page URL recorded with the submission
        #[arg(long)]
        page_url: Option<String>,
    },

    /// List the raw documents of a collection
    Records {
        collection: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Splits `name=value`; the value may itself contain `=`.
pub fn parse_pair(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}
