//! # Academy Architecture
//!
//! Academy is the **content layer of a coaching institute's public website**. Every page
//! is driven by documents in an external store: site settings, page content, and the
//! notices, events, courses, faculty, gallery, results, testimonials and FAQ collections.
//! Visitors can also write to three collections through forms.
//!
//! It is a library that happens to have a CLI client. The CLI builds static HTML and
//! replays visitor input against a page; a browser front end could drive the same
//! controllers.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints pages and outcomes              │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Site (site.rs) and Page Controllers (pages/)               │
//! │  - Load data, track filter/search/overlay state             │
//! │  - Build view structs, render through render/               │
//! │  - Forms (forms.rs): validate, submit, report               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data Access Facade (api.rs, query.rs)                      │
//! │  - fetch_* propagate failures, get_* degrade to empty       │
//! │  - Decodes documents into typed records (model.rs)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DocumentStore trait                             │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! Below the CLI, code never writes to stdout or stderr and never exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Page States
//!
//! Every content region is in one of four states: loading, rendered, empty or failed.
//! A failed fetch always ends in the failed state with a user-facing message, never a
//! blank region. See [`pages::PageState`].
//!
//! ## Module Overview
//!
//! - [`api`]: the data access facade
//! - [`query`]: filters, ordering and limits applied to document lists
//! - [`store`]: storage abstraction and implementations
//! - [`model`]: typed records and fallback helpers
//! - [`pages`]: one controller per page, plus the shared navbar and footer
//! - [`forms`]: admission, contact and testimonial forms
//! - [`render`]: embedded templates and the site theme
//! - [`format`], [`validate`]: text, date, currency and phone helpers
//! - [`timing`]: debounce and throttle for search input
//! - [`site`], [`init`]: wiring for clients
//! - [`config`], [`error`]

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod init;
pub mod model;
pub mod pages;
pub mod query;
pub mod render;
pub mod site;
pub mod store;
pub mod timing;
pub mod validate;
