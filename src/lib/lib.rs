#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Campaign mail dispatcher
//!
//! Renders one personalised copy of a templated message per recipient and delivers it over a
//! single authenticated SMTP connection, optionally DKIM-signed, or previews it in dry-run mode.

pub mod domain;
pub mod infrastructure;
