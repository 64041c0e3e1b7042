#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Command-line campaign dispatcher

use std::{io, path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use mailshot::{
    domain::dispatch::Dispatcher,
    infrastructure::{
        files::{FrontMatterLoader, YamlRecipientLoader},
        smtp::{dkim::DkimConfig, SMTPConfig, SMTPConnector},
    },
};
use tracing::{info, warn};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(version, about = "Sends a templated email campaign to a list of recipients")]
pub struct Args {
    /// The email template, with optional YAML (---) or TOML (+++) front matter
    pub template: PathBuf,

    /// The recipient list (YAML or JSON)
    pub recipients: PathBuf,

    /// The SMTP configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// The DKIM signing configuration
    #[clap(flatten)]
    pub dkim: DkimConfig,

    /// Print every message instead of sending it
    #[arg(long, env = "DRY_RUN")]
    pub dry_run: bool,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load environment: {}", e);

            return Err(e.into());
        }
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let dispatcher = Dispatcher::new(
        Arc::new(FrontMatterLoader),
        Arc::new(YamlRecipientLoader),
        Arc::new(SMTPConnector::new(args.smtp, args.dkim)),
        args.dry_run,
    );

    let summary = dispatcher
        .send_campaign(&args.template, &args.recipients, &mut io::stdout())
        .await?;

    info!(
        sent = summary.sent,
        skipped = summary.skipped,
        failed = summary.failed.len(),
        "campaign finished"
    );

    if !summary.failed.is_empty() {
        warn!(recipients = ?summary.failed, "some messages were not delivered");
    }

    Ok(())
}
