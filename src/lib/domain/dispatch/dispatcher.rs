//! Campaign dispatcher

use std::{io::Write, path::Path, sync::Arc, time::Duration};

use tracing::{info, warn};

use crate::domain::{
    campaigns::{CampaignHeaders, CampaignLoader, CompiledTemplate, Metadata, RenderContext},
    dispatch::{
        errors::{DispatchError, SendError},
        Connection, Connector, OutboundMessage,
    },
    recipients::{Recipient, RecipientLoader},
};

/// Pause after every recipient, previewed or sent, to stay under relay quotas.
pub const THROTTLE_DELAY: Duration = Duration::from_millis(200);

/// Line written before and after every previewed message
pub const PREVIEW_DELIMITER: &str = "---------";

/// Outcome of a campaign that ran to completion
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Messages handed to the transport
    pub sent: usize,

    /// Messages previewed instead of sent
    pub skipped: usize,

    /// Addresses whose message could not be delivered, in recipient order
    pub failed: Vec<String>,
}

impl DispatchSummary {
    /// Number of recipients processed
    pub fn processed(&self) -> usize {
        self.sent + self.skipped + self.failed.len()
    }
}

/// Everything the send loop needs, loaded and resolved up front
struct Job<'a> {
    template: &'a CompiledTemplate,
    metadata: &'a Metadata,
    headers: &'a CampaignHeaders,
    recipients: &'a [Recipient],
}

/// Sends one campaign at a time, one recipient at a time.
#[derive(Debug)]
pub struct Dispatcher<C, R, T>
where
    C: CampaignLoader,
    R: RecipientLoader,
    T: Connector,
{
    campaigns: Arc<C>,
    recipients: Arc<R>,
    connector: Arc<T>,
    dry_run: bool,
}

impl<C, R, T> Dispatcher<C, R, T>
where
    C: CampaignLoader,
    R: RecipientLoader,
    T: Connector,
{
    /// Creates a new dispatcher. With `dry_run` set, messages are written to the preview sink
    /// and no connection is ever opened.
    pub fn new(campaigns: Arc<C>, recipients: Arc<R>, connector: Arc<T>, dry_run: bool) -> Self {
        Self {
            campaigns,
            recipients,
            connector,
            dry_run,
        }
    }

    /// Sends the campaign in `template_path` to everyone in `recipients_path`.
    ///
    /// Loading, compiling, header resolution, connecting and rendering errors are fatal and
    /// returned as is. A live send also needs a `from` address; a dry run previews an empty
    /// `From:` instead. A failed delivery only affects its own recipient: it is logged, listed
    /// in [`DispatchSummary::failed`] and the loop moves on.
    ///
    /// # Arguments
    /// * `template_path` - The template file, with optional front matter.
    /// * `recipients_path` - The recipient list.
    /// * `preview` - Where dry-run previews are written.
    pub async fn send_campaign<W>(
        &self,
        template_path: &Path,
        recipients_path: &Path,
        preview: &mut W,
    ) -> Result<DispatchSummary, DispatchError>
    where
        W: Write + Send,
    {
        info!(path = %template_path.display(), "loading template");
        let campaign = self.campaigns.load_campaign(template_path).await?;
        let template = CompiledTemplate::compile(&campaign.body)?;

        info!(path = %recipients_path.display(), "loading recipients");
        let recipients = self.recipients.load_recipients(recipients_path).await?;

        let headers = campaign.metadata.headers()?;
        if !self.dry_run {
            headers.sender()?;
        }

        let job = Job {
            template: &template,
            metadata: &campaign.metadata,
            headers: &headers,
            recipients: &recipients,
        };

        if self.dry_run {
            return run(&job, None, preview).await;
        }

        let mut connection = self.connector.connect().await?;
        let result = run(&job, Some(&mut connection), preview).await;
        connection.close().await;

        result
    }
}

async fn run<W>(
    job: &Job<'_>,
    mut connection: Option<&mut Box<dyn Connection>>,
    preview: &mut W,
) -> Result<DispatchSummary, DispatchError>
where
    W: Write + Send,
{
    let mut summary = DispatchSummary::default();

    for recipient in job.recipients {
        let body = job
            .template
            .render(&RenderContext::new(recipient, job.metadata))?;

        info!(to = recipient.email(), "sending email");

        let outcome = match recipient.mailbox() {
            Ok(to) => {
                let message = OutboundMessage::new(
                    to,
                    job.headers.from.clone(),
                    job.headers.subject.clone(),
                    body,
                );

                match connection.as_mut() {
                    Some(connection) => transmit(connection, &message).await.map(|_| true),
                    None => {
                        write_preview(preview, &message)?;
                        Ok(false)
                    }
                }
            }
            Err(e) => Err(SendError::from(e)),
        };

        match outcome {
            Ok(true) => summary.sent += 1,
            Ok(false) => summary.skipped += 1,
            Err(e) => {
                warn!(to = recipient.email(), error = %e, "could not send email");
                summary.failed.push(recipient.email().to_string());
            }
        }

        tokio::time::sleep(THROTTLE_DELAY).await;
    }

    Ok(summary)
}

async fn transmit(
    connection: &mut Box<dyn Connection>,
    message: &OutboundMessage,
) -> Result<(), SendError> {
    connection.send(message.build()?).await
}

fn write_preview<W: Write>(sink: &mut W, message: &OutboundMessage) -> std::io::Result<()> {
    writeln!(sink, "{PREVIEW_DELIMITER}")?;
    writeln!(sink, "{message}")?;
    writeln!(sink, "{PREVIEW_DELIMITER}")?;
    sink.flush()
}
