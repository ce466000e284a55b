//! Ad confirmation emails, queued on a channel and delivered by one background worker

use tokio::sync::mpsc;

use crate::domain::ports::{AdConfirmationJob, ConfirmationQueue};

pub const CONFIRMATION_SUBJECT: &str = "Ad Confirmation";

/// A rendered confirmation email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ConfirmationEmail {
    pub fn new(job: &AdConfirmationJob, from: &str) -> Self {
        Self {
            from: from.to_string(),
            to: job.recipient.clone(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            body: format!(
                "Your Ad with ID {} has been received and is being processed.",
                job.ad_id
            ),
        }
    }
}

/// Delivers rendered emails
pub trait Mailer: Send + Sync + 'static {
    fn send(&self, email: &ConfirmationEmail)
    -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Writes emails to the log instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct LoggingMailer;

impl Mailer for LoggingMailer {
    async fn send(&self, email: &ConfirmationEmail) -> anyhow::Result<()> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "sending email"
        );
        Ok(())
    }
}

/// Sending half of the confirmation queue. Enqueueing never waits on delivery.
#[derive(Debug, Clone)]
pub struct EmailQueue {
    sender: mpsc::UnboundedSender<AdConfirmationJob>,
}

impl EmailQueue {
    /// Spawns the delivery worker on the current tokio runtime
    pub fn spawn<M: Mailer>(mailer: M, from: String) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(mailer, from, receiver));
        Self { sender }
    }
}

impl ConfirmationQueue for EmailQueue {
    fn enqueue(&self, job: AdConfirmationJob) {
        let ad_id = job.ad_id;
        if let Err(err) = self.sender.send(job) {
            tracing::error!(error = %err, %ad_id, "confirmation email worker is gone");
        } else {
            tracing::debug!(%ad_id, "queued ad confirmation email");
        }
    }
}

async fn run_worker<M: Mailer>(
    mailer: M,
    from: String,
    mut receiver: mpsc::UnboundedReceiver<AdConfirmationJob>,
) {
    while let Some(job) = receiver.recv().await {
        let email = ConfirmationEmail::new(&job, &from);
        if let Err(err) = mailer.send(&email).await {
            tracing::error!(error = ?err, ad_id = %job.ad_id, "failed to send ad confirmation email");
        }
    }
    tracing::info!("confirmation email worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct ChannelMailer(mpsc::UnboundedSender<ConfirmationEmail>);

    impl Mailer for ChannelMailer {
        async fn send(&self, email: &ConfirmationEmail) -> anyhow::Result<()> {
            self.0.send(email.clone())?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn worker_delivers_rendered_email() {
        let (sent, mut delivered) = mpsc::unbounded_channel();
        let queue = EmailQueue::spawn(ChannelMailer(sent), "noreply@classifieds.local".to_string());

        let ad_id = Uuid::now_v7();
        queue.enqueue(AdConfirmationJob {
            ad_id,
            recipient: "ada@example.com".to_string(),
        });

        let email = delivered.recv().await.unwrap();
        assert_eq!(
            email,
            ConfirmationEmail {
                from: "noreply@classifieds.local".to_string(),
                to: "ada@example.com".to_string(),
                subject: "Ad Confirmation".to_string(),
                body: format!("Your Ad with ID {ad_id} has been received and is being processed."),
            }
        );
    }
}
