//! Per-business outreach: find a contact address, render, send, record.

use prospect_core::{Business, OutreachReport, OutreachResult, SKIP_REASON_NO_EMAIL};
use prospect_scraper::EmailFinder;

use crate::template::render_message;
use crate::transport::MailTransport;

pub struct OutreachDispatcher<E, M> {
    finder: E,
    transport: Option<M>,
    subject: String,
    from_name: String,
}

impl<E: EmailFinder, M: MailTransport> OutreachDispatcher<E, M> {
    /// A dispatcher without a transport records nothing and sends nothing.
    pub fn new(finder: E, transport: Option<M>, subject: &str, from_name: &str) -> Self {
        Self {
            finder,
            transport,
            subject: subject.to_owned(),
            from_name: from_name.to_owned(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Contacts each business in order. A business is skipped when it has
    /// no website or no address can be found on it; a failed send is
    /// recorded and the loop continues.
    pub async fn dispatch(&self, businesses: &[Business]) -> OutreachReport {
        let mut report = OutreachReport::default();
        let Some(transport) = self.transport.as_ref() else {
            tracing::warn!("mail credentials not configured; skipping outreach");
            return report;
        };

        for business in businesses {
            let result = self.contact(transport, business).await;
            report.record(result);
        }

        tracing::info!(
            sent = report.success,
            failed = report.failed,
            skipped = report.skipped(),
            "outreach complete"
        );
        report
    }

    async fn contact(&self, transport: &M, business: &Business) -> OutreachResult {
        let Some(website) = business.website.as_deref() else {
            tracing::info!(company = %business.name, "no website; skipping");
            return OutreachResult::skipped(&business.name, SKIP_REASON_NO_EMAIL);
        };

        let Some(email) = self.finder.find_email(website).await else {
            tracing::info!(company = %business.name, website, "no email found; skipping");
            return OutreachResult::skipped(&business.name, SKIP_REASON_NO_EMAIL);
        };

        let message = render_message(business, &self.subject, &self.from_name);
        match transport.send(&email, &message.subject, &message.body).await {
            Ok(()) => {
                tracing::info!(company = %business.name, email = %email, "email sent");
                OutreachResult::sent(&business.name, &email)
            }
            Err(e) => {
                tracing::error!(company = %business.name, email = %email, error = %e, "email send failed");
                OutreachResult::failed(&business.name, e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
