use serde::{Deserialize, Serialize};

/// Reason recorded when no recipient could be found for a business.
pub const SKIP_REASON_NO_EMAIL: &str = "No email found";

/// What happened when outreach was attempted for one business.
///
/// Serialized flat into [`OutreachResult`] with a `status` tag, e.g.
/// `{"company": "...", "status": "sent", "email": "info@acme.com"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutreachOutcome {
    Sent { email: String },
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachResult {
    pub company: String,
    #[serde(flatten)]
    pub outcome: OutreachOutcome,
}

impl OutreachResult {
    #[must_use]
    pub fn sent(company: &str, email: &str) -> Self {
        Self {
            company: company.to_owned(),
            outcome: OutreachOutcome::Sent {
                email: email.to_owned(),
            },
        }
    }

    #[must_use]
    pub fn skipped(company: &str, reason: &str) -> Self {
        Self {
            company: company.to_owned(),
            outcome: OutreachOutcome::Skipped {
                reason: reason.to_owned(),
            },
        }
    }

    #[must_use]
    pub fn failed(company: &str, error: impl Into<String>) -> Self {
        Self {
            company: company.to_owned(),
            outcome: OutreachOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// Recipient address, present only for sent results.
    #[must_use]
    pub fn recipient(&self) -> Option<&str> {
        match &self.outcome {
            OutreachOutcome::Sent { email } => Some(email),
            OutreachOutcome::Skipped { .. } | OutreachOutcome::Failed { .. } => None,
        }
    }
}

/// Per-run outreach summary written to `email_results.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachReport {
    pub success: u32,
    pub failed: u32,
    pub details: Vec<OutreachResult>,
}

impl OutreachReport {
    /// Appends a result and bumps the matching counter. Skips do not count
    /// towards either total.
    pub fn record(&mut self, result: OutreachResult) {
        match result.outcome {
            OutreachOutcome::Sent { .. } => self.success = self.success.saturating_add(1),
            OutreachOutcome::Failed { .. } => self.failed = self.failed.saturating_add(1),
            OutreachOutcome::Skipped { .. } => {}
        }
        self.details.push(result);
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.details
            .iter()
            .filter(|r| matches!(r.outcome, OutreachOutcome::Skipped { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sent_result_serializes_flat_with_status_tag() {
        let r = OutreachResult::sent("Ada Tekstil", "info@adatekstil.com.tr");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "company": "Ada Tekstil",
                "status": "sent",
                "email": "info@adatekstil.com.tr"
            })
        );
    }

    #[test]
    fn skipped_result_carries_reason_and_no_recipient() {
        let r = OutreachResult::skipped("Ada Tekstil", SKIP_REASON_NO_EMAIL);
        assert!(r.recipient().is_none());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "No email found");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn failed_result_carries_error_and_no_recipient() {
        let r = OutreachResult::failed("Ada Tekstil", "mailgun rejected message");
        assert!(r.recipient().is_none());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "mailgun rejected message");
    }

    #[test]
    fn report_counts_sent_and_failed_but_not_skipped() {
        let mut report = OutreachReport::default();
        report.record(OutreachResult::sent("a", "info@a.com"));
        report.record(OutreachResult::skipped("b", SKIP_REASON_NO_EMAIL));
        report.record(OutreachResult::failed("c", "boom"));
        report.record(OutreachResult::sent("d", "sales@d.com"));

        assert_eq!(report.success, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.details.len(), 4);
        assert_eq!(report.details[3].recipient(), Some("sales@d.com"));
    }

    #[test]
    fn report_deserializes_from_snapshot_json() {
        let json = serde_json::json!({
            "success": 1,
            "failed": 0,
            "details": [
                { "company": "a", "status": "sent", "email": "info@a.com" },
                { "company": "b", "status": "skipped", "reason": "No email found" }
            ]
        });
        let report: OutreachReport = serde_json::from_value(json).unwrap();
        assert_eq!(report.details[0], OutreachResult::sent("a", "info@a.com"));
        assert_eq!(
            report.details[1],
            OutreachResult::skipped("b", SKIP_REASON_NO_EMAIL)
        );
    }
}
