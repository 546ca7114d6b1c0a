//! Sink fan-out dispatch
//!
//! The three sinks run in sequence, each inside its own error boundary: a
//! failing sink is logged and recorded in the report, and the remaining
//! sinks still execute. Sink order never affects correctness, only log
//! ordering.

use crate::domain::email::{self, AlertContext};
use crate::domain::models::LeadRecord;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::ports::mail::{Attachment, MailerPort, OutboundEmail};
use crate::utils::calendar;
use chrono::Utc;
use std::fmt;

/// Per-invocation facts the sinks report alongside the record itself
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub conversation_id: String,
    pub transcript_chars: usize,
    pub recording_url: Option<String>,
}

/// Result of one sink attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    Delivered,
    Skipped(String),
    Failed(String),
}

impl SinkOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SinkOutcome::Delivered)
    }
}

impl fmt::Display for SinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkOutcome::Delivered => write!(f, "delivered"),
            SinkOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
            SinkOutcome::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Per-sink outcomes for one invocation
#[derive(Debug)]
pub struct SinkReport {
    pub email: SinkOutcome,
    pub spreadsheet: SinkOutcome,
    pub crm: SinkOutcome,
}

impl SinkReport {
    pub fn summary(&self) -> String {
        format!(
            "email={}, spreadsheet={}, crm={}",
            self.email, self.spreadsheet, self.crm
        )
    }
}

impl Pipeline {
    /// Run every sink, isolating failures from each other
    pub(crate) async fn dispatch_sinks(
        &self,
        record: &LeadRecord,
        ctx: &DispatchContext,
    ) -> SinkReport {
        let email = self.email_sink(record, ctx).await;
        let spreadsheet = self.spreadsheet_sink(record, ctx).await;
        let crm = self.crm_sink(record).await;

        SinkReport {
            email,
            spreadsheet,
            crm,
        }
    }

    /// Email is considered mandatory for lead capture, so a missing
    /// credential is a loud skip rather than a silent one.
    async fn email_sink(&self, record: &LeadRecord, ctx: &DispatchContext) -> SinkOutcome {
        let Some(mailer) = &self.mailer else {
            log::error!("Mail credential missing; cannot send lead emails");
            return SinkOutcome::Skipped("mail credential missing".to_string());
        };

        match self.send_lead_emails(mailer.as_ref(), record, ctx).await {
            Ok(()) => SinkOutcome::Delivered,
            Err(e) => {
                log::error!("Email sink failed: {}", e);
                SinkOutcome::Failed(e.to_string())
            }
        }
    }

    async fn send_lead_emails(
        &self,
        mailer: &dyn MailerPort,
        record: &LeadRecord,
        ctx: &DispatchContext,
    ) -> Result<()> {
        let config = &self.config;

        let recipient = if email::is_plausible_email(&record.lead_email) {
            record.lead_email.clone()
        } else {
            log::warn!("Lead email missing or malformed; falling back to internal address");
            config.internal_address.clone()
        };

        let attendee_name = if record.lead_name.is_empty() {
            "there"
        } else {
            &record.lead_name
        };
        let company_name = if record.company_name.is_empty() {
            "Your Company"
        } else {
            &record.company_name
        };
        let options = calendar::meeting_options(
            &record.proposed_meeting_times,
            &recipient,
            attendee_name,
            company_name,
            Utc::now(),
        );
        let attachments: Vec<Attachment> = options
            .iter()
            .enumerate()
            .map(|(idx, option)| Attachment {
                filename: format!("demo-option-{}.ics", idx + 1),
                content: option.ics.clone().into_bytes(),
            })
            .collect();

        let follow_up = OutboundEmail {
            from: config.mail_from.clone(),
            to: vec![recipient.clone(), config.internal_address.clone()],
            subject: format!("{} - Your Demo Follow-up", record.salutation()),
            html: email::render_follow_up(record, &options),
            attachments,
        };
        mailer.send(&follow_up).await?;
        log::info!(
            "Sent follow-up email to {} with {} calendar attachment(s)",
            recipient,
            options.len()
        );

        let alert = OutboundEmail {
            from: config.alert_from.clone(),
            to: vec![config.internal_address.clone()],
            subject: format!(
                "[SESSION ALERT] {} - {}",
                record.company_name, record.lead_name
            ),
            html: email::render_internal_alert(
                record,
                &AlertContext {
                    conversation_id: &ctx.conversation_id,
                    transcript_chars: ctx.transcript_chars,
                    recording_url: ctx.recording_url.as_deref(),
                },
            ),
            attachments: Vec::new(),
        };
        mailer.send(&alert).await?;
        log::info!("Sent internal session alert");

        Ok(())
    }

    /// The spreadsheet sink is optional; missing configuration is a silent
    /// skip, unlike the mail sink.
    async fn spreadsheet_sink(&self, record: &LeadRecord, ctx: &DispatchContext) -> SinkOutcome {
        let Some(spreadsheet) = &self.spreadsheet else {
            log::debug!("Spreadsheet not configured; skipping");
            return SinkOutcome::Skipped("not configured".to_string());
        };

        match spreadsheet.append_row(&lead_row(record, ctx)).await {
            Ok(()) => {
                log::info!("Saved lead row to spreadsheet");
                SinkOutcome::Delivered
            }
            Err(e) => {
                log::error!("Spreadsheet sink failed: {}", e);
                SinkOutcome::Failed(e.to_string())
            }
        }
    }

    /// Minimal qualification bar: never create junk CRM entries for
    /// records without even a name.
    async fn crm_sink(&self, record: &LeadRecord) -> SinkOutcome {
        let Some(crm) = &self.crm else {
            log::debug!("CRM sync disabled; skipping");
            return SinkOutcome::Skipped("disabled".to_string());
        };

        if record.lead_name.is_empty() {
            log::info!("Lead has no name; skipping CRM sync");
            return SinkOutcome::Skipped("unnamed lead".to_string());
        }

        match crm.create_lead(record).await {
            Ok(id) => {
                log::info!("Synced lead to CRM: {}", id);
                SinkOutcome::Delivered
            }
            Err(e) => {
                log::error!("CRM sink failed: {}", e);
                SinkOutcome::Failed(e.to_string())
            }
        }
    }
}

/// One spreadsheet row: timestamp, every lead field, recording URL
fn lead_row(record: &LeadRecord, ctx: &DispatchContext) -> Vec<String> {
    vec![
        Utc::now().to_rfc3339(),
        record.lead_name.clone(),
        record.role.clone(),
        record.company_name.clone(),
        record.lead_email.clone(),
        record.lead_phone.clone(),
        record.budget_range.clone(),
        record.timeline.clone(),
        record.pain_points.join(", "),
        record.buying_committee.join(", "),
        record.vertical.clone(),
        record.team_size.clone(),
        record.geography.clone(),
        record.current_systems.clone(),
        record.sales_plan.clone(),
        ctx.recording_url.clone().unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::ports::mocks::{MockCrm, MockMailer, MockSpreadsheet};
    use std::sync::Arc;

    fn named_record() -> LeadRecord {
        LeadRecord {
            lead_name: "Dana Reyes".to_string(),
            lead_email: "dana@example.com".to_string(),
            company_name: "Acme HVAC".to_string(),
            pain_points: vec!["missed calls".to_string(), "manual dispatch".to_string()],
            ..Default::default()
        }
    }

    fn ctx() -> DispatchContext {
        DispatchContext {
            conversation_id: "c1".to_string(),
            transcript_chars: 420,
            recording_url: Some("https://recordings.example.com/c1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_mail_failure_does_not_block_other_sinks() {
        let mailer = Arc::new(MockMailer::failing());
        let sheet = Arc::new(MockSpreadsheet::new());
        let crm = Arc::new(MockCrm::new());
        let pipeline = Pipeline::new(Arc::new(AppConfig::default()))
            .with_mailer(mailer.clone())
            .with_spreadsheet(sheet.clone())
            .with_crm(crm.clone());

        let report = pipeline.dispatch_sinks(&named_record(), &ctx()).await;

        assert!(matches!(report.email, SinkOutcome::Failed(_)));
        assert!(report.spreadsheet.is_delivered());
        assert!(report.crm.is_delivered());
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(crm.created_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_mail_credential_is_loud_skip() {
        let pipeline = Pipeline::new(Arc::new(AppConfig::default()));
        let report = pipeline.dispatch_sinks(&named_record(), &ctx()).await;
        assert_eq!(
            report.email,
            SinkOutcome::Skipped("mail credential missing".to_string())
        );
        assert_eq!(
            report.spreadsheet,
            SinkOutcome::Skipped("not configured".to_string())
        );
        assert_eq!(report.crm, SinkOutcome::Skipped("disabled".to_string()));
    }

    #[tokio::test]
    async fn test_sends_follow_up_and_internal_alert() {
        let mailer = Arc::new(MockMailer::new());
        let pipeline = Pipeline::new(Arc::new(AppConfig::default())).with_mailer(mailer.clone());

        let report = pipeline.dispatch_sinks(&named_record(), &ctx()).await;
        assert!(report.email.is_delivered());

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to[0], "dana@example.com");
        assert_eq!(sent[0].subject, "Dana Reyes - Your Demo Follow-up");
        assert!(sent[1].subject.starts_with("[SESSION ALERT]"));
        assert_eq!(sent[1].to.len(), 1);
        assert!(sent[1].html.contains("420 chars"));
    }

    #[tokio::test]
    async fn test_malformed_lead_email_falls_back_to_internal_address() {
        let mailer = Arc::new(MockMailer::new());
        let config = AppConfig::default();
        let internal = config.internal_address.clone();
        let pipeline = Pipeline::new(Arc::new(config)).with_mailer(mailer.clone());

        let record = LeadRecord {
            lead_email: "not-an-email".to_string(),
            ..named_record()
        };
        pipeline.dispatch_sinks(&record, &ctx()).await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent[0].to[0], internal);
    }

    #[tokio::test]
    async fn test_calendar_attachments_for_proposed_times() {
        let mailer = Arc::new(MockMailer::new());
        let pipeline = Pipeline::new(Arc::new(AppConfig::default())).with_mailer(mailer.clone());

        let record = LeadRecord {
            proposed_meeting_times: vec!["Tuesday at 2pm".to_string()],
            ..named_record()
        };
        pipeline.dispatch_sinks(&record, &ctx()).await;

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent[0].attachments.len(), 1);
        assert_eq!(sent[0].attachments[0].filename, "demo-option-1.ics");
        assert!(sent[0].html.contains("Schedule Your Demo"));
    }

    #[tokio::test]
    async fn test_crm_skips_unnamed_lead() {
        let crm = Arc::new(MockCrm::new());
        let pipeline = Pipeline::new(Arc::new(AppConfig::default())).with_crm(crm.clone());

        let record = LeadRecord {
            lead_name: String::new(),
            ..named_record()
        };
        let report = pipeline.dispatch_sinks(&record, &ctx()).await;

        assert_eq!(report.crm, SinkOutcome::Skipped("unnamed lead".to_string()));
        assert_eq!(crm.created_count(), 0);
    }

    #[test]
    fn test_lead_row_layout() {
        let row = lead_row(&named_record(), &ctx());
        assert_eq!(row.len(), 16);
        assert_eq!(row[1], "Dana Reyes");
        assert_eq!(row[8], "missed calls, manual dispatch");
        assert_eq!(row[15], "https://recordings.example.com/c1");

        let no_recording = DispatchContext {
            recording_url: None,
            ..ctx()
        };
        let row = lead_row(&named_record(), &no_recording);
        assert_eq!(row[15], "");
    }
}
