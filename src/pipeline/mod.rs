//! The lead pipeline
//!
//! One invocation per webhook event: normalize the transcript, enrich it from
//! the platform under retry, derive a lead record (analysis or fallback),
//! overlay verified identity, and fan out to the sinks. The pipeline itself
//! never fails; every collaborator error is absorbed and logged so the
//! invocation always reaches an acknowledgement.

pub mod dispatch;
pub mod enrichment;

use crate::config::AppConfig;
use crate::domain::models::{LeadRecord, RawEvent};
use crate::domain::transcript;
use crate::ports::analyzer::LeadAnalyzerPort;
use crate::ports::crm::CrmPort;
use crate::ports::mail::MailerPort;
use crate::ports::spreadsheet::SpreadsheetPort;
use crate::ports::video::VideoAgentPort;
use dispatch::{DispatchContext, SinkReport};
use enrichment::RetryPolicy;
use std::sync::Arc;

/// The webhook processing pipeline.
///
/// Collaborator handles are injected once at startup; a missing handle means
/// the corresponding credential is not configured and the step is skipped.
pub struct Pipeline {
    config: Arc<AppConfig>,
    video: Option<Arc<dyn VideoAgentPort>>,
    analyzer: Option<Arc<dyn LeadAnalyzerPort>>,
    mailer: Option<Arc<dyn MailerPort>>,
    spreadsheet: Option<Arc<dyn SpreadsheetPort>>,
    crm: Option<Arc<dyn CrmPort>>,
    retry: RetryPolicy,
}

/// In-memory outcome of one invocation, used for logging only
#[derive(Debug)]
pub struct PipelineReport {
    pub conversation_id: String,
    pub transcript_chars: usize,
    pub analyzed: bool,
    pub sinks: SinkReport,
}

impl Pipeline {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            video: None,
            analyzer: None,
            mailer: None,
            spreadsheet: None,
            crm: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_video(mut self, video: Arc<dyn VideoAgentPort>) -> Self {
        self.video = Some(video);
        self
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn LeadAnalyzerPort>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn MailerPort>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_spreadsheet(mut self, spreadsheet: Arc<dyn SpreadsheetPort>) -> Self {
        self.spreadsheet = Some(spreadsheet);
        self
    }

    pub fn with_crm(mut self, crm: Arc<dyn CrmPort>) -> Self {
        self.crm = Some(crm);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Process one transcription-ready event end to end
    pub async fn run(&self, event: &RawEvent) -> PipelineReport {
        let conversation_id = event
            .conversation_id
            .clone()
            .unwrap_or_else(|| "unknown".to_string());

        // Stage 1: normalize whatever transcript the payload carried
        let mut transcript_text = match event.inline_transcript() {
            Some(raw) => {
                let text = transcript::normalize(raw);
                log::info!(
                    "Found transcript in webhook payload ({} chars normalized)",
                    text.len()
                );
                text
            }
            None => String::new(),
        };

        // Stage 2: enrich with platform metadata under retry
        let mut recording_url: Option<String> = None;
        match &self.video {
            Some(video) => {
                match enrichment::fetch_with_retry(video.as_ref(), &conversation_id, &self.retry)
                    .await
                {
                    Some(metadata) => {
                        if let Some(url) = metadata.recording_url {
                            log::info!("Captured public recording URL");
                            recording_url = Some(url);
                        }
                        if let Some(raw) = metadata.transcript {
                            let enriched = transcript::normalize(&raw);
                            let before = transcript_text.len();
                            transcript_text = transcript::prefer_longer(
                                transcript_text,
                                enriched,
                                self.config.prefer_longer_transcript,
                            );
                            if transcript_text.len() != before {
                                log::info!(
                                    "Enriched transcript from platform ({} chars)",
                                    transcript_text.len()
                                );
                            }
                        }
                    }
                    None => log::warn!(
                        "Metadata enrichment unavailable; continuing with payload transcript"
                    ),
                }
            }
            None => log::debug!("No platform credential configured; skipping metadata enrichment"),
        }

        let transcript_chars = transcript_text.chars().count();

        // Stage 3: analysis, gated on transcript length and credential
        let mut analyzed = false;
        let mut record: Option<LeadRecord> = None;
        if transcript_chars >= self.config.min_transcript_chars {
            match &self.analyzer {
                Some(analyzer) => {
                    log::info!(
                        "Analyzing {} chars with {}",
                        transcript_chars,
                        analyzer.provider_name()
                    );
                    match analyzer.analyze(&transcript_text).await {
                        Ok(derived) => {
                            log::info!("Lead analysis completed");
                            analyzed = true;
                            record = Some(derived);
                        }
                        Err(e) => {
                            log::error!("Lead analysis failed: {}; continuing with fallback data", e)
                        }
                    }
                }
                None => log::warn!("No analysis credential configured; using fallback data"),
            }
        } else {
            log::info!(
                "Transcript too short for analysis ({} chars); using fallback data",
                transcript_chars
            );
        }

        // Stage 4: guarantee a record exists from here on
        let mut record = record.unwrap_or_else(|| LeadRecord::short_session(transcript_chars));

        // Stage 5: verified identity outranks anything the analyzer inferred
        if let Some((email, name)) = event.verified_identity() {
            record.apply_verified_identity(email, name);
            log::info!("Enforcing verified user identity: {}", email);
        }

        // Stage 6: fan out to the sinks
        let ctx = DispatchContext {
            conversation_id: conversation_id.clone(),
            transcript_chars,
            recording_url,
        };
        let sinks = self.dispatch_sinks(&record, &ctx).await;

        PipelineReport {
            conversation_id,
            transcript_chars,
            analyzed,
            sinks,
        }
    }
}
