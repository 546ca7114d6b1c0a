/// Domain models for lead-relay
///
/// These models represent core business entities and are platform-agnostic.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event emitted by the video-agent platform when it tears a session down.
/// Carries no transcript, so it is acknowledged without processing.
pub const EVENT_SHUTDOWN: &str = "system.shutdown";

/// Event emitted once the platform has finished transcribing a conversation.
/// The only event that triggers the lead pipeline.
pub const EVENT_TRANSCRIPTION_READY: &str = "application.transcription_ready";

/// Inbound webhook payload, received once per invocation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    /// Transcript occasionally arrives at the top level rather than in properties
    #[serde(default)]
    pub transcript: Option<Value>,
    #[serde(default)]
    pub properties: Option<EventProperties>,
}

/// Session properties forwarded by the platform. Identity fields are set by
/// the access gate at session start and are independently verified, so they
/// outrank anything inferred from conversation text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventProperties {
    #[serde(default)]
    pub transcript: Option<Value>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl RawEvent {
    /// Transcript carried inline in the webhook payload, preferring the
    /// properties placement over the top-level one
    pub fn inline_transcript(&self) -> Option<&Value> {
        self.properties
            .as_ref()
            .and_then(|p| p.transcript.as_ref())
            .or(self.transcript.as_ref())
    }

    /// Verified identity captured at session start, if any
    pub fn verified_identity(&self) -> Option<(&str, Option<&str>)> {
        let props = self.properties.as_ref()?;
        let email = props.user_email.as_deref().filter(|e| !e.trim().is_empty())?;
        Some((email, props.user_name.as_deref().filter(|n| !n.trim().is_empty())))
    }
}

/// Structured lead record derived from one conversation.
///
/// Exactly one record exists per pipeline invocation: either produced by the
/// analysis collaborator or synthesized by `short_session`. All fields
/// deserialize with defaults so a partial analyzer response still parses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadRecord {
    pub lead_name: String,
    pub role: String,
    pub company_name: String,
    pub lead_email: String,
    pub lead_phone: String,
    pub budget_range: String,
    pub timeline: String,
    pub pain_points: Vec<String>,
    pub buying_committee: Vec<String>,
    pub vertical: String,
    pub team_size: String,
    pub geography: String,
    pub current_systems: String,
    pub sales_plan: String,
    /// Suggested next step for the conversational agent itself
    pub agent_action: String,
    /// Suggested next step for the human sales team
    pub team_action: String,
    /// HTML body for the lead-facing follow-up email
    pub follow_up_email: String,
    /// Natural-language meeting times the agent proposed, in conversation order
    pub proposed_meeting_times: Vec<String>,
}

const UNKNOWN: &str = "Unknown";

impl LeadRecord {
    /// Fallback record for sessions where analysis was skipped or failed.
    ///
    /// Downstream code never branches on "record may be absent": whatever
    /// happens upstream, this constructor guarantees a populated record.
    pub fn short_session(transcript_chars: usize) -> Self {
        Self {
            lead_name: "Short Session User".to_string(),
            role: UNKNOWN.to_string(),
            company_name: UNKNOWN.to_string(),
            lead_email: String::new(),
            lead_phone: String::new(),
            budget_range: UNKNOWN.to_string(),
            timeline: UNKNOWN.to_string(),
            pain_points: Vec::new(),
            buying_committee: Vec::new(),
            vertical: UNKNOWN.to_string(),
            team_size: UNKNOWN.to_string(),
            geography: UNKNOWN.to_string(),
            current_systems: UNKNOWN.to_string(),
            sales_plan: format!(
                "Session ended with {} chars of transcript. May have been a test or abandoned session.",
                transcript_chars
            ),
            agent_action: "Session ended before meaningful conversation".to_string(),
            team_action: "No action needed - short session".to_string(),
            follow_up_email: "<p>Thanks for stopping by! If you have any questions, feel free to reach out.</p><p>Best,<br>The Team</p>".to_string(),
            proposed_meeting_times: Vec::new(),
        }
    }

    /// Overlay an independently-verified identity onto this record.
    ///
    /// Verified identity always wins over analyzer output; once applied it is
    /// never overwritten within the same invocation.
    pub fn apply_verified_identity(&mut self, email: &str, name: Option<&str>) {
        self.lead_email = email.to_string();
        if let Some(name) = name {
            self.lead_name = name.to_string();
        }
    }

    /// Name to address the lead by in outbound mail subjects
    pub fn salutation(&self) -> &str {
        if self.lead_name.is_empty() {
            "Hi"
        } else {
            &self.lead_name
        }
    }
}
