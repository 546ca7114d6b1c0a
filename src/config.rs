//! Environment-driven application configuration
//!
//! Every external collaborator is optional: its adapter is only constructed
//! when the relevant credential is present. Defaults keep a bare process
//! bootable for local development.

use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_VIDEO_API_URL: &str = "https://tavusapi.com/v2";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_MAIL_FROM: &str = "Lead Relay <onboarding@resend.dev>";
const DEFAULT_ALERT_FROM: &str = "Lead Relay Alerts <onboarding@resend.dev>";
const DEFAULT_INTERNAL_TO: &str = "leads@lead-relay.dev";
const DEFAULT_MIN_TRANSCRIPT_CHARS: usize = 50;

/// Application configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to
    pub bind_addr: String,
    /// Public base URL of this deployment, used for webhook callbacks
    pub public_base_url: Option<String>,

    /// Video-agent platform (conversation metadata + session creation)
    pub video_api_url: String,
    pub video_api_key: Option<String>,
    pub video_persona_id: Option<String>,

    /// Lead analysis collaborator
    pub openai_api_key: Option<String>,
    pub openai_model: String,

    /// Mail sink
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub alert_from: String,
    pub internal_address: String,

    /// Spreadsheet sink
    pub sheet_id: Option<String>,
    pub sheets_access_token: Option<String>,

    /// CRM sink
    pub crm_enabled: bool,
    pub crm_login_url: Option<String>,
    pub crm_client_id: Option<String>,
    pub crm_client_secret: Option<String>,

    /// Access-gate shared token
    pub demo_access_token: Option<String>,

    /// Minimum normalized transcript length before analysis is attempted
    pub min_transcript_chars: usize,
    /// Keep whichever transcript source is longer when both are present
    pub prefer_longer_transcript: bool,

    /// Operator-supplied conversational context for new sessions
    pub agent_context: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            public_base_url: None,
            video_api_url: DEFAULT_VIDEO_API_URL.to_string(),
            video_api_key: None,
            video_persona_id: None,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            resend_api_key: None,
            mail_from: DEFAULT_MAIL_FROM.to_string(),
            alert_from: DEFAULT_ALERT_FROM.to_string(),
            internal_address: DEFAULT_INTERNAL_TO.to_string(),
            sheet_id: None,
            sheets_access_token: None,
            crm_enabled: false,
            crm_login_url: None,
            crm_client_id: None,
            crm_client_secret: None,
            demo_access_token: None,
            min_transcript_chars: DEFAULT_MIN_TRANSCRIPT_CHARS,
            prefer_longer_transcript: true,
            agent_context: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: env_or("BIND_ADDR", &defaults.bind_addr),
            public_base_url: env_opt("PUBLIC_BASE_URL").map(|u| u.trim_end_matches('/').to_string()),
            video_api_url: env_or("TAVUS_API_URL", &defaults.video_api_url),
            video_api_key: env_opt("TAVUS_API_KEY"),
            video_persona_id: env_opt("TAVUS_PERSONA_ID"),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_model: env_or("OPENAI_MODEL", &defaults.openai_model),
            resend_api_key: env_opt("RESEND_API_KEY"),
            mail_from: env_or("MAIL_FROM", &defaults.mail_from),
            alert_from: env_or("MAIL_ALERT_FROM", &defaults.alert_from),
            internal_address: env_or("MAIL_INTERNAL_TO", &defaults.internal_address),
            sheet_id: env_opt("GOOGLE_SHEET_ID"),
            sheets_access_token: env_opt("GOOGLE_SHEETS_TOKEN"),
            crm_enabled: env_opt("SALESFORCE_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            crm_login_url: env_opt("SALESFORCE_LOGIN_URL"),
            crm_client_id: env_opt("SALESFORCE_CLIENT_ID"),
            crm_client_secret: env_opt("SALESFORCE_CLIENT_SECRET"),
            demo_access_token: env_opt("DEMO_ACCESS_TOKEN"),
            min_transcript_chars: env_opt("MIN_TRANSCRIPT_CHARS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_transcript_chars),
            prefer_longer_transcript: env_opt("PREFER_LONGER_TRANSCRIPT")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            agent_context: env_opt("AGENT_CONTEXT"),
        }
    }

    /// Webhook callback URL for newly created sessions, when a public URL is known
    pub fn webhook_callback_url(&self) -> Option<String> {
        self.public_base_url
            .as_ref()
            .map(|base| format!("{}/webhook", base))
    }
}

/// Read an environment variable, treating empty values as unset
fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Parse a boolean feature flag the way ops teams actually write them
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
