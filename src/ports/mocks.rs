//! Mock implementations for testing

use crate::domain::models::LeadRecord;
use crate::error::{AppError, Result};
use crate::ports::analyzer::LeadAnalyzerPort;
use crate::ports::crm::CrmPort;
use crate::ports::mail::{MailerPort, OutboundEmail};
use crate::ports::spreadsheet::SpreadsheetPort;
use crate::ports::video::{ConversationMetadata, CreateConversationRequest, VideoAgentPort};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock video-agent platform with a configurable number of leading failures
#[derive(Default)]
pub struct MockVideoAgent {
    fail_times: usize,
    metadata: ConversationMetadata,
    calls: AtomicUsize,
}

impl MockVideoAgent {
    pub fn returning(metadata: ConversationMetadata) -> Self {
        Self {
            fail_times: 0,
            metadata,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail the first `fail_times` fetches, then succeed with `metadata`
    pub fn failing_first(fail_times: usize, metadata: ConversationMetadata) -> Self {
        Self {
            fail_times,
            metadata,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always_failing() -> Self {
        Self {
            fail_times: usize::MAX,
            metadata: ConversationMetadata::default(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoAgentPort for MockVideoAgent {
    async fn fetch_conversation(&self, _conversation_id: &str) -> Result<ConversationMetadata> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_times {
            return Err(AppError::VideoAgent("simulated outage".to_string()));
        }
        Ok(self.metadata.clone())
    }

    async fn create_conversation(&self, _request: &CreateConversationRequest) -> Result<Value> {
        Ok(json!({"conversation_id": "mock-conversation"}))
    }
}

/// Mock analyzer that records how many times it was invoked
pub struct MockAnalyzer {
    record: LeadRecord,
    fail: bool,
    calls: AtomicUsize,
}

impl MockAnalyzer {
    pub fn returning(record: LeadRecord) -> Self {
        Self {
            record,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            record: LeadRecord::default(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeadAnalyzerPort for MockAnalyzer {
    async fn analyze(&self, _transcript: &str) -> Result<LeadRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Analysis("simulated analyzer failure".to_string()));
        }
        Ok(self.record.clone())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Mock mailer capturing every sent email
#[derive(Default)]
pub struct MockMailer {
    fail: bool,
    pub sent: Mutex<Vec<OutboundEmail>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailerPort for MockMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        if self.fail {
            return Err(AppError::Mail("simulated mail outage".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Mock spreadsheet capturing appended rows
#[derive(Default)]
pub struct MockSpreadsheet {
    fail: bool,
    pub rows: Mutex<Vec<Vec<String>>>,
}

impl MockSpreadsheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl SpreadsheetPort for MockSpreadsheet {
    async fn append_row(&self, values: &[String]) -> Result<()> {
        if self.fail {
            return Err(AppError::Spreadsheet("simulated append failure".to_string()));
        }
        self.rows.lock().unwrap().push(values.to_vec());
        Ok(())
    }
}

/// Mock CRM capturing created leads
#[derive(Default)]
pub struct MockCrm {
    fail: bool,
    pub created: Mutex<Vec<LeadRecord>>,
}

impl MockCrm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl CrmPort for MockCrm {
    async fn create_lead(&self, lead: &LeadRecord) -> Result<String> {
        if self.fail {
            return Err(AppError::Crm("simulated CRM rejection".to_string()));
        }
        self.created.lock().unwrap().push(lead.clone());
        Ok("lead-001".to_string())
    }
}
