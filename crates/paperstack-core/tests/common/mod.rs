//! Shared test harness: memory store, manual clock, capturing mailer.
#![allow(dead_code)] // not every test binary uses every helper

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use paperstack_core::{Clock, ManualClock, PortalCore};
use paperstack_email::{EmailContent, EmailError, EmailProvider};
use paperstack_storage::{CreateDocumentParams, CreatePrincipalParams, DocumentId, DocumentKind, PrincipalId, Store};
use paperstack_store_memory::MemoryStore;

/// One captured message.
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Mailer that records everything and always succeeds.
#[derive(Default)]
pub struct CapturingMailer {
    pub sent: Mutex<Vec<SentEmail>>,
}

#[async_trait]
impl EmailProvider for CapturingMailer {
    async fn send(&self, to: &str, content: &EmailContent) -> Result<(), EmailError> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentEmail {
                to: to.to_string(),
                subject: content.subject.clone(),
                text: content.text.clone(),
            });
        Ok(())
    }
}

/// Mailer that always fails.
pub struct FailingMailer;

#[async_trait]
impl EmailProvider for FailingMailer {
    async fn send(&self, _to: &str, _content: &EmailContent) -> Result<(), EmailError> {
        Err(EmailError::SendFailed("smtp unavailable".to_string()))
    }
}

pub struct TestPortal {
    pub core: PortalCore,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
    pub mailer: Arc<CapturingMailer>,
}

impl TestPortal {
    pub fn clock_now(&self) -> chrono::DateTime<Utc> {
        self.clock.now()
    }
}

/// Portal wired to a capturing mailer.
pub fn portal() -> TestPortal {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let mailer = Arc::new(CapturingMailer::default());
    let core = PortalCore::new(store.clone(), clock.clone(), mailer.clone());
    TestPortal {
        core,
        store,
        clock,
        mailer,
    }
}

/// Portal wired to a mailer that always fails.
pub fn portal_with_broken_mail() -> TestPortal {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let core = PortalCore::new(store.clone(), clock.clone(), Arc::new(FailingMailer));
    TestPortal {
        core,
        store,
        clock,
        mailer: Arc::new(CapturingMailer::default()), // unused
    }
}

pub async fn create_principal(store: &MemoryStore, email: &str) -> PrincipalId {
    store
        .create_principal(&CreatePrincipalParams {
            display_name: "Test Account".to_string(),
            email: email.to_string(),
        })
        .await
        .unwrap()
}

pub async fn create_document(store: &MemoryStore, uploader: Option<PrincipalId>) -> DocumentId {
    store
        .create_document(&CreateDocumentParams {
            filename: "cs8501-cat1.pdf".to_string(),
            original_filename: "scan001.pdf".to_string(),
            custom_filename: "CS8501 CAT 1".to_string(),
            course_type: "UG".to_string(),
            department: "CSE".to_string(),
            semester: "5".to_string(),
            category: "CAT".to_string(),
            subject_id: None,
            subject_name: Some("Theory of Computation".to_string()),
            kind: DocumentKind::QuestionPaper,
            size: Some("1.2 MB".to_string()),
            storage_path: "uploads/cs8501-cat1.pdf".to_string(),
            uploader,
        })
        .await
        .unwrap()
}

/// Pick a wrong code that cannot collide with the right one.
pub fn wrong_code(right: &str) -> &'static str {
    if right == "111111" {
        "222222"
    } else {
        "111111"
    }
}

/// Extract the 6-digit code from a captured email body.
pub fn code_from_email(text: &str) -> String {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|chunk| chunk.len() == 6)
        .expect("email should contain a 6-digit code")
        .to_string()
}
