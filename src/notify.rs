//! Mock outbound email.
//!
//! Messages are composed, logged, and parked in the `outbox`
//! collection; nothing ever leaves the process. Real delivery is a
//! non-goal.

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::store::{JsonStore, StoredRecord};

pub const OUTBOX_COLLECTION: &str = "outbox";

/// Where coordination notifications would be delivered, were delivery
/// real.
const NOTIFICATIONS_ADDRESS: &str = "alerts@sanrakshak.example";

/// A composed, undelivered email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Account events worth notifying about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEvent {
    Login,
    Signup,
}

impl AccountEvent {
    fn as_str(&self) -> &'static str {
        match self {
            AccountEvent::Login => "login",
            AccountEvent::Signup => "signup",
        }
    }
}

/// Composes notifications and files them in the outbox.
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    store: JsonStore,
}

impl OutboxNotifier {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Notification for a login or signup.
    pub fn account_event(
        &self,
        email: &str,
        event: AccountEvent,
        name: Option<&str>,
    ) -> Result<StoredRecord<OutboundEmail>, StoreError> {
        let subject = format!("New {} on Sanrakshak", event.as_str());
        let mut body = format!(
            "User {} has {} on Sanrakshak",
            email,
            match event {
                AccountEvent::Login => "logged in",
                AccountEvent::Signup => "signed up",
            }
        );
        if let Some(name) = name {
            body.push_str(&format!(" with name {}", name));
        }
        body.push('.');
        self.file(subject, body)
    }

    /// Notification for a completed registration.
    pub fn registration(
        &self,
        kind: &str,
        name: &str,
        contact_person: &str,
        email: &str,
    ) -> Result<StoredRecord<OutboundEmail>, StoreError> {
        let subject = format!("New {} Registration: {}", kind, name);
        let body = format!(
            "A new {} has registered on Sanrakshak:\nName: {}\nContact Person: {}\nEmail: {}",
            kind, name, contact_person, email
        );
        self.file(subject, body)
    }

    /// Urgent notification for an emergency help request.
    pub fn emergency(&self) -> Result<StoredRecord<OutboundEmail>, StoreError> {
        self.file(
            "URGENT: Emergency Help Requested".to_string(),
            "Someone has requested emergency assistance through the Sanrakshak platform. \
             Please respond immediately."
                .to_string(),
        )
    }

    fn file(&self, subject: String, body: String) -> Result<StoredRecord<OutboundEmail>, StoreError> {
        let email = OutboundEmail {
            to: NOTIFICATIONS_ADDRESS.to_string(),
            subject,
            body,
        };
        let stored = self.store.append(OUTBOX_COLLECTION, email)?;
        info!(
            "Notify: filed '{}' for {} in the outbox",
            stored.record.subject, stored.record.to
        );
        Ok(stored)
    }
}
