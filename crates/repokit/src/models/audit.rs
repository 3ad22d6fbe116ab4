use chrono::{DateTime, Utc};
use repokit_core::Entity;
use serde::{Deserialize, Serialize};

/// An append-only audit record.
///
/// Carries no identity: repositories key it internally, and it can be added
/// but never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub message: String,
    pub at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            at: Utc::now(),
        }
    }
}

impl Entity for AuditEvent {}
