//! Audit logging.
//!
//! Structured records for data changes and authentication, emitted on the
//! `audit` tracing target so the subscriber can route them separately.
//!
//! # Example
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new(Some("7".to_string()), "user.update", Some("user:7".to_string()), AuditOutcome::Success)
//!     .with_summary("Email: 'a@x.com' -> 'b@x.com'")
//!     .with_details(json!({"field": "email"}))
//!     .log();
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    /// Refused for lack of valid credentials
    Denied,
}

/// One audit record. Build it, then call [`AuditEvent::log`].
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Acting or affected user, when known
    pub user_id: Option<String>,
    /// Dotted action name, e.g. `user.create`
    pub action: String,
    /// Resource reference, e.g. `user:42`
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    /// One human-readable line describing the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        user_id: Option<String>,
        action: impl Into<String>,
        resource: Option<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            user_id,
            action: action.into(),
            resource,
            outcome,
            summary: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attach structured details. A value that fails to serialize is dropped.
    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Render the record as a JSON line, or a plain fallback if that fails.
    pub fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                "{} {} {}",
                self.action,
                self.resource.as_deref().unwrap_or("-"),
                self.summary.as_deref().unwrap_or("")
            )
        })
    }

    /// Emit to the `audit` target. Never fails.
    pub fn log(self) {
        tracing::info!(
            target: "audit",
            user_id = self.user_id,
            action = %self.action,
            resource = self.resource,
            outcome = ?self.outcome,
            summary = self.summary,
            timestamp = %self.timestamp,
            "{}",
            self.render()
        );
    }
}
