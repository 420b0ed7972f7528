//! Outbound notifications (login alerts, feedback forwarding).

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcalc_domain::Feedback;

/// A message addressed to the administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn login(to: impl Into<String>, username: &str, at: DateTime<Utc>) -> Self {
        Self {
            to: to.into(),
            subject: "SmartCalc login".into(),
            body: format!("User '{username}' signed in at {}", at.to_rfc3339()),
            created_at: at,
        }
    }

    pub fn feedback(to: impl Into<String>, feedback: &Feedback) -> Self {
        Self {
            to: to.into(),
            subject: "SmartCalc feedback".into(),
            body: format!("From: {}\n\n{}", feedback.sender_label(), feedback.message),
            created_at: feedback.timestamp,
        }
    }
}

/// Delivers notifications. Returns `false` when delivery did not happen.
///
/// Callers never fail on a `false` result.
pub trait Notifier: Send + Sync {
    fn send(&self, notification: &Notification) -> bool;
}

/// Drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn send(&self, notification: &Notification) -> bool {
        tracing::debug!(subject = %notification.subject, "notifications disabled");
        false
    }
}

/// Keeps notifications in memory; useful in tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
    reject: bool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that reports every delivery as failed.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn send(&self, notification: &Notification) -> bool {
        if self.reject {
            return false;
        }
        match self.sent.lock() {
            Ok(mut guard) => guard.push(notification.clone()),
            Err(poisoned) => poisoned.into_inner().push(notification.clone()),
        }
        true
    }
}
