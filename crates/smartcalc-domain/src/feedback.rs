//! User feedback kept locally when it cannot be delivered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::Timestamped;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Feedback {
    pub fn new(message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: None,
            email: None,
            message: message.into(),
            timestamp,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|value: &String| !value.trim().is_empty());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into()).filter(|value: &String| !value.trim().is_empty());
        self
    }

    pub fn sender_label(&self) -> String {
        format!(
            "{} ({})",
            self.name.as_deref().unwrap_or("anonymous"),
            self.email.as_deref().unwrap_or("no email provided")
        )
    }
}

impl Timestamped for Feedback {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
