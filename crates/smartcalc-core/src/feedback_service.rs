//! Feedback submission with local fallback.

use std::fmt;

use smartcalc_domain::Feedback;

use crate::{
    auth::AdminContact,
    notify::{Notification, Notifier},
    time::Clock,
    CoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Delivered,
    SavedLocally,
}

impl fmt::Display for FeedbackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackOutcome::Delivered => f.write_str("delivered to the administrator"),
            FeedbackOutcome::SavedLocally => f.write_str("saved locally"),
        }
    }
}

pub struct FeedbackService;

impl FeedbackService {
    /// Builds a feedback record from user input. An empty message is rejected.
    pub fn compose(
        clock: &dyn Clock,
        name: Option<&str>,
        email: Option<&str>,
        message: &str,
    ) -> Result<Feedback, CoreError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CoreError::Validation("feedback message cannot be empty".into()));
        }
        let mut feedback = Feedback::new(message, clock.now());
        if let Some(name) = name {
            feedback = feedback.with_name(name.trim());
        }
        if let Some(email) = email {
            feedback = feedback.with_email(email.trim());
        }
        Ok(feedback)
    }

    /// Tries to forward `feedback`; reports whether the caller must keep it.
    pub fn deliver(
        contact: &AdminContact,
        notifier: &dyn Notifier,
        feedback: &Feedback,
    ) -> FeedbackOutcome {
        let Some(email) = contact.email.as_deref() else {
            tracing::info!("no admin address configured; keeping feedback locally");
            return FeedbackOutcome::SavedLocally;
        };
        if notifier.send(&Notification::feedback(email, feedback)) {
            tracing::info!("feedback delivered");
            FeedbackOutcome::Delivered
        } else {
            tracing::warn!("feedback delivery failed; keeping it locally");
            FeedbackOutcome::SavedLocally
        }
    }
}
