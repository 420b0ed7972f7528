use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use smartcalc_core::{Notification, Notifier};

/// Appends notifications to a local JSON-lines outbox for later relay.
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    path: PathBuf,
}

impl OutboxNotifier {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, notification: &Notification) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let line = serde_json::to_string(notification)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl Notifier for OutboxNotifier {
    fn send(&self, notification: &Notification) -> bool {
        match self.append(notification) {
            Ok(()) => {
                tracing::debug!(to = %notification.to, subject = %notification.subject, "queued notification");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "failed to queue notification");
                false
            }
        }
    }
}
