//! Sign-in rules for the shell session.

use smartcalc_domain::Owner;

use crate::{
    notify::{Notification, Notifier},
    time::Clock,
    CoreError,
};

/// Reserved username that requires the admin password.
pub const ADMIN_USERNAME: &str = "admin";

/// Administrator contact details taken from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminContact {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AdminContact {
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        let non_empty = |value: Option<String>| value.filter(|text| !text.trim().is_empty());
        Self {
            email: non_empty(email),
            password: non_empty(password),
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Validates credentials and returns the owner for the new session.
    ///
    /// On success a login notification goes to the admin address when one is
    /// configured; a failed delivery is logged and otherwise ignored.
    pub fn sign_in(
        clock: &dyn Clock,
        contact: &AdminContact,
        notifier: &dyn Notifier,
        username: &str,
        password: Option<&str>,
    ) -> Result<Owner, CoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CoreError::Authentication("username cannot be empty".into()));
        }
        if username.eq_ignore_ascii_case(ADMIN_USERNAME) {
            if let Some(expected) = contact.password.as_deref() {
                if password != Some(expected) {
                    tracing::warn!("rejected admin sign-in");
                    return Err(CoreError::Authentication("invalid admin password".into()));
                }
            }
        }

        if let Some(email) = contact.email.as_deref() {
            let notification = Notification::login(email, username, clock.now());
            if !notifier.send(&notification) {
                tracing::warn!(user = username, "login notification not delivered");
            }
        }
        tracing::info!(user = username, "signed in");
        Ok(Owner::new(username))
    }

    pub fn guest() -> Owner {
        tracing::info!("continuing as guest");
        Owner::guest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{notify::MemoryNotifier, time::FixedClock};
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap())
    }

    fn contact() -> AdminContact {
        AdminContact::new(Some("admin@example.com".into()), Some("s3cret".into()))
    }

    #[test]
    fn empty_username_is_rejected() {
        let err = AuthService::sign_in(&clock(), &contact(), &MemoryNotifier::new(), "  ", None)
            .unwrap_err();
        assert!(matches!(err, CoreError::Authentication(_)));
    }

    #[test]
    fn admin_requires_configured_password() {
        let notifier = MemoryNotifier::new();
        assert!(
            AuthService::sign_in(&clock(), &contact(), &notifier, "Admin", Some("nope")).is_err()
        );
        let owner =
            AuthService::sign_in(&clock(), &contact(), &notifier, "admin", Some("s3cret")).unwrap();
        assert_eq!(owner.as_str(), "admin");
    }

    #[test]
    fn admin_without_configured_password_is_open() {
        let contact = AdminContact::new(None, Some("   ".into()));
        let owner =
            AuthService::sign_in(&clock(), &contact, &MemoryNotifier::new(), "admin", None).unwrap();
        assert_eq!(owner.as_str(), "admin");
    }

    #[test]
    fn named_sign_in_notifies_admin() {
        let notifier = MemoryNotifier::new();
        AuthService::sign_in(&clock(), &contact(), &notifier, " wanjiru ", None).unwrap();
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "admin@example.com");
        assert!(sent[0].body.contains("'wanjiru'"));
    }

    #[test]
    fn failed_notification_does_not_block_sign_in() {
        let owner = AuthService::sign_in(
            &clock(),
            &contact(),
            &MemoryNotifier::failing(),
            "wanjiru",
            None,
        )
        .unwrap();
        assert_eq!(owner.as_str(), "wanjiru");
        assert!(AuthService::guest().is_guest());
    }
}
