//! One-shot email notification sent when play first starts.
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::future::Future;
use thiserror::Error;

use crate::constants::FALLBACK_USER_NAME;
use crate::session::NotifyRequest;

/// Template parameters for the outbound email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub user_name: String,
    pub date: String,
    pub coords: String,
}

impl NotificationPayload {
    #[must_use]
    pub fn from_request(request: &NotifyRequest, date: impl Into<String>) -> Self {
        let user_name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(FALLBACK_USER_NAME)
            .to_string();
        Self {
            user_name,
            date: date.into(),
            coords: request.coords.to_string(),
        }
    }
}

/// Email service credentials. External configuration, never hard-coded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
}

fn default_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
        }
    }
}

impl EmailConfig {
    /// Load credentials from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// All three credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("email service is not configured")]
    NotConfigured,
    #[error("email transport failed: {0}")]
    Transport(String),
    #[error("email service rejected the message with status {0}")]
    Rejected(u16),
}

/// Outbound email transport.
pub trait Mailer {
    fn send(
        &self,
        config: &EmailConfig,
        payload: &NotificationPayload,
    ) -> impl Future<Output = Result<(), NotifyError>>;
}

/// Session-scoped "already notified" marker.
pub trait SentFlag {
    fn is_sent(&self) -> bool;
    fn mark_sent(&self);
}

/// In-memory flag for tests and native tools; lives as long as its owner.
#[derive(Debug, Default)]
pub struct MemorySentFlag {
    sent: Cell<bool>,
}

impl MemorySentFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SentFlag for MemorySentFlag {
    fn is_sent(&self) -> bool {
        self.sent.get()
    }

    fn mark_sent(&self) {
        self.sent.set(true);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    AlreadySent,
    Failed(NotifyError),
}

/// Sends the notification at most once per flag.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher<M: Mailer> {
    mailer: M,
    config: EmailConfig,
}

impl<M: Mailer> NotificationDispatcher<M> {
    #[must_use]
    pub const fn new(mailer: M, config: EmailConfig) -> Self {
        Self { mailer, config }
    }

    #[must_use]
    pub const fn mailer(&self) -> &M {
        &self.mailer
    }

    #[must_use]
    pub const fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Send unless `flag` is already set; set it only after a successful send.
    ///
    /// Failures are logged and returned, never raised.
    pub async fn notify_once<F: SentFlag>(
        &self,
        flag: &F,
        request: &NotifyRequest,
        date: impl Into<String>,
    ) -> DispatchOutcome {
        if flag.is_sent() {
            log::info!("notification already sent this session");
            return DispatchOutcome::AlreadySent;
        }
        if !self.config.is_configured() {
            log::warn!("notification skipped: {}", NotifyError::NotConfigured);
            return DispatchOutcome::Failed(NotifyError::NotConfigured);
        }
        let payload = NotificationPayload::from_request(request, date);
        match self.mailer.send(&self.config, &payload).await {
            Ok(()) => {
                flag.mark_sent();
                log::info!("notification sent for {}", payload.user_name);
                DispatchOutcome::Sent
            }
            Err(err) => {
                log::warn!("notification send failed: {err}");
                DispatchOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Coordinates;
    use futures::executor::block_on;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingMailer {
        sent: RefCell<Vec<NotificationPayload>>,
        fail_next: Cell<bool>,
    }

    impl Mailer for &RecordingMailer {
        async fn send(
            &self,
            _config: &EmailConfig,
            payload: &NotificationPayload,
        ) -> Result<(), NotifyError> {
            if self.fail_next.replace(false) {
                return Err(NotifyError::Transport("offline".into()));
            }
            self.sent.borrow_mut().push(payload.clone());
            Ok(())
        }
    }

    fn configured() -> EmailConfig {
        EmailConfig {
            endpoint: default_endpoint(),
            service_id: "svc".into(),
            template_id: "tpl".into(),
            public_key: "key".into(),
        }
    }

    fn request(name: Option<&str>) -> NotifyRequest {
        NotifyRequest {
            name: name.map(str::to_string),
            coords: Coordinates::new(1.5, -2.25),
        }
    }

    #[test]
    fn second_call_with_flag_set_sends_nothing() {
        let mailer = RecordingMailer::default();
        let dispatcher = NotificationDispatcher::new(&mailer, configured());
        let flag = MemorySentFlag::new();

        let first = block_on(dispatcher.notify_once(&flag, &request(Some("Ada")), "now"));
        let second = block_on(dispatcher.notify_once(&flag, &request(Some("Ada")), "later"));
        assert_eq!(first, DispatchOutcome::Sent);
        assert_eq!(second, DispatchOutcome::AlreadySent);
        assert_eq!(mailer.sent.borrow().len(), 1);

        let sent = mailer.sent.borrow();
        let payload = &sent[0];
        assert_eq!(payload.user_name, "Ada");
        assert_eq!(payload.date, "now");
        assert_eq!(payload.coords, "Latitude: 1.5, Longitude: -2.25");
    }

    #[test]
    fn failure_leaves_flag_unset_for_retry() {
        let mailer = RecordingMailer::default();
        mailer.fail_next.set(true);
        let dispatcher = NotificationDispatcher::new(&mailer, configured());
        let flag = MemorySentFlag::new();

        let outcome = block_on(dispatcher.notify_once(&flag, &request(None), "t"));
        assert!(matches!(outcome, DispatchOutcome::Failed(NotifyError::Transport(_))));
        assert!(!flag.is_sent());

        let retry = block_on(dispatcher.notify_once(&flag, &request(None), "t"));
        assert_eq!(retry, DispatchOutcome::Sent);
        assert_eq!(mailer.sent.borrow()[0].user_name, "Unknown");
    }

    #[test]
    fn unconfigured_service_never_calls_mailer() {
        let mailer = RecordingMailer::default();
        let dispatcher = NotificationDispatcher::new(&mailer, EmailConfig::default());
        let flag = MemorySentFlag::new();
        let outcome = block_on(dispatcher.notify_once(&flag, &request(Some("Ada")), "t"));
        assert_eq!(outcome, DispatchOutcome::Failed(NotifyError::NotConfigured));
        assert!(mailer.sent.borrow().is_empty());
    }

    #[test]
    fn email_config_parses_with_default_endpoint() {
        let cfg = EmailConfig::from_json(
            r#"{"service_id": "s", "template_id": "t", "public_key": "k"}"#,
        )
        .unwrap();
        assert!(cfg.is_configured());
        assert!(cfg.endpoint.contains("emailjs"));
        assert!(!EmailConfig::from_json("{}").unwrap().is_configured());
    }
}
