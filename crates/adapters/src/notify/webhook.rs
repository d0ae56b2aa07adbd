// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Webhook notification adapter

use super::{NotifyError, NotifySink};
use serde::Serialize;

#[derive(Serialize)]
struct Payload<'a> {
    text: &'a str,
}

/// Notification sink posting JSON payloads to chat webhooks.
///
/// Routine messages and operator alerts go to separate URLs so alerts can
/// land in a different channel.
#[derive(Clone)]
pub struct WebhookNotifier {
    agent: ureq::Agent,
    post_url: String,
    alert_url: String,
}

impl WebhookNotifier {
    pub fn new(post_url: impl Into<String>, alert_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            post_url: post_url.into(),
            alert_url: alert_url.into(),
        }
    }

    fn send(&self, url: &str, message: &str) -> Result<(), NotifyError> {
        self.agent
            .post(url)
            .send_json(&Payload { text: message })
            .map_err(|err| match err {
                ureq::Error::StatusCode(code) => NotifyError::Status(code),
                other => NotifyError::Transport(other.to_string()),
            })?;
        Ok(())
    }
}

impl NotifySink for WebhookNotifier {
    fn post(&self, message: &str) -> Result<(), NotifyError> {
        tracing::debug!(len = message.len(), "posting notification");
        self.send(&self.post_url, message)
    }

    fn alert(&self, message: &str) -> Result<(), NotifyError> {
        tracing::warn!(%message, "posting operator alert");
        self.send(&self.alert_url, message)
    }
}
