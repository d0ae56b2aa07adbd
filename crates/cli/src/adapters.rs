// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter wiring from configuration

use crate::config::NotifyConfig;
use bw_adapters::{NoOpNotify, NotifyError, NotifySink, WebhookNotifier};

/// Notification sink chosen from configuration.
///
/// No webhook configured means a silent run; alerts fall back to the routine
/// webhook when no separate alert URL is set.
#[derive(Clone)]
pub enum Notifier {
    Webhook(WebhookNotifier),
    Silent(NoOpNotify),
}

impl Notifier {
    pub fn from_config(config: &NotifyConfig) -> Notifier {
        match &config.webhook_url {
            Some(post) => {
                let alert = config.alert_url.as_ref().unwrap_or(post);
                Notifier::Webhook(WebhookNotifier::new(post.as_str(), alert.as_str()))
            }
            None => Notifier::Silent(NoOpNotify::new()),
        }
    }
}

impl NotifySink for Notifier {
    fn post(&self, message: &str) -> Result<(), NotifyError> {
        match self {
            Notifier::Webhook(webhook) => webhook.post(message),
            Notifier::Silent(noop) => noop.post(message),
        }
    }

    fn alert(&self, message: &str) -> Result<(), NotifyError> {
        match self {
            Notifier::Webhook(webhook) => webhook.alert(message),
            Notifier::Silent(noop) => noop.alert(message),
        }
    }
}
