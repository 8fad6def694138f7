//! Delivery of round messages
//!
//! One message per round goes out through exactly one channel, chosen
//! from the configuration: incoming webhook first, then bot token.

use async_trait::async_trait;
use persistence::PairingConfig;
use reqwest::Client;
use tracing::info;

use crate::error::GatewayError;
use crate::models::WebhookPayload;
use crate::slack::SlackClient;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), GatewayError>;
}

/// Posts `{"text": ...}` to a Slack incoming webhook
pub struct WebhookNotifier {
    http: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, text: &str) -> Result<(), GatewayError> {
        let res = self
            .http
            .post(&self.url)
            .json(&WebhookPayload {
                text: text.to_string(),
            })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(GatewayError::WebhookRejected {
                status: res.status().as_u16(),
            });
        }
        info!("Message delivered via webhook");
        Ok(())
    }
}

/// Posts through `chat.postMessage` as the bot user
pub struct SlackBotNotifier {
    client: SlackClient,
    channel: String,
}

impl SlackBotNotifier {
    pub fn new(client: SlackClient, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: channel.into(),
        }
    }
}

#[async_trait]
impl Notifier for SlackBotNotifier {
    async fn send(&self, text: &str) -> Result<(), GatewayError> {
        self.client.post_message(&self.channel, text).await?;
        info!(channel = %self.channel, "Message delivered via bot");
        Ok(())
    }
}

/// Prints the message instead of delivering it
pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, text: &str) -> Result<(), GatewayError> {
        println!("{}", text);
        Ok(())
    }
}

/// Pick the delivery channel for a configuration
pub fn notifier_from_config(
    config: &PairingConfig,
    debug: bool,
) -> Result<Box<dyn Notifier>, GatewayError> {
    if debug {
        return Ok(Box::new(StdoutNotifier));
    }

    if let Some(url) = config.slack_webhook_url.as_deref().filter(|u| !u.is_empty()) {
        return Ok(Box::new(WebhookNotifier::new(url)));
    }

    match (config.slack_bot_token.as_deref(), config.channel_id.as_deref()) {
        (Some(token), Some(channel)) if !token.is_empty() => Ok(Box::new(SlackBotNotifier::new(
            SlackClient::new(token),
            channel,
        ))),
        (Some(_), None) => Err(GatewayError::MissingSetting("channel_id")),
        _ => Err(GatewayError::MissingCredentials(
            "set slack_webhook_url or slack_bot_token".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> PairingConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_no_credentials_is_error() {
        let result = notifier_from_config(&config("{}"), false);
        assert!(matches!(result, Err(GatewayError::MissingCredentials(_))));
    }

    #[test]
    fn test_debug_needs_no_credentials() {
        assert!(notifier_from_config(&config("{}"), true).is_ok());
    }

    #[test]
    fn test_bot_token_requires_channel() {
        let result = notifier_from_config(&config(r#"{"slack_bot_token": "xoxb-1"}"#), false);
        assert!(matches!(result, Err(GatewayError::MissingSetting("channel_id"))));

        let ok = notifier_from_config(
            &config(r#"{"slack_bot_token": "xoxb-1", "channel_id": "C1"}"#),
            false,
        );
        assert!(ok.is_ok());
    }
}
