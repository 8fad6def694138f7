//! Slack Web API client
//!
//! Thin wrapper over the handful of Web API methods used by the round
//! announcement and by roster setup. Every call is throttled per method
//! so that large rosters do not trip Slack's tier limits.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::error::GatewayError;
use crate::models::{
    ConversationsHistoryResponse, HistoryMessage, PostMessageRequest, PostMessageResponse,
    Reaction, ReactionsGetResponse, UserProfile, UsersProfileResponse,
};
use crate::rate_limit::RateLimiter;

pub const SLACK_API_BASE: &str = "https://slack.com/api";

/// Web API methods this client calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlackMethod {
    PostMessage,
    ConversationsHistory,
    ReactionsGet,
    UsersProfileGet,
}

impl SlackMethod {
    pub fn name(self) -> &'static str {
        match self {
            SlackMethod::PostMessage => "chat.postMessage",
            SlackMethod::ConversationsHistory => "conversations.history",
            SlackMethod::ReactionsGet => "reactions.get",
            SlackMethod::UsersProfileGet => "users.profile.get",
        }
    }

    /// Burst capacity and sustained calls per second
    fn budget(self) -> (u32, f64) {
        match self {
            // Roughly one message per second per channel
            SlackMethod::PostMessage => (1, 1.0),
            // Tier 3: 50+ per minute
            SlackMethod::ConversationsHistory | SlackMethod::ReactionsGet => (5, 50.0 / 60.0),
            // Tier 4: 100+ per minute
            SlackMethod::UsersProfileGet => (10, 100.0 / 60.0),
        }
    }
}

#[derive(Clone)]
pub struct SlackClient {
    http: Client,
    base_url: String,
    token: String,
    limiter: Arc<RateLimiter>,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: SLACK_API_BASE.to_string(),
            token: token.into(),
            limiter: Arc::new(RateLimiter::new()),
        }
    }

    /// Point the client at another API root (used against local test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn method_url(&self, method: SlackMethod, params: &[(&str, &str)]) -> Result<Url, GatewayError> {
        let raw = format!("{}/{}", self.base_url, method.name());
        Url::parse_with_params(&raw, params).map_err(|e| GatewayError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    async fn throttle(&self, method: SlackMethod) {
        let (capacity, rate) = method.budget();
        let wait = self.limiter.reserve(method.name(), capacity, rate);
        if !wait.is_zero() {
            debug!(method = method.name(), wait_ms = wait.as_millis() as u64, "Throttling Slack call");
            tokio::time::sleep(wait).await;
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        method: SlackMethod,
        params: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        self.throttle(method).await;
        let url = self.method_url(method, params)?;

        let reply = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;
        Ok(reply)
    }

    /// `chat.postMessage`
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<(), GatewayError> {
        let method = SlackMethod::PostMessage;
        self.throttle(method).await;
        let url = self.method_url(method, &[])?;

        let reply = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&PostMessageRequest { channel, text })
            .send()
            .await?
            .error_for_status()?
            .json::<PostMessageResponse>()
            .await?;
        reply.status.into_result(method.name())
    }

    /// `conversations.history`, newest first, first page only
    pub async fn conversations_history(
        &self,
        channel: &str,
    ) -> Result<Vec<HistoryMessage>, GatewayError> {
        let method = SlackMethod::ConversationsHistory;
        let reply: ConversationsHistoryResponse =
            self.get(method, &[("channel", channel)]).await?;
        reply.status.into_result(method.name())?;
        Ok(reply.messages)
    }

    /// `reactions.get` with the full user list of every reaction
    pub async fn reactions_get(
        &self,
        channel: &str,
        timestamp: &str,
    ) -> Result<Vec<Reaction>, GatewayError> {
        let method = SlackMethod::ReactionsGet;
        let reply: ReactionsGetResponse = self
            .get(
                method,
                &[("channel", channel), ("timestamp", timestamp), ("full", "true")],
            )
            .await?;
        reply.status.into_result(method.name())?;
        Ok(reply.message.map(|m| m.reactions).unwrap_or_default())
    }

    /// `users.profile.get`
    pub async fn users_profile_get(&self, user: &str) -> Result<UserProfile, GatewayError> {
        let method = SlackMethod::UsersProfileGet;
        let reply: UsersProfileResponse = self.get(method, &[("user", user)]).await?;
        reply.status.into_result(method.name())?;
        Ok(reply.profile.unwrap_or_default())
    }
}
