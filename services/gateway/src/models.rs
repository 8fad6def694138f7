//! Slack Web API and webhook payloads
//!
//! Only the fields this tool reads are modelled; Slack sends many more.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Incoming-webhook body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostMessageRequest<'a> {
    pub channel: &'a str,
    pub text: &'a str,
}

/// `ok`/`error` envelope shared by every Web API reply
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiStatus {
    pub fn into_result(self, method: &str) -> Result<(), GatewayError> {
        if self.ok {
            Ok(())
        } else {
            Err(GatewayError::SlackApi {
                method: method.to_string(),
                error: self.error.unwrap_or_else(|| "unknown_error".to_string()),
            })
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationsHistoryResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMessage {
    #[serde(default)]
    pub text: Option<String>,
    pub ts: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionsGetResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default)]
    pub message: Option<ReactedMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactedMessage {
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reaction {
    pub name: String,
    #[serde(default)]
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersProfileResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
}

impl UserProfile {
    /// First non-empty of display name, first name, real name
    pub fn preferred_name(&self) -> Option<&str> {
        [&self.display_name, &self.first_name, &self.real_name]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .find(|n| !n.trim().is_empty())
    }
}
