use persistence::ConfigError;
use thiserror::Error;

/// Central error type for the gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Slack API {method} failed: {error}")]
    SlackApi { method: String, error: String },

    #[error("Webhook rejected message: HTTP {status}")]
    WebhookRejected { status: u16 },

    #[error("Missing Slack credentials: {0}")]
    MissingCredentials(String),

    #[error("Missing config setting: {0}")]
    MissingSetting(&'static str),

    #[error("No message starting with {prefix:?} in channel {channel}")]
    KickstartNotFound { channel: String, prefix: String },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
