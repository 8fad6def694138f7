//! Roster setup from Slack reactions
//!
//! People sign up by reacting (with any emoji) to a kickstart message in
//! the channel. Everyone who reacted becomes a participant.

use persistence::{ConfigStore, PairingConfig};
use std::collections::BTreeSet;
use tracing::info;
use types::ids::Participant;

use crate::error::GatewayError;
use crate::slack::SlackClient;

pub const TOKEN_ENV: &str = "SLACK_BOT_TOKEN";

/// Bot token from the config, else from `SLACK_BOT_TOKEN`
pub fn resolve_token(config: &PairingConfig) -> Result<String, GatewayError> {
    config
        .slack_bot_token
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()))
        .ok_or_else(|| {
            GatewayError::MissingCredentials(format!("set slack_bot_token or {}", TOKEN_ENV))
        })
}

/// Replace the configured participants with everyone who reacted to the
/// kickstart message, and save the config.
///
/// Participants are sorted by id. Returns the new participant list.
pub async fn setup_from_reactions(
    store: &ConfigStore,
    client: &SlackClient,
) -> Result<Vec<Participant>, GatewayError> {
    let mut config = store.load()?;
    let channel = config
        .channel_id
        .clone()
        .ok_or(GatewayError::MissingSetting("channel_id"))?;
    let prefix = config
        .kickstart_message_prefix
        .clone()
        .ok_or(GatewayError::MissingSetting("kickstart_message_prefix"))?;

    let messages = client.conversations_history(&channel).await?;
    info!(channel = %channel, messages = messages.len(), "Read channel history");

    let kickstart = messages
        .iter()
        .find(|m| m.text.as_deref().is_some_and(|t| t.starts_with(prefix.as_str())))
        .ok_or_else(|| GatewayError::KickstartNotFound {
            channel: channel.clone(),
            prefix: prefix.clone(),
        })?;

    let reactions = client.reactions_get(&channel, &kickstart.ts).await?;
    let user_ids: BTreeSet<String> = reactions
        .into_iter()
        .flat_map(|r| r.users)
        .collect();
    info!(participants = user_ids.len(), "Collected reacting users");

    let mut participants = Vec::with_capacity(user_ids.len());
    for user in user_ids {
        let profile = client.users_profile_get(&user).await?;
        let name = profile.preferred_name().unwrap_or(user.as_str()).to_string();
        info!(id = %user, name = %name, "Participant");
        participants.push(Participant::new(user, name));
    }

    config.participants = participants.clone();
    store.save(&config)?;
    info!(path = %store.path().display(), "Updated config with participants");

    Ok(participants)
}
