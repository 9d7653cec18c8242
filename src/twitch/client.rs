use log::{debug, info};
use tokio::sync::mpsc::UnboundedReceiver;
use twitch_irc::login::StaticLoginCredentials;
use twitch_irc::message::{IRCMessage, ServerMessage};
use twitch_irc::{ClientConfig, SecureTCPTransport, TwitchIRCClient};

use crate::config::TwitchBotConfig;
use crate::error::BotError;

pub type TwitchIRCClientType = TwitchIRCClient<SecureTCPTransport, StaticLoginCredentials>;

/// Builds the IRC client for the bot account. Nothing goes over the wire
/// until a channel is joined.
///
/// Must be called from inside a tokio runtime.
pub fn create_client(
    settings: &TwitchBotConfig,
) -> Result<(UnboundedReceiver<ServerMessage>, TwitchIRCClientType), BotError> {
    let username = required(&settings.name, "twitch.bot.name")?;
    let oauth_token = required(&settings.oauth, "twitch.bot.oauth")?;
    required(&settings.channel, "twitch.bot.channel")?;

    let oauth_token = oauth_token.trim_start_matches("oauth:").to_string();
    if oauth_token.is_empty() {
        return Err(BotError::MissingSetting("twitch.bot.oauth"));
    }

    info!("Twitch IRC username: {}", username);
    debug!("Twitch channel to join: {}", settings.channel.trim());

    let client_config = ClientConfig::new_simple(StaticLoginCredentials::new(
        username.to_lowercase(),
        Some(oauth_token),
    ));

    Ok(TwitchIRCClientType::new(client_config))
}

/// `twitch-irc` only asks for tags and commands. Without membership Twitch
/// never sends JOINs for other users.
pub fn membership_request() -> IRCMessage {
    IRCMessage::new_simple(
        "CAP".to_string(),
        vec!["REQ".to_string(), "twitch.tv/membership".to_string()],
    )
}

fn required<'a>(value: &'a str, key: &'static str) -> Result<&'a str, BotError> {
    let value = value.trim();
    if value.is_empty() {
        Err(BotError::MissingSetting(key))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_request_asks_for_membership_cap() {
        let request = membership_request();
        assert_eq!(request.command, "CAP");
        assert_eq!(request.params, vec!["REQ", "twitch.tv/membership"]);
    }

    #[test]
    fn test_required_trims_and_rejects_blank() {
        assert_eq!(required("  gamerbot ", "twitch.bot.name").unwrap(), "gamerbot");
        assert!(matches!(
            required("   ", "twitch.bot.name"),
            Err(BotError::MissingSetting("twitch.bot.name"))
        ));
    }
}
