use twitch_irc::message::{Badge, ServerMessage, UserNoticeEvent};

/// The low-level notifications the bot reacts to, lifted out of raw
/// `twitch-irc` server messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// The bot itself finished joining a channel.
    ChannelJoined { bot_username: String, channel: String },
    UserJoined { username: String, channel: String },
    MessageReceived {
        username: String,
        channel: String,
        is_subscriber: bool,
        message: String,
    },
    /// Another channel is raiding `channel`. Only the raider's display name is carried.
    RaidNotification { channel: String, display_name: String },
}

impl ClientEvent {
    /// Translates a server message, or returns `None` for anything the bot ignores.
    ///
    /// `bot_login` separates our own JOIN echo from other users joining.
    pub fn from_server_message(message: ServerMessage, bot_login: &str) -> Option<Self> {
        match message {
            ServerMessage::Join(join) => {
                if join.user_login.eq_ignore_ascii_case(bot_login) {
                    Some(ClientEvent::ChannelJoined {
                        bot_username: join.user_login,
                        channel: join.channel_login,
                    })
                } else {
                    Some(ClientEvent::UserJoined {
                        username: join.user_login,
                        channel: join.channel_login,
                    })
                }
            }
            ServerMessage::Privmsg(msg) => Some(ClientEvent::MessageReceived {
                is_subscriber: has_subscriber_badge(&msg.badges),
                username: msg.sender.login,
                channel: msg.channel_login,
                message: msg.message_text,
            }),
            ServerMessage::UserNotice(notice) if matches!(notice.event, UserNoticeEvent::Raid { .. }) => {
                Some(ClientEvent::RaidNotification {
                    channel: notice.channel_login,
                    display_name: notice.sender.name,
                })
            }
            _ => None,
        }
    }
}

fn has_subscriber_badge(badges: &[Badge]) -> bool {
    badges.iter().any(|b| b.name == "subscriber" || b.name == "founder")
}
