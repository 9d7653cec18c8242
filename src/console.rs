//! Subscribers that echo bot notifications to the console.

use crate::bot::Bot;
use crate::events::BotMessage;

pub fn user_joined_line(username: &str) -> String {
    format!("User joined {}", username)
}

pub fn raid_started_line(bot: &Bot, raider: &str) -> String {
    format!(
        "Raid was started!!!!!! {}, that's {} today!",
        raider,
        bot.raids_since_stream_begun()
    )
}

pub fn message_lines(message: &BotMessage<'_>) -> Vec<String> {
    let mut lines = vec![format!("{} says {}", message.username, message.message)];
    if message.is_subscriber {
        lines.push("They are a sub".to_string());
    }
    lines
}

/// Wires the three console printers onto `bot`.
pub fn attach(bot: &mut Bot) {
    bot.on_user_joined(|_, username| println!("{}", user_joined_line(username)));
    bot.on_raid_started(|bot, raider| println!("{}", raid_started_line(bot, raider)));
    bot.on_message_received(|message| {
        for line in message_lines(message) {
            println!("{}", line);
        }
    });
}
